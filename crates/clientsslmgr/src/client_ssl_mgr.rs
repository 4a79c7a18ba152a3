//! ClientSslMgr - client SSL profile reconciliation.
//!
//! One run reconciles a single named profile:
//! 1. Derive desired state from the input document
//! 2. Check existence, load current state from the device
//! 3. Diff desired against current
//! 4. Create/modify/delete through [`DeviceApi`] unless in check mode
//! 5. Assemble the result with the reportable change payload

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, instrument};

use bigip_cfgmgr_common::{CfgMgrError, CfgMgrResult, Deprecation, DeviceApi, ModuleResult};

use crate::endpoints::{api_fields, defaults, profile_uri, PROFILE_COLLECTION_URI};
use crate::params::{diff, ApiParams, Changes, ModuleParams};
use crate::types::{ModuleInput, State};

/// Client SSL profile configuration manager.
pub struct ClientSslMgr {
    device: Arc<dyn DeviceApi>,
    want: ModuleParams,
    deprecations: Vec<Deprecation>,
    check_mode: bool,
}

impl ClientSslMgr {
    /// Creates a manager from the input document.
    ///
    /// Validation errors in the document surface here, before any device
    /// call is made.
    pub fn new(
        device: Arc<dyn DeviceApi>,
        input: &ModuleInput,
        check_mode: bool,
    ) -> CfgMgrResult<Self> {
        let (want, deprecations) = ModuleParams::from_input(input)?;
        Ok(Self {
            device,
            want,
            deprecations,
            check_mode,
        })
    }

    /// Runs the reconciliation and assembles the module result.
    #[instrument(skip(self), fields(name = %self.want.name, partition = %self.want.partition))]
    pub async fn exec(&self) -> CfgMgrResult<ModuleResult> {
        let (changed, changes) = match self.want.state {
            State::Present => self.present().await?,
            State::Absent => (self.absent().await?, Changes::default()),
        };

        Ok(ModuleResult::new(changed)
            .with_changes(changes.to_return())
            .with_deprecations(self.deprecations.clone()))
    }

    async fn present(&self) -> CfgMgrResult<(bool, Changes)> {
        if self.exists().await? {
            self.update().await
        } else {
            self.create().await
        }
    }

    async fn create(&self) -> CfgMgrResult<(bool, Changes)> {
        let mut changes = Changes {
            ciphers: self.want.ciphers.clone(),
            cert_key_chain: self.want.cert_key_chain.clone(),
            ocsp_stapling: self.want.ocsp_stapling.clone(),
        };
        // New profiles get the default cipher list when none was declared.
        if changes.ciphers.is_none() {
            changes.ciphers = Some(defaults::CIPHERS.to_string());
        }

        if self.check_mode {
            debug!("Check mode, skipping create");
            return Ok((true, changes));
        }
        self.create_on_device(&changes).await?;
        info!("Created profile {}", self.want.name);
        Ok((true, changes))
    }

    async fn update(&self) -> CfgMgrResult<(bool, Changes)> {
        let have = self.read_current().await?;
        let changes = diff(&self.want, &have)?;
        if changes.is_empty() {
            debug!("Profile {} already in desired state", self.want.name);
            return Ok((false, changes));
        }
        if self.check_mode {
            debug!("Check mode, skipping modify");
            return Ok((true, changes));
        }
        self.update_on_device(&changes).await?;
        info!("Updated profile {}", self.want.name);
        Ok((true, changes))
    }

    async fn absent(&self) -> CfgMgrResult<bool> {
        if !self.exists().await? {
            return Ok(false);
        }
        if self.check_mode {
            debug!("Check mode, skipping delete");
            return Ok(true);
        }
        self.device.delete(&self.uri()).await?;
        if self.exists().await? {
            return Err(CfgMgrError::delete_failed("profile"));
        }
        info!("Deleted profile {}", self.want.name);
        Ok(true)
    }

    fn uri(&self) -> String {
        profile_uri(&self.want.partition, &self.want.name)
    }

    async fn exists(&self) -> CfgMgrResult<bool> {
        self.device.exists(&self.uri()).await
    }

    async fn read_current(&self) -> CfgMgrResult<ApiParams> {
        let raw = self.device.load(&self.uri()).await?;
        ApiParams::from_device(raw)
    }

    async fn create_on_device(&self, changes: &Changes) -> CfgMgrResult<()> {
        let mut body = changes.api_params();
        body.insert(
            api_fields::NAME.to_string(),
            Value::String(self.want.name.clone()),
        );
        body.insert(
            api_fields::PARTITION.to_string(),
            Value::String(self.want.partition.clone()),
        );
        body.insert(
            api_fields::DEFAULTS_FROM.to_string(),
            Value::String(self.want.parent.clone()),
        );
        self.device
            .create(PROFILE_COLLECTION_URI, &Value::Object(body))
            .await
    }

    async fn update_on_device(&self, changes: &Changes) -> CfgMgrResult<()> {
        self.device
            .modify(&self.uri(), &Value::Object(changes.api_params()))
            .await
    }
}
