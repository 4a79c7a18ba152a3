//! SysGlobalMgr - system global settings reconciliation.
//!
//! The global settings resource is a singleton: it always exists, so the
//! only lifecycle is load → diff → modify. The modify payload is the full
//! desired-state document; the diff only decides whether a write is needed
//! and what gets reported.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, instrument};

use bigip_cfgmgr_common::{CfgMgrResult, Deprecation, DeviceApi, ModuleResult};

use crate::endpoints::GLOBAL_SETTINGS_URI;
use crate::params::{diff, ApiParams, Changes, ModuleParams};
use crate::types::ModuleInput;

/// System global settings configuration manager.
pub struct SysGlobalMgr {
    device: Arc<dyn DeviceApi>,
    want: ModuleParams,
    deprecations: Vec<Deprecation>,
    check_mode: bool,
}

impl SysGlobalMgr {
    /// Creates a manager from the input document.
    pub fn new(device: Arc<dyn DeviceApi>, input: &ModuleInput, check_mode: bool) -> Self {
        let (want, deprecations) = ModuleParams::from_input(input);
        Self {
            device,
            want,
            deprecations,
            check_mode,
        }
    }

    /// Runs the reconciliation and assembles the module result.
    #[instrument(skip(self))]
    pub async fn exec(&self) -> CfgMgrResult<ModuleResult> {
        let (changed, changes) = self.update().await?;
        Ok(ModuleResult::new(changed)
            .with_changes(changes.to_return())
            .with_deprecations(self.deprecations.clone()))
    }

    async fn update(&self) -> CfgMgrResult<(bool, Changes)> {
        let have = self.read_current().await?;
        let changes = diff(&self.want, &have);
        if changes.is_empty() {
            debug!("Global settings already in desired state");
            return Ok((false, changes));
        }
        if self.check_mode {
            debug!("Check mode, skipping modify");
            return Ok((true, changes));
        }
        self.update_on_device().await?;
        info!("Updated global settings");
        Ok((true, changes))
    }

    async fn read_current(&self) -> CfgMgrResult<ApiParams> {
        let raw = self.device.load(GLOBAL_SETTINGS_URI).await?;
        ApiParams::from_device(raw)
    }

    async fn update_on_device(&self) -> CfgMgrResult<()> {
        self.device
            .modify(GLOBAL_SETTINGS_URI, &Value::Object(self.want.api_params()))
            .await
    }
}
