//! Desired-state derivation, current-state normalization and diffing for
//! client SSL profiles.

use serde::Deserialize;
use serde_json::{Map, Value};

use bigip_cfgmgr_common::diff::{diff_field, ensure_same, pairs_subset};
use bigip_cfgmgr_common::params::{
    cert_filename, coerce_flag, fqdn_name, file_base, key_filename, Deprecation,
};
use bigip_cfgmgr_common::{CfgMgrError, CfgMgrResult};

use crate::endpoints::{api_fields, defaults, fields};
use crate::types::{CertKeyChain, CertKeyChainInput, ModuleInput, State};

/// Desired-state view, derived once from the input document.
#[derive(Debug, Clone)]
pub struct ModuleParams {
    pub name: String,
    pub partition: String,
    pub state: State,
    /// Fully-qualified parent profile path.
    pub parent: String,
    pub ciphers: Option<String>,
    /// Derived bundles, sorted by name.
    pub cert_key_chain: Option<Vec<CertKeyChain>>,
    pub ocsp_stapling: Option<String>,
}

impl ModuleParams {
    /// Derives the desired-state view, accumulating deprecation notices.
    ///
    /// Fails fast on validation errors; nothing is sent to the device.
    pub fn from_input(input: &ModuleInput) -> CfgMgrResult<(Self, Vec<Deprecation>)> {
        let mut deprecations = Vec::new();

        let parent = fqdn_name(
            &input.partition,
            input.parent.as_deref().unwrap_or(defaults::PARENT),
        );

        let cert_key_chain = input
            .cert_key_chain
            .as_ref()
            .map(|entries| derive_bundles(&input.partition, entries))
            .transpose()?;

        let ocsp_stapling = input.ocsp_stapling.as_ref().map(|raw| {
            let (value, deprecation) = coerce_flag(raw);
            deprecations.extend(deprecation);
            value
        });

        let params = Self {
            name: input.name.clone(),
            partition: input.partition.clone(),
            state: input.state,
            parent,
            ciphers: input.ciphers.clone(),
            cert_key_chain,
            ocsp_stapling,
        };
        Ok((params, deprecations))
    }
}

/// Expands raw bundle entries into the canonical device shape, sorted by
/// derived name for order-independent comparison.
fn derive_bundles(
    partition: &str,
    entries: &[CertKeyChainInput],
) -> CfgMgrResult<Vec<CertKeyChain>> {
    let mut result = Vec::with_capacity(entries.len());
    for entry in entries {
        let (cert, key) = match (&entry.cert, &entry.key) {
            (Some(cert), Some(key)) => (cert, key),
            (None, Some(_)) => {
                return Err(CfgMgrError::invalid_config(
                    "cert_key_chain",
                    "When providing a 'key', you must also provide a 'cert'",
                ));
            }
            (Some(_), None) => {
                return Err(CfgMgrError::invalid_config(
                    "cert_key_chain",
                    "When providing a 'cert', you must also provide a 'key'",
                ));
            }
            (None, None) => {
                return Err(CfgMgrError::invalid_config(
                    "cert_key_chain",
                    "Each entry must provide both a 'cert' and a 'key'",
                ));
            }
        };

        let cert = cert_filename(cert);
        let key = key_filename(key);
        let chain = match entry.chain.as_deref() {
            None | Some(defaults::NO_CHAIN) => defaults::NO_CHAIN.to_string(),
            Some(chain) => cert_filename(&fqdn_name(partition, chain)),
        };

        result.push(CertKeyChain {
            name: file_base(&cert),
            cert: fqdn_name(partition, &cert),
            key: fqdn_name(partition, &key),
            chain: Some(chain),
            passphrase: entry.passphrase.clone(),
        });
    }
    result.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(result)
}

/// Current-state view, normalized from the device response.
///
/// Only fields present in the response are populated; no defaults are
/// invented for missing fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiParams {
    pub ciphers: Option<String>,
    #[serde(rename = "certKeyChain")]
    pub cert_key_chain: Option<Vec<CertKeyChain>>,
    #[serde(rename = "ocspStapling")]
    pub ocsp_stapling: Option<String>,
    #[serde(rename = "defaultsFrom")]
    pub parent: Option<String>,
}

impl ApiParams {
    /// Normalizes a raw device response into the canonical field shape.
    pub fn from_device(value: Value) -> CfgMgrResult<Self> {
        let mut params: Self = serde_json::from_value(value)
            .map_err(|e| CfgMgrError::device("load", e.to_string()))?;
        if let Some(bundles) = &mut params.cert_key_chain {
            bundles.sort_by(|a, b| a.name.cmp(&b.name));
        }
        Ok(params)
    }
}

/// The change set: fields that must be written to reconcile the device.
#[derive(Debug, Clone, Default)]
pub struct Changes {
    pub ciphers: Option<String>,
    pub cert_key_chain: Option<Vec<CertKeyChain>>,
    pub ocsp_stapling: Option<String>,
}

impl Changes {
    pub fn is_empty(&self) -> bool {
        self.ciphers.is_none() && self.cert_key_chain.is_none() && self.ocsp_stapling.is_none()
    }

    /// Device-facing payload, using API field names.
    pub fn api_params(&self) -> Map<String, Value> {
        let mut map = Map::new();
        if let Some(ciphers) = &self.ciphers {
            map.insert(api_fields::CIPHERS.to_string(), Value::String(ciphers.clone()));
        }
        if let Some(bundles) = &self.cert_key_chain {
            // Serialization of plain string records cannot fail.
            map.insert(
                api_fields::CERT_KEY_CHAIN.to_string(),
                serde_json::to_value(bundles).unwrap_or(Value::Null),
            );
        }
        if let Some(ocsp) = &self.ocsp_stapling {
            map.insert(
                api_fields::OCSP_STAPLING.to_string(),
                Value::String(ocsp.clone()),
            );
        }
        map
    }

    /// Caller-facing reportable projection.
    ///
    /// Bundles are not reportable; passphrases must never leak into the
    /// result payload.
    pub fn to_return(&self) -> Map<String, Value> {
        let mut map = Map::new();
        if let Some(ciphers) = &self.ciphers {
            map.insert(fields::CIPHERS.to_string(), Value::String(ciphers.clone()));
        }
        if let Some(ocsp) = &self.ocsp_stapling {
            map.insert(
                fields::OCSP_STAPLING.to_string(),
                Value::String(ocsp.clone()),
            );
        }
        map
    }
}

/// Compares desired against current state.
///
/// The parent profile is immutable: any difference aborts the run before a
/// device write. Bundles compare as flattened pair sets; everything else
/// uses default equality.
pub fn diff(want: &ModuleParams, have: &ApiParams) -> CfgMgrResult<Changes> {
    ensure_same("parent profile", Some(&want.parent), have.parent.as_deref())?;

    Ok(Changes {
        ciphers: diff_field(want.ciphers.as_ref(), have.ciphers.as_ref()),
        cert_key_chain: diff_bundles(
            want.cert_key_chain.as_deref(),
            have.cert_key_chain.as_deref(),
        ),
        ocsp_stapling: diff_field(want.ocsp_stapling.as_ref(), have.ocsp_stapling.as_ref()),
    })
}

/// Bundle comparison: no change when the desired entries, flattened into
/// (field, value) pairs, are a subset of what the device reports. Bundle
/// management is additive-only; a shorter desired list never deletes
/// entries. Otherwise the whole desired list is the new value (full
/// replacement, not partial patch).
fn diff_bundles(
    want: Option<&[CertKeyChain]>,
    have: Option<&[CertKeyChain]>,
) -> Option<Vec<CertKeyChain>> {
    let want = want?;
    let want_pairs: Vec<(String, String)> =
        want.iter().flat_map(CertKeyChain::to_pairs).collect();
    let have_pairs: Vec<(String, String)> = have
        .unwrap_or_default()
        .iter()
        .flat_map(CertKeyChain::to_pairs)
        .collect();
    if pairs_subset(&want_pairs, &have_pairs) {
        None
    } else {
        Some(want.to_vec())
    }
}
