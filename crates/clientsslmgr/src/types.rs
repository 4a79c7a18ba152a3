//! Type definitions for clientsslmgr

use serde::{Deserialize, Serialize};
use serde_json::Value;

use bigip_cfgmgr_common::ConnectionParams;

use crate::endpoints::defaults;

/// Desired lifecycle state of the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    /// The profile must exist with the declared settings.
    #[default]
    Present,
    /// The profile must not exist.
    Absent,
}

/// One raw cert/key/chain entry from the input document.
///
/// `cert` and `key` are optional here so the pairing rule can be enforced
/// with a descriptive error instead of a parse failure.
#[derive(Debug, Clone, Deserialize)]
pub struct CertKeyChainInput {
    /// Certificate name.
    pub cert: Option<String>,
    /// Key name.
    pub key: Option<String>,
    /// Optional chain name, or the literal "none".
    pub chain: Option<String>,
    /// Optional key passphrase, passed through untouched.
    pub passphrase: Option<String>,
}

/// A derived cert/key/chain bundle in the canonical device shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertKeyChain {
    /// Bundle name, derived from the certificate's base filename.
    pub name: String,
    /// Fully-qualified certificate path.
    pub cert: String,
    /// Fully-qualified key path.
    pub key: String,
    /// Fully-qualified chain path, or the literal "none".
    ///
    /// Absent only in device responses that omit the field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain: Option<String>,
    /// Key passphrase. The device stores passphrases encrypted, so this
    /// never compares equal to current state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passphrase: Option<String>,
}

impl CertKeyChain {
    /// Flattens the bundle into (field, value) string pairs for
    /// order-independent set comparison.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("name".to_string(), self.name.clone()),
            ("cert".to_string(), self.cert.clone()),
            ("key".to_string(), self.key.clone()),
        ];
        if let Some(chain) = &self.chain {
            pairs.push(("chain".to_string(), chain.clone()));
        }
        if let Some(passphrase) = &self.passphrase {
            pairs.push(("passphrase".to_string(), passphrase.clone()));
        }
        pairs
    }
}

/// The declarative input document for one clientsslmgr run.
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleInput {
    /// Device endpoint and credentials.
    #[serde(flatten)]
    pub connection: ConnectionParams,

    /// Desired lifecycle state.
    #[serde(default)]
    pub state: State,

    /// Compute the change set without applying it.
    #[serde(default)]
    pub check_mode: bool,

    /// Profile name.
    pub name: String,

    /// Parent profile. Immutable once set on the device.
    pub parent: Option<String>,

    /// Cipher list.
    pub ciphers: Option<String>,

    /// Certificate/key/chain bundles.
    pub cert_key_chain: Option<Vec<CertKeyChainInput>>,

    /// OCSP stapling, boolean-like.
    pub ocsp_stapling: Option<Value>,

    /// Device partition to manage the profile in.
    #[serde(default = "default_partition")]
    pub partition: String,
}

fn default_partition() -> String {
    defaults::PARTITION.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_input_defaults() {
        let input: ModuleInput = serde_yaml::from_str(
            "server: lb.example.com\nuser: admin\npassword: secret\nname: my_profile\n",
        )
        .unwrap();
        assert_eq!(input.state, State::Present);
        assert!(!input.check_mode);
        assert_eq!(input.partition, "Common");
        assert!(input.parent.is_none());
        assert!(input.cert_key_chain.is_none());
    }

    #[test]
    fn test_input_absent_state() {
        let input: ModuleInput = serde_yaml::from_str(
            "server: lb.example.com\nuser: admin\npassword: secret\nname: p\nstate: absent\n",
        )
        .unwrap();
        assert_eq!(input.state, State::Absent);
    }

    #[test]
    fn test_cert_key_chain_to_pairs() {
        let bundle = CertKeyChain {
            name: "a".to_string(),
            cert: "/Common/a.crt".to_string(),
            key: "/Common/a.key".to_string(),
            chain: Some("none".to_string()),
            passphrase: None,
        };
        let pairs = bundle.to_pairs();
        assert!(pairs.contains(&("cert".to_string(), "/Common/a.crt".to_string())));
        assert!(pairs.contains(&("chain".to_string(), "none".to_string())));
        assert!(!pairs.iter().any(|(f, _)| f == "passphrase"));
    }

    #[test]
    fn test_device_bundle_without_chain() {
        let bundle: CertKeyChain = serde_json::from_value(json!({
            "name": "a",
            "cert": "/Common/a.crt",
            "key": "/Common/a.key",
        }))
        .unwrap();
        assert!(bundle.chain.is_none());
        assert_eq!(bundle.to_pairs().len(), 3);
    }
}
