//! Parameter derivation helpers shared by all cfgmgr tools.
//!
//! These are the pure functions that turn raw user input into the canonical
//! shapes the device expects: fully-qualified resource paths, normalized
//! certificate/key filenames, and `enabled`/`disabled` flags derived from
//! boolean-like input.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A deprecation notice accumulated while deriving desired-state parameters.
///
/// Notices are reported alongside the module result, never inside the
/// changed-field payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deprecation {
    /// Human-readable message.
    pub msg: String,
    /// Version tag in which the deprecated form is slated for removal.
    pub version: String,
}

/// Notice emitted when a flag is given as the legacy `enabled`/`disabled`.
pub fn legacy_flag_deprecation() -> Deprecation {
    Deprecation {
        msg: "enabled/disabled are deprecated. Use boolean values (true, yes, no, 1, 0) instead."
            .to_string(),
        version: "2.5".to_string(),
    }
}

/// Qualifies a resource name with the partition if it is not already a
/// full device path.
///
/// ```
/// use bigip_cfgmgr_common::params::fqdn_name;
///
/// assert_eq!(fqdn_name("Common", "my_profile"), "/Common/my_profile");
/// assert_eq!(fqdn_name("Common", "/Other/my_profile"), "/Other/my_profile");
/// ```
pub fn fqdn_name(partition: &str, name: &str) -> String {
    if name.starts_with('/') {
        name.to_string()
    } else {
        format!("/{}/{}", partition, name)
    }
}

/// Appends `.crt` to a certificate name if it is not already present.
pub fn cert_filename(name: &str) -> String {
    if name.ends_with(".crt") {
        name.to_string()
    } else {
        format!("{}.crt", name)
    }
}

/// Appends `.key` to a key name if it is not already present.
pub fn key_filename(name: &str) -> String {
    if name.ends_with(".key") {
        name.to_string()
    } else {
        format!("{}.key", name)
    }
}

/// Returns the base filename without its final extension.
///
/// Used to derive a bundle's name from its certificate filename.
pub fn file_base(name: &str) -> String {
    let base = name.rsplit('/').next().unwrap_or(name);
    match base.rfind('.') {
        Some(idx) if idx > 0 => base[..idx].to_string(),
        _ => base.to_string(),
    }
}

const TRUE_TOKENS: &[&str] = &["true", "t", "y", "yes", "on", "1", "True"];
const FALSE_TOKENS: &[&str] = &["false", "f", "n", "no", "off", "0", "False"];

/// Normalizes a boolean-like input value to `enabled`/`disabled`.
///
/// Accepts conventional boolean tokens (true/false/yes/no/1/0, plus the
/// Python-style `True`/`False` spellings) as well as the legacy literal
/// `enabled`/`disabled` tokens; the legacy tokens additionally yield a
/// deprecation notice. Any other value passes through as its string form.
pub fn coerce_flag(value: &Value) -> (String, Option<Deprecation>) {
    match value {
        Value::Bool(true) => ("enabled".to_string(), None),
        Value::Bool(false) => ("disabled".to_string(), None),
        Value::Number(n) if n.as_i64() == Some(1) => ("enabled".to_string(), None),
        Value::Number(n) if n.as_i64() == Some(0) => ("disabled".to_string(), None),
        Value::String(s) => coerce_flag_str(s),
        other => (other.to_string(), None),
    }
}

fn coerce_flag_str(s: &str) -> (String, Option<Deprecation>) {
    if s == "enabled" || s == "disabled" {
        return (s.to_string(), Some(legacy_flag_deprecation()));
    }
    if TRUE_TOKENS.contains(&s) {
        ("enabled".to_string(), None)
    } else if FALSE_TOKENS.contains(&s) {
        ("disabled".to_string(), None)
    } else {
        (s.to_string(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fqdn_name() {
        assert_eq!(fqdn_name("Common", "foo"), "/Common/foo");
        assert_eq!(fqdn_name("Tenant1", "foo"), "/Tenant1/foo");
        assert_eq!(fqdn_name("Common", "/Common/foo"), "/Common/foo");
        assert_eq!(fqdn_name("Common", "/Other/foo"), "/Other/foo");
    }

    #[test]
    fn test_filenames() {
        assert_eq!(cert_filename("site"), "site.crt");
        assert_eq!(cert_filename("site.crt"), "site.crt");
        assert_eq!(key_filename("site"), "site.key");
        assert_eq!(key_filename("site.key"), "site.key");
    }

    #[test]
    fn test_file_base() {
        assert_eq!(file_base("site.crt"), "site");
        assert_eq!(file_base("/Common/site.crt"), "site");
        assert_eq!(file_base("site.example.crt"), "site.example");
        assert_eq!(file_base("site"), "site");
    }

    #[test]
    fn test_coerce_flag_true_tokens() {
        for v in [json!(true), json!(1), json!("yes"), json!("true"), json!("on"), json!("1"), json!("True")] {
            let (s, dep) = coerce_flag(&v);
            assert_eq!(s, "enabled", "input {:?}", v);
            assert!(dep.is_none(), "input {:?}", v);
        }
    }

    #[test]
    fn test_coerce_flag_false_tokens() {
        for v in [json!(false), json!(0), json!("no"), json!("false"), json!("off"), json!("0"), json!("False")] {
            let (s, dep) = coerce_flag(&v);
            assert_eq!(s, "disabled", "input {:?}", v);
            assert!(dep.is_none(), "input {:?}", v);
        }
    }

    #[test]
    fn test_coerce_flag_legacy_tokens_deprecated() {
        let (s, dep) = coerce_flag(&json!("enabled"));
        assert_eq!(s, "enabled");
        assert_eq!(dep, Some(legacy_flag_deprecation()));

        let (s, dep) = coerce_flag(&json!("disabled"));
        assert_eq!(s, "disabled");
        assert!(dep.is_some());
    }

    #[test]
    fn test_coerce_flag_passthrough() {
        let (s, dep) = coerce_flag(&json!("maybe"));
        assert_eq!(s, "maybe");
        assert!(dep.is_none());
    }
}
