//! Module result assembly.
//!
//! Every run emits exactly one JSON document on stdout: either a
//! [`ModuleResult`] or, on a fatal error, the failure document.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::params::Deprecation;

/// Structured result of a manager run.
///
/// Changed fields are flattened into the top-level document, rendered in
/// the caller-facing shape. Deprecation notices ride in a separate array
/// and are never part of the field payload.
#[derive(Debug, Default, Serialize)]
pub struct ModuleResult {
    /// Whether the run changed (or, in check mode, would change) the device.
    pub changed: bool,

    /// The reportable projection of the change set.
    #[serde(flatten)]
    pub changes: Map<String, Value>,

    /// Deprecation notices accumulated while deriving desired state.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub deprecations: Vec<Deprecation>,
}

impl ModuleResult {
    /// Creates a result with no changed fields.
    pub fn new(changed: bool) -> Self {
        Self {
            changed,
            ..Self::default()
        }
    }

    /// Attaches the reportable change payload.
    pub fn with_changes(mut self, changes: Map<String, Value>) -> Self {
        self.changes = changes;
        self
    }

    /// Attaches deprecation notices.
    pub fn with_deprecations(mut self, deprecations: Vec<Deprecation>) -> Self {
        self.deprecations = deprecations;
        self
    }

    /// Renders the result document.
    pub fn render(&self) -> String {
        // A struct of plain JSON-compatible fields cannot fail to serialize.
        serde_json::to_string(self).unwrap_or_else(|_| "{\"changed\":false}".to_string())
    }
}

/// Renders the failure document emitted when a run aborts.
pub fn failure_document(msg: &str) -> String {
    serde_json::to_string(&serde_json::json!({
        "failed": true,
        "msg": msg,
    }))
    .unwrap_or_else(|_| "{\"failed\":true}".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_unchanged() {
        let result = ModuleResult::new(false);
        let value: Value = serde_json::from_str(&result.render()).unwrap();
        assert_eq!(value, json!({ "changed": false }));
    }

    #[test]
    fn test_render_with_changes_and_deprecations() {
        let mut changes = Map::new();
        changes.insert("ciphers".to_string(), json!("DEFAULT"));

        let result = ModuleResult::new(true)
            .with_changes(changes)
            .with_deprecations(vec![Deprecation {
                msg: "old form".to_string(),
                version: "2.5".to_string(),
            }]);

        let value: Value = serde_json::from_str(&result.render()).unwrap();
        assert_eq!(value["changed"], json!(true));
        assert_eq!(value["ciphers"], json!("DEFAULT"));
        assert_eq!(value["deprecations"][0]["version"], json!("2.5"));
        // Notices are a side channel, not a changed field.
        assert!(value.get("msg").is_none());
    }

    #[test]
    fn test_failure_document() {
        let doc = failure_document("The parent profile cannot be changed");
        let value: Value = serde_json::from_str(&doc).unwrap();
        assert_eq!(value["failed"], json!(true));
        assert_eq!(
            value["msg"],
            json!("The parent profile cannot be changed")
        );
    }
}
