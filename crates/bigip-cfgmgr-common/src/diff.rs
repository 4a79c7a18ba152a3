//! Desired-vs-current comparison primitives.
//!
//! The difference engine in each manager is an explicit enumeration of
//! fields: most use [`diff_field`], immutable fields go through
//! [`ensure_same`], and complex list fields flatten both sides into
//! (field, value) pairs and use [`pairs_subset`].

use std::collections::HashSet;

use crate::error::{CfgMgrError, CfgMgrResult};

/// Default comparison rule for a single field.
///
/// Returns the desired value when the current side lacks the field or holds
/// a different value. An unset desired value never produces a change.
pub fn diff_field<T: PartialEq + Clone>(want: Option<&T>, have: Option<&T>) -> Option<T> {
    let want = want?;
    match have {
        Some(have) if have == want => None,
        _ => Some(want.clone()),
    }
}

/// Enforces that a field is identical between desired and current state.
///
/// An unset desired value is accepted; anything else must match the current
/// value exactly or the run is aborted before any device write.
pub fn ensure_same(field: &str, want: Option<&str>, have: Option<&str>) -> CfgMgrResult<()> {
    match (want, have) {
        (None, _) => Ok(()),
        (Some(w), Some(h)) if w == h => Ok(()),
        _ => Err(CfgMgrError::immutable_field(field)),
    }
}

/// Returns true if every (field, value) pair in `want` also occurs in `have`.
///
/// Used for complex list fields: when the desired entries, flattened, are a
/// subset of what the device already reports, there is nothing to write.
pub fn pairs_subset(want: &[(String, String)], have: &[(String, String)]) -> bool {
    let have: HashSet<(&str, &str)> = have
        .iter()
        .map(|(f, v)| (f.as_str(), v.as_str()))
        .collect();
    want.iter().all(|(f, v)| have.contains(&(f.as_str(), v.as_str())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(f, v)| (f.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_diff_field_unset_want() {
        assert_eq!(diff_field::<String>(None, Some(&"x".to_string())), None);
        assert_eq!(diff_field::<String>(None, None), None);
    }

    #[test]
    fn test_diff_field_missing_have() {
        let want = "DEFAULT".to_string();
        assert_eq!(diff_field(Some(&want), None), Some(want.clone()));
    }

    #[test]
    fn test_diff_field_equal_and_different() {
        let a = "a".to_string();
        let b = "b".to_string();
        assert_eq!(diff_field(Some(&a), Some(&a)), None);
        assert_eq!(diff_field(Some(&a), Some(&b)), Some(a.clone()));
    }

    #[test]
    fn test_diff_field_numeric() {
        assert_eq!(diff_field(Some(&600u32), Some(&600u32)), None);
        assert_eq!(diff_field(Some(&600u32), Some(&300u32)), Some(600));
    }

    #[test]
    fn test_ensure_same() {
        assert!(ensure_same("parent profile", None, Some("/Common/x")).is_ok());
        assert!(ensure_same("parent profile", Some("/Common/x"), Some("/Common/x")).is_ok());

        let err = ensure_same("parent profile", Some("/Common/clientssl"), Some("/Common/other"))
            .unwrap_err();
        assert_eq!(err.to_string(), "The parent profile cannot be changed");

        // A device response without the field counts as a difference.
        assert!(ensure_same("parent profile", Some("/Common/x"), None).is_err());
    }

    #[test]
    fn test_pairs_subset() {
        let want = pairs(&[("cert", "/Common/a.crt"), ("key", "/Common/a.key")]);
        let have = pairs(&[
            ("name", "a"),
            ("cert", "/Common/a.crt"),
            ("key", "/Common/a.key"),
            ("chain", "none"),
        ]);
        assert!(pairs_subset(&want, &have));
        assert!(!pairs_subset(&have, &want));
        assert!(pairs_subset(&[], &have));
        assert!(pairs_subset(&[], &[]));
    }
}
