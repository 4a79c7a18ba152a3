//! REST endpoint and field name constants for clientsslmgr

use bigip_cfgmgr_common::resource_path;

/// Client SSL profile collection URI
pub const PROFILE_COLLECTION_URI: &str = "/mgmt/tm/ltm/profile/client-ssl";

/// Returns the URI of a single client SSL profile.
pub fn profile_uri(partition: &str, name: &str) -> String {
    format!("{}/{}", PROFILE_COLLECTION_URI, resource_path(partition, name))
}

/// Device-side (API) field names
pub mod api_fields {
    pub const NAME: &str = "name";
    pub const PARTITION: &str = "partition";
    pub const CIPHERS: &str = "ciphers";
    pub const CERT_KEY_CHAIN: &str = "certKeyChain";
    pub const OCSP_STAPLING: &str = "ocspStapling";
    pub const DEFAULTS_FROM: &str = "defaultsFrom";
}

/// Caller-facing (canonical) field names
pub mod fields {
    pub const CIPHERS: &str = "ciphers";
    pub const OCSP_STAPLING: &str = "ocsp_stapling";
}

/// Default values
pub mod defaults {
    /// Default parent profile
    pub const PARENT: &str = "/Common/clientssl";

    /// Default partition
    pub const PARTITION: &str = "Common";

    /// Cipher list injected when creating a profile without one
    pub const CIPHERS: &str = "DEFAULT";

    /// Literal used for an absent certificate chain
    pub const NO_CHAIN: &str = "none";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_uri() {
        assert_eq!(
            profile_uri("Common", "my_profile"),
            "/mgmt/tm/ltm/profile/client-ssl/~Common~my_profile"
        );
    }
}
