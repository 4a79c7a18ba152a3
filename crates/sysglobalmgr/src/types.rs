//! Type definitions for sysglobalmgr

use serde::Deserialize;
use serde_json::Value;

use bigip_cfgmgr_common::ConnectionParams;

/// Desired lifecycle state.
///
/// Global settings are a singleton that always exists; the only supported
/// state is `present`. Declaring anything else is rejected at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    #[default]
    Present,
}

/// The declarative input document for one sysglobalmgr run.
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleInput {
    /// Device endpoint and credentials.
    #[serde(flatten)]
    pub connection: ConnectionParams,

    /// Desired lifecycle state (`present` only).
    #[serde(default)]
    pub state: State,

    /// Compute the change set without applying it.
    #[serde(default)]
    pub check_mode: bool,

    /// Display an advisory message on the login screen, boolean-like.
    pub security_banner: Option<Value>,

    /// Text of the advisory banner.
    pub banner_text: Option<String>,

    /// Enable the Setup utility in the configuration GUI, boolean-like.
    pub gui_setup: Option<Value>,

    /// Show the system menu on the front-panel LCD, boolean-like.
    pub lcd_display: Option<Value>,

    /// DHCP on the management interface, boolean-like.
    pub mgmt_dhcp: Option<Value>,

    /// Boot from a network ISO on next reboot, boolean-like.
    pub net_reboot: Option<Value>,

    /// Suppress console output during boot, boolean-like.
    pub quiet_boot: Option<Value>,

    /// Seconds of inactivity before a console logout.
    pub console_timeout: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_defaults() {
        let input: ModuleInput = serde_yaml::from_str(
            "server: lb.example.com\nuser: admin\npassword: secret\n",
        )
        .unwrap();
        assert_eq!(input.state, State::Present);
        assert!(!input.check_mode);
        assert!(input.gui_setup.is_none());
        assert!(input.console_timeout.is_none());
    }

    #[test]
    fn test_absent_state_rejected() {
        let err = serde_yaml::from_str::<ModuleInput>(
            "server: lb.example.com\nuser: admin\npassword: secret\nstate: absent\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("absent"));
    }
}
