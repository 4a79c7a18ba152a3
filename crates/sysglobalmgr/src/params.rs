//! Desired-state derivation, current-state normalization and diffing for
//! system global settings.

use serde::Deserialize;
use serde_json::{Map, Value};

use bigip_cfgmgr_common::diff::diff_field;
use bigip_cfgmgr_common::params::{coerce_flag, Deprecation};
use bigip_cfgmgr_common::{CfgMgrError, CfgMgrResult};

use crate::endpoints::{api_fields, fields};
use crate::types::ModuleInput;

/// Desired-state view, derived once from the input document.
///
/// Boolean-like flags are normalized to `enabled`/`disabled`; the banner
/// text and console timeout pass through as declared.
#[derive(Debug, Clone, Default)]
pub struct ModuleParams {
    pub security_banner: Option<String>,
    pub banner_text: Option<String>,
    pub gui_setup: Option<String>,
    pub lcd_display: Option<String>,
    pub mgmt_dhcp: Option<String>,
    pub net_reboot: Option<String>,
    pub quiet_boot: Option<String>,
    pub console_timeout: Option<u32>,
}

impl ModuleParams {
    /// Derives the desired-state view, accumulating deprecation notices.
    pub fn from_input(input: &ModuleInput) -> (Self, Vec<Deprecation>) {
        let mut deprecations = Vec::new();
        let mut flag = |raw: &Option<Value>| {
            raw.as_ref().map(|value| {
                let (normalized, deprecation) = coerce_flag(value);
                deprecations.extend(deprecation);
                normalized
            })
        };

        let params = Self {
            security_banner: flag(&input.security_banner),
            gui_setup: flag(&input.gui_setup),
            lcd_display: flag(&input.lcd_display),
            mgmt_dhcp: flag(&input.mgmt_dhcp),
            net_reboot: flag(&input.net_reboot),
            quiet_boot: flag(&input.quiet_boot),
            banner_text: input.banner_text.clone(),
            console_timeout: input.console_timeout,
        };
        (params, deprecations)
    }

    /// Device-facing payload of every declared field, using API names.
    ///
    /// The device applies the full desired payload on update; the diff only
    /// decides whether an update is needed at all.
    pub fn api_params(&self) -> Map<String, Value> {
        let mut map = Map::new();
        insert_str(&mut map, api_fields::SECURITY_BANNER, &self.security_banner);
        insert_str(&mut map, api_fields::BANNER_TEXT, &self.banner_text);
        insert_str(&mut map, api_fields::GUI_SETUP, &self.gui_setup);
        insert_str(&mut map, api_fields::LCD_DISPLAY, &self.lcd_display);
        insert_str(&mut map, api_fields::MGMT_DHCP, &self.mgmt_dhcp);
        insert_str(&mut map, api_fields::NET_REBOOT, &self.net_reboot);
        insert_str(&mut map, api_fields::QUIET_BOOT, &self.quiet_boot);
        if let Some(timeout) = self.console_timeout {
            map.insert(api_fields::CONSOLE_TIMEOUT.to_string(), Value::from(timeout));
        }
        map
    }
}

fn insert_str(map: &mut Map<String, Value>, field: &str, value: &Option<String>) {
    if let Some(value) = value {
        map.insert(field.to_string(), Value::String(value.clone()));
    }
}

/// Current-state view, normalized from the device response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiParams {
    #[serde(rename = "guiSecurityBanner")]
    pub security_banner: Option<String>,
    #[serde(rename = "guiSecurityBannerText")]
    pub banner_text: Option<String>,
    #[serde(rename = "guiSetup")]
    pub gui_setup: Option<String>,
    #[serde(rename = "lcdDisplay")]
    pub lcd_display: Option<String>,
    #[serde(rename = "mgmtDhcp")]
    pub mgmt_dhcp: Option<String>,
    #[serde(rename = "netReboot")]
    pub net_reboot: Option<String>,
    #[serde(rename = "quietBoot")]
    pub quiet_boot: Option<String>,
    #[serde(rename = "consoleInactivityTimeout")]
    pub console_timeout: Option<u32>,
}

impl ApiParams {
    /// Normalizes a raw device response into the canonical field shape.
    pub fn from_device(value: Value) -> CfgMgrResult<Self> {
        serde_json::from_value(value).map_err(|e| CfgMgrError::device("load", e.to_string()))
    }
}

/// The change set: fields whose desired value differs from current.
#[derive(Debug, Clone, Default)]
pub struct Changes {
    pub security_banner: Option<String>,
    pub banner_text: Option<String>,
    pub gui_setup: Option<String>,
    pub lcd_display: Option<String>,
    pub mgmt_dhcp: Option<String>,
    pub net_reboot: Option<String>,
    pub quiet_boot: Option<String>,
    pub console_timeout: Option<u32>,
}

impl Changes {
    pub fn is_empty(&self) -> bool {
        self.security_banner.is_none()
            && self.banner_text.is_none()
            && self.gui_setup.is_none()
            && self.lcd_display.is_none()
            && self.mgmt_dhcp.is_none()
            && self.net_reboot.is_none()
            && self.quiet_boot.is_none()
            && self.console_timeout.is_none()
    }

    /// Caller-facing reportable projection, in canonical field names.
    pub fn to_return(&self) -> Map<String, Value> {
        let mut map = Map::new();
        insert_str(&mut map, fields::SECURITY_BANNER, &self.security_banner);
        insert_str(&mut map, fields::BANNER_TEXT, &self.banner_text);
        insert_str(&mut map, fields::GUI_SETUP, &self.gui_setup);
        insert_str(&mut map, fields::LCD_DISPLAY, &self.lcd_display);
        insert_str(&mut map, fields::MGMT_DHCP, &self.mgmt_dhcp);
        insert_str(&mut map, fields::NET_REBOOT, &self.net_reboot);
        insert_str(&mut map, fields::QUIET_BOOT, &self.quiet_boot);
        if let Some(timeout) = self.console_timeout {
            map.insert(fields::CONSOLE_TIMEOUT.to_string(), Value::from(timeout));
        }
        map
    }
}

/// Compares desired against current state. Every field uses the default
/// equality rule; nothing here is immutable.
pub fn diff(want: &ModuleParams, have: &ApiParams) -> Changes {
    Changes {
        security_banner: diff_field(want.security_banner.as_ref(), have.security_banner.as_ref()),
        banner_text: diff_field(want.banner_text.as_ref(), have.banner_text.as_ref()),
        gui_setup: diff_field(want.gui_setup.as_ref(), have.gui_setup.as_ref()),
        lcd_display: diff_field(want.lcd_display.as_ref(), have.lcd_display.as_ref()),
        mgmt_dhcp: diff_field(want.mgmt_dhcp.as_ref(), have.mgmt_dhcp.as_ref()),
        net_reboot: diff_field(want.net_reboot.as_ref(), have.net_reboot.as_ref()),
        quiet_boot: diff_field(want.quiet_boot.as_ref(), have.quiet_boot.as_ref()),
        console_timeout: diff_field(want.console_timeout.as_ref(), have.console_timeout.as_ref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn input(doc: &str) -> ModuleInput {
        let base = "server: lb.example.com\nuser: admin\npassword: secret\n";
        serde_yaml::from_str(&format!("{}{}", base, doc)).unwrap()
    }

    #[test]
    fn test_flag_normalization() {
        let (want, deprecations) =
            ModuleParams::from_input(&input("gui_setup: true\nquiet_boot: \"no\"\n"));
        assert_eq!(want.gui_setup.as_deref(), Some("enabled"));
        assert_eq!(want.quiet_boot.as_deref(), Some("disabled"));
        assert!(deprecations.is_empty());
    }

    #[test]
    fn test_legacy_flags_deprecated_once_each() {
        let (want, deprecations) =
            ModuleParams::from_input(&input("gui_setup: enabled\nlcd_display: disabled\n"));
        assert_eq!(want.gui_setup.as_deref(), Some("enabled"));
        assert_eq!(want.lcd_display.as_deref(), Some("disabled"));
        assert_eq!(deprecations.len(), 2);
    }

    #[test]
    fn test_banner_text_is_not_coerced() {
        let (want, deprecations) = ModuleParams::from_input(&input("banner_text: \"yes\"\n"));
        assert_eq!(want.banner_text.as_deref(), Some("yes"));
        assert!(deprecations.is_empty());
    }

    #[test]
    fn test_api_params_payload() {
        let (want, _) = ModuleParams::from_input(&input(
            "gui_setup: false\nbanner_text: Authorized use only\nconsole_timeout: 600\n",
        ));
        let payload = want.api_params();
        assert_eq!(payload["guiSetup"], json!("disabled"));
        assert_eq!(payload["guiSecurityBannerText"], json!("Authorized use only"));
        assert_eq!(payload["consoleInactivityTimeout"], json!(600));
        assert!(!payload.contains_key("lcdDisplay"));
    }

    #[test]
    fn test_api_params_from_device() {
        let have = ApiParams::from_device(json!({
            "kind": "tm:sys:global-settings:global-settingsstate",
            "guiSetup": "enabled",
            "mgmtDhcp": "enabled",
            "consoleInactivityTimeout": 0,
        }))
        .unwrap();
        assert_eq!(have.gui_setup.as_deref(), Some("enabled"));
        assert_eq!(have.console_timeout, Some(0));
        assert!(have.banner_text.is_none());
    }

    #[test]
    fn test_diff_reports_only_differences() {
        let (want, _) = ModuleParams::from_input(&input(
            "gui_setup: false\nmgmt_dhcp: true\nconsole_timeout: 600\n",
        ));
        let have = ApiParams::from_device(json!({
            "guiSetup": "enabled",
            "mgmtDhcp": "enabled",
            "consoleInactivityTimeout": 0,
        }))
        .unwrap();

        let changes = diff(&want, &have);
        assert_eq!(changes.gui_setup.as_deref(), Some("disabled"));
        assert!(changes.mgmt_dhcp.is_none());
        assert_eq!(changes.console_timeout, Some(600));
    }

    #[test]
    fn test_diff_unset_fields_never_change() {
        let (want, _) = ModuleParams::from_input(&input(""));
        let have = ApiParams::from_device(json!({
            "guiSetup": "enabled",
            "quietBoot": "enabled",
        }))
        .unwrap();
        assert!(diff(&want, &have).is_empty());
    }

    #[test]
    fn test_reportable_projection() {
        let changes = Changes {
            gui_setup: Some("disabled".to_string()),
            console_timeout: Some(600),
            ..Changes::default()
        };
        let reportable = changes.to_return();
        assert_eq!(reportable["gui_setup"], json!("disabled"));
        assert_eq!(reportable["console_timeout"], json!(600));
        assert_eq!(reportable.len(), 2);
    }
}
