//! REST endpoint and field name constants for sysglobalmgr

/// System global settings singleton URI
pub const GLOBAL_SETTINGS_URI: &str = "/mgmt/tm/sys/global-settings";

/// Device-side (API) field names
pub mod api_fields {
    pub const SECURITY_BANNER: &str = "guiSecurityBanner";
    pub const BANNER_TEXT: &str = "guiSecurityBannerText";
    pub const GUI_SETUP: &str = "guiSetup";
    pub const LCD_DISPLAY: &str = "lcdDisplay";
    pub const MGMT_DHCP: &str = "mgmtDhcp";
    pub const NET_REBOOT: &str = "netReboot";
    pub const QUIET_BOOT: &str = "quietBoot";
    pub const CONSOLE_TIMEOUT: &str = "consoleInactivityTimeout";
}

/// Caller-facing (canonical) field names
pub mod fields {
    pub const SECURITY_BANNER: &str = "security_banner";
    pub const BANNER_TEXT: &str = "banner_text";
    pub const GUI_SETUP: &str = "gui_setup";
    pub const LCD_DISPLAY: &str = "lcd_display";
    pub const MGMT_DHCP: &str = "mgmt_dhcp";
    pub const NET_REBOOT: &str = "net_reboot";
    pub const QUIET_BOOT: &str = "quiet_boot";
    pub const CONSOLE_TIMEOUT: &str = "console_timeout";
}
