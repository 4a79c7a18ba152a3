//! # sysglobalmgr - System Global Settings Configuration Manager
//!
//! Reconciles declared BIG-IP system global settings (GUI setup, advisory
//! banner, LCD display, management DHCP, boot behavior, console timeout)
//! against the device over iControl REST.
//!
//! Global settings are a singleton resource: the only lifecycle state is
//! `present`, and reconciliation is always load → diff → modify.

pub mod endpoints;
pub mod params;
pub mod sys_global_mgr;
pub mod types;

pub use sys_global_mgr::SysGlobalMgr;
pub use types::{ModuleInput, State};
