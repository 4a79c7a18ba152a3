//! Common infrastructure for BIG-IP configuration manager tools.
//!
//! This crate provides shared functionality for the per-resource cfgmgr
//! binaries (clientsslmgr, sysglobalmgr):
//!
//! - [`device`]: the `DeviceApi` trait and the iControl REST client
//! - [`params`]: desired-state derivation helpers (path qualification,
//!   filename suffixing, boolean-like flag coercion)
//! - [`diff`]: desired-vs-current comparison primitives
//! - [`result`]: module result and failure rendering
//! - [`error`]: error types for cfgmgr operations
//!
//! # Architecture
//!
//! Configuration managers follow this pattern:
//!
//! 1. Parse a declarative input document into desired-state parameters
//! 2. Check resource existence and load current state from the device
//! 3. Diff desired against current, honoring per-field comparison rules
//! 4. Apply the change set (create/modify/delete) unless in check mode
//! 5. Emit a structured result and revoke the session token best-effort

pub mod device;
pub mod diff;
pub mod error;
pub mod params;
pub mod result;

// Re-export commonly used items at crate root
pub use device::{resource_path, ConnectionParams, DeviceApi, RestClient};
pub use error::{CfgMgrError, CfgMgrResult};
pub use params::Deprecation;
pub use result::{failure_document, ModuleResult};
