//! # clientsslmgr - Client SSL Profile Configuration Manager
//!
//! Reconciles a declared client SSL profile against a BIG-IP device over
//! iControl REST.
//!
//! ## Responsibilities
//! - Desired-state derivation from a declarative input document
//!   (path qualification, cert/key suffixing, bundle assembly)
//! - Existence check, current-state load and per-field diffing
//! - Create / modify / delete with check-mode short-circuiting
//! - Structured JSON result with reportable changes and deprecations
//!
//! ## Key behaviors
//! - The parent profile is immutable; a difference is a fatal error
//! - Cert/key/chain bundle management is additive-only and compares
//!   order-independently
//! - New profiles without a declared cipher list get `DEFAULT`

pub mod client_ssl_mgr;
pub mod endpoints;
pub mod params;
pub mod types;

pub use client_ssl_mgr::ClientSslMgr;
pub use types::{CertKeyChain, CertKeyChainInput, ModuleInput, State};
