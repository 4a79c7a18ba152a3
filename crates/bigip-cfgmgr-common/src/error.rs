//! Error types for cfgmgr operations.
//!
//! This module defines the error types used throughout the cfgmgr crates.
//! All errors implement `std::error::Error` via `thiserror`.

use thiserror::Error;

/// Result type alias for cfgmgr operations.
pub type CfgMgrResult<T> = Result<T, CfgMgrError>;

/// Errors that can occur during cfgmgr operations.
#[derive(Debug, Error)]
pub enum CfgMgrError {
    /// Configuration validation error.
    #[error("Invalid configuration for {field}: {message}")]
    InvalidConfig {
        /// The field that failed validation.
        field: String,
        /// Error message.
        message: String,
    },

    /// Attempted to change a field the device treats as immutable.
    #[error("The {field} cannot be changed")]
    ImmutableField {
        /// Human-readable field description (e.g., "parent profile").
        field: String,
    },

    /// Device REST operation failed.
    #[error("Device operation failed: {operation}: {message}")]
    Device {
        /// The operation that failed (e.g., "load", "create", "login").
        operation: String,
        /// Error message from the transport or the device.
        message: String,
    },

    /// A delete was issued but the resource still exists afterwards.
    #[error("Failed to delete the {resource}.")]
    DeleteFailed {
        /// The resource kind (e.g., "profile").
        resource: String,
    },

    /// Input document could not be parsed.
    #[error("Invalid input document: {message}")]
    InvalidInput {
        /// Error message.
        message: String,
    },

    /// Internal error (unexpected state).
    #[error("Internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl CfgMgrError {
    /// Creates an invalid configuration error.
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates an immutable field error.
    pub fn immutable_field(field: impl Into<String>) -> Self {
        Self::ImmutableField {
            field: field.into(),
        }
    }

    /// Creates a device operation error.
    pub fn device(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Device {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Creates a delete verification error.
    pub fn delete_failed(resource: impl Into<String>) -> Self {
        Self::DeleteFailed {
            resource: resource.into(),
        }
    }

    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
