//! Error types for the policy-based forwarding namespace.

use pango_xapi::XapiError;
use thiserror::Error;

/// Result type for namespace operations.
pub type PbfResult<T> = Result<T, PbfError>;

#[derive(Debug, Error)]
pub enum PbfError {
    /// Rejected before anything was sent to the device.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The device answered but returned no such rule.
    #[error("policy based forwarding rule not found: {0}")]
    NotFound(String),

    /// A rule could not be converted to or from its wire form.
    #[error("wire format error: {0}")]
    Wire(#[from] serde_json::Error),

    #[error(transparent)]
    Xapi(#[from] XapiError),
}

impl PbfError {
    /// Returns true if the rule (or its container) does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            PbfError::NotFound(_) => true,
            PbfError::Xapi(e) => e.is_object_not_found(),
            _ => false,
        }
    }
}
