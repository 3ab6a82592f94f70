//! Error types for the XML API layer.

use thiserror::Error;

/// Result type for XML API operations.
pub type XapiResult<T> = Result<T, XapiError>;

/// PAN-OS response code for "object not present".
pub const CODE_OBJECT_NOT_FOUND: u32 = 7;

/// Errors that can occur talking to the XML API.
#[derive(Debug, Error)]
pub enum XapiError {
    /// The device rejected the request.
    #[error("api error {code}: {message}")]
    Api { code: u32, message: String },

    /// The request never got a usable response.
    #[error("transport error: {0}")]
    Transport(String),

    /// Response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Caller passed something the client cannot act on.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A named object is missing.
    #[error("not found: {0}")]
    NotFound(String),

    /// Client settings could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

impl XapiError {
    /// Shorthand for a device-side error.
    pub fn api(code: u32, message: impl Into<String>) -> Self {
        Self::Api {
            code,
            message: message.into(),
        }
    }

    /// Returns true if the error means the addressed object does not exist.
    pub fn is_object_not_found(&self) -> bool {
        matches!(
            self,
            XapiError::NotFound(_)
                | XapiError::Api {
                    code: CODE_OBJECT_NOT_FOUND,
                    ..
                }
        )
    }

    /// Returns true if the device reported this exact message.
    pub fn has_message(&self, expected: &str) -> bool {
        matches!(self, XapiError::Api { message, .. } if message == expected)
    }
}

/// PAN-OS response code for an object the request cannot be applied to.
pub const CODE_INVALID_OBJECT: u32 = 12;

/// Device message when moving the first entry to the top.
pub const ALREADY_AT_TOP: &str = "already at the top";

/// Device message when moving the last entry to the bottom.
pub const ALREADY_AT_BOTTOM: &str = "already at the bottom";
