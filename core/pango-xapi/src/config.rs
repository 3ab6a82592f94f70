//! Client settings, read from a TOML file such as `~/.pango/client.toml`.
//!
//! ```toml
//! version = "10.1.0"
//!
//! [logging]
//! query = true
//! xpath = true
//! ```

use crate::error::XapiResult;
use pango_types::Version;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Which categories of client activity are logged.
///
/// Defaults to actions only: queries, operational commands and raw
/// send/receive bodies are opt-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Config changes (set, edit, delete, move).
    pub action: bool,
    /// Config reads (get, show, list).
    pub query: bool,
    /// Operational commands.
    pub op: bool,
    /// The xpath of every request.
    pub xpath: bool,
    /// Request bodies.
    pub send: bool,
    /// Response bodies.
    pub receive: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            action: true,
            query: false,
            op: false,
            xpath: false,
            send: false,
            receive: false,
        }
    }
}

impl LogSettings {
    /// Nothing is logged.
    #[must_use]
    pub const fn quiet() -> Self {
        Self {
            action: false,
            query: false,
            op: false,
            xpath: false,
            send: false,
            receive: false,
        }
    }

    /// Everything is logged.
    #[must_use]
    pub const fn verbose() -> Self {
        Self {
            action: true,
            query: true,
            op: true,
            xpath: true,
            send: true,
            receive: true,
        }
    }
}

/// Connection-independent client settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    /// Forces the schema version instead of asking the device.
    pub version: Option<Version>,
    pub logging: LogSettings,
}

impl ClientSettings {
    /// Parses settings, failing on malformed input.
    pub fn from_toml_str(contents: &str) -> XapiResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Loads settings from `path`.
    /// Falls back to defaults with a warning when the file is missing or bad.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No client settings at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(settings) => {
                    info!("Loaded client settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!(
                        "Failed to parse client settings {:?}: {}. Using defaults.",
                        path, e
                    );
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read client settings {:?}: {}", path, e);
                Self::default()
            }
        }
    }
}
