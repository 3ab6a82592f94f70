//! Core type definitions for the pango XML API client.
//!
//! This crate defines the shared types every namespace depends on:
//! - [`Version`]: the negotiated PAN-OS schema version
//! - [`Location`] / [`Scope`]: which configuration subtree a call targets
//! - xpath helpers: entry selectors and rendering
//! - [`Movement`] / [`Placement`]: rule ordering requests
//!
//! Namespace-specific types (rule entries and their wire formats) belong in
//! their namespace crates, not here.

mod location;
mod movement;
mod version;
pub mod xpath;

pub use location::{Location, Scope, DEFAULT_DEVICE, DEFAULT_VSYS, POST_RULEBASE, PRE_RULEBASE, RULEBASE};
pub use movement::{Movement, Placement};
pub use version::Version;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid version: {0}")]
    InvalidVersion(String),

    #[error("invalid movement: {0}")]
    InvalidMovement(String),
}
