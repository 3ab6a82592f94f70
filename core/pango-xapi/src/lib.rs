//! XML API client contract for pango namespaces.
//!
//! Namespaces (policy-based forwarding, security rules, ...) are written
//! against the [`XapiClient`] trait and never hold a session themselves:
//! the client is passed in as a read-only dependency, which keeps every
//! namespace testable against [`mock::MockXapi`].
//!
//! # Example
//!
//! ```
//! use pango_types::Version;
//! use pango_xapi::mock::MockXapi;
//! use pango_xapi::XapiClient;
//!
//! let client = MockXapi::new(Version::new(9, 1, 0));
//! assert!(client.versioning().gte(&Version::new(9, 0, 0)));
//! ```

mod bulk;
mod client;
mod config;
mod error;
pub mod mock;
pub mod wire;

pub use bulk::BulkElement;
pub use client::{Retrieval, XapiClient};
pub use config::{ClientSettings, LogSettings};
pub use error::{
    XapiError, XapiResult, ALREADY_AT_BOTTOM, ALREADY_AT_TOP, CODE_INVALID_OBJECT,
    CODE_OBJECT_NOT_FOUND,
};
