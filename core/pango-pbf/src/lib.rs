//! Policy-based forwarding rules for Panorama.
//!
//! [`Pbf`] borrows an [`XapiClient`](pango_xapi::XapiClient) and exposes the
//! usual namespace operations (list, get, show, set, edit, delete) plus
//! grouped moves. Rules are encoded with the [`WireAdapter`] matching the
//! device's PAN-OS version, chosen once per call.
//!
//! # Example
//!
//! ```
//! use pango_pbf::{Entry, Pbf};
//! use pango_types::{Scope, PRE_RULEBASE};
//! use pango_xapi::mock::MockXapi;
//!
//! let client = MockXapi::default();
//! let pbf = Pbf::new(&client);
//! let scope = Scope::device_group("dg1", PRE_RULEBASE);
//!
//! pbf.set(&scope, &[Entry::new("to-isp-b")]).unwrap();
//! assert_eq!(pbf.get_list(&scope).unwrap(), vec!["to-isp-b"]);
//! ```

mod entry;
mod error;
mod namespace;
mod wire;

pub use entry::{
    Entry, ACTION_DISCARD, ACTION_FORWARD, ACTION_FORWARD_TO_VSYS, ACTION_NO_PBF, FROM_INTERFACE,
    FROM_ZONE, NEXT_HOP_FQDN, NEXT_HOP_IP_ADDRESS,
};
pub use error::{PbfError, PbfResult};
pub use namespace::{xpath, Pbf, Target};
pub use wire::{WireAdapter, V2_MIN_VERSION};
