use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Match traffic arriving on the listed zones.
pub const FROM_ZONE: &str = "zone";
/// Match traffic arriving on the listed interfaces.
pub const FROM_INTERFACE: &str = "interface";

pub const ACTION_FORWARD: &str = "forward";
pub const ACTION_FORWARD_TO_VSYS: &str = "forward-to-vsys";
pub const ACTION_DISCARD: &str = "discard";
pub const ACTION_NO_PBF: &str = "no-pbf";

pub const NEXT_HOP_IP_ADDRESS: &str = "ip-address";
/// Only encodable from PAN-OS 9.0.
pub const NEXT_HOP_FQDN: &str = "fqdn";

/// A policy-based forwarding rule.
///
/// Empty strings, empty lists and `false` mean "not configured"; optional
/// scalars are `None` when unset. `uuid` is assigned by the device and only
/// exists from PAN-OS 9.0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Entry {
    pub name: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    /// [`FROM_ZONE`] or [`FROM_INTERFACE`].
    pub from_type: Option<String>,
    pub from_values: Vec<String>,
    pub source_addresses: Vec<String>,
    pub source_users: Vec<String>,
    pub negate_source: bool,
    pub destination_addresses: Vec<String>,
    pub negate_destination: bool,
    pub applications: Vec<String>,
    pub services: Vec<String>,
    pub schedule: Option<String>,
    pub disabled: bool,
    /// One of the `ACTION_*` constants.
    pub action: Option<String>,
    pub forward_vsys: Option<String>,
    pub forward_egress_interface: Option<String>,
    /// [`NEXT_HOP_IP_ADDRESS`] or [`NEXT_HOP_FQDN`].
    pub forward_next_hop_type: Option<String>,
    pub forward_next_hop_value: Option<String>,
    pub forward_monitor_profile: Option<String>,
    pub forward_monitor_ip_address: Option<String>,
    pub forward_monitor_disable_if_unreachable: bool,
    pub enable_enforce_symmetric_return: bool,
    pub symmetric_return_addresses: Vec<String>,
    pub active_active_device_binding: Option<String>,
    /// Firewall serial number to vsys names (empty list means all vsys).
    pub targets: BTreeMap<String, Vec<String>>,
    pub negate_target: bool,
    pub uuid: Option<Uuid>,
}

impl Entry {
    /// An otherwise empty rule with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Copies every field except `name` and the device-assigned `uuid`.
    pub fn copy(&mut self, other: &Entry) {
        let name = std::mem::take(&mut self.name);
        let uuid = self.uuid.take();
        *self = other.clone();
        self.name = name;
        self.uuid = uuid;
    }
}
