//! Versioned wire forms of a policy-based forwarding rule.
//!
//! PAN-OS 9.0 moved the forward next hop into a `nexthop` object (adding FQDN
//! next hops) and started tagging rules with a `@uuid`. Everything else is
//! shared, so the two forms differ only in their `forward` element.

use crate::entry::{
    Entry, ACTION_DISCARD, ACTION_FORWARD, ACTION_FORWARD_TO_VSYS, ACTION_NO_PBF, FROM_INTERFACE,
    FROM_ZONE, NEXT_HOP_FQDN, NEXT_HOP_IP_ADDRESS,
};
use crate::error::PbfResult;
use pango_types::Version;
use pango_xapi::wire::one_or_many;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

/// First version using the [`WireAdapter::V2`] form.
pub const V2_MIN_VERSION: Version = Version::new(9, 0, 0);

const YES: &str = "yes";

/// Encodes and decodes rules for one schema version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireAdapter {
    /// Before PAN-OS 9.0.
    V1,
    /// PAN-OS 9.0 and later.
    V2,
}

impl WireAdapter {
    /// Picks the form the device speaks. The version suffix is not compared.
    #[must_use]
    pub fn for_version(version: &Version) -> Self {
        if version.gte(&V2_MIN_VERSION) {
            WireAdapter::V2
        } else {
            WireAdapter::V1
        }
    }

    /// Encodes one rule as an `entry` element.
    pub fn encode(self, entry: &Entry) -> PbfResult<Value> {
        Ok(match self {
            WireAdapter::V1 => serde_json::to_value(WireEntry::<ForwardV1>::specify(entry))?,
            WireAdapter::V2 => serde_json::to_value(WireEntry::<ForwardV2>::specify(entry))?,
        })
    }

    /// Decodes a `{"entry": [..]}` retrieval result, keeping device order.
    pub fn decode(self, raw: Value) -> PbfResult<Vec<Entry>> {
        if raw.is_null() {
            return Ok(Vec::new());
        }
        Ok(match self {
            WireAdapter::V1 => serde_json::from_value::<Container<ForwardV1>>(raw)?.normalize(),
            WireAdapter::V2 => serde_json::from_value::<Container<ForwardV2>>(raw)?.normalize(),
        })
    }
}

/// The `forward` element, the only part of a rule whose shape is versioned.
trait ForwardSpec: Sized {
    const CARRIES_UUID: bool;

    fn specify(entry: &Entry) -> Self;

    fn normalize(self, entry: &mut Entry);
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct MemberList {
    #[serde(default, deserialize_with = "one_or_many")]
    member: Vec<String>,
}

fn members(values: &[String]) -> Option<MemberList> {
    if values.is_empty() {
        return None;
    }
    Some(MemberList {
        member: values.to_vec(),
    })
}

fn unmember(list: Option<MemberList>) -> Vec<String> {
    list.map(|l| l.member).unwrap_or_default()
}

#[derive(Debug, Serialize, Deserialize)]
struct Named {
    #[serde(rename = "@name")]
    name: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct NamedList {
    #[serde(default, deserialize_with = "one_or_many")]
    entry: Vec<Named>,
}

fn named_list(names: &[String]) -> Option<NamedList> {
    if names.is_empty() {
        return None;
    }
    Some(NamedList {
        entry: names.iter().map(|n| Named { name: n.clone() }).collect(),
    })
}

fn unname(list: Option<NamedList>) -> Vec<String> {
    list.map(|l| l.entry.into_iter().map(|n| n.name).collect())
        .unwrap_or_default()
}

fn yes_no(flag: bool) -> Option<String> {
    flag.then(|| YES.to_string())
}

fn is_yes(value: Option<&str>) -> bool {
    value == Some(YES)
}

/// Marker elements such as `<discard/>`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Empty {}

#[derive(Debug, Default, Serialize, Deserialize)]
struct FromSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    zone: Option<MemberList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    interface: Option<MemberList>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct Monitor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    profile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    disable_if_unreachable: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ip_address: Option<String>,
}

impl Monitor {
    fn specify(e: &Entry) -> Option<Self> {
        if e.forward_monitor_profile.is_none()
            && e.forward_monitor_ip_address.is_none()
            && !e.forward_monitor_disable_if_unreachable
        {
            return None;
        }
        Some(Monitor {
            profile: e.forward_monitor_profile.clone(),
            disable_if_unreachable: yes_no(e.forward_monitor_disable_if_unreachable),
            ip_address: e.forward_monitor_ip_address.clone(),
        })
    }

    fn normalize(self, e: &mut Entry) {
        e.forward_monitor_profile = self.profile;
        e.forward_monitor_disable_if_unreachable = is_yes(self.disable_if_unreachable.as_deref());
        e.forward_monitor_ip_address = self.ip_address;
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ForwardV1 {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    egress_interface: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    next_hop: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    monitor: Option<Monitor>,
}

impl ForwardSpec for ForwardV1 {
    const CARRIES_UUID: bool = false;

    fn specify(e: &Entry) -> Self {
        let next_hop = match e.forward_next_hop_type.as_deref() {
            Some(NEXT_HOP_IP_ADDRESS) => e.forward_next_hop_value.clone(),
            Some(other) => {
                debug!(rule = %e.name, next_hop_type = other, "next hop type needs PAN-OS 9.0, dropped");
                None
            }
            None => None,
        };
        ForwardV1 {
            egress_interface: e.forward_egress_interface.clone(),
            next_hop,
            monitor: Monitor::specify(e),
        }
    }

    fn normalize(self, e: &mut Entry) {
        e.forward_egress_interface = self.egress_interface;
        if let Some(ip) = self.next_hop {
            e.forward_next_hop_type = Some(NEXT_HOP_IP_ADDRESS.to_string());
            e.forward_next_hop_value = Some(ip);
        }
        if let Some(monitor) = self.monitor {
            monitor.normalize(e);
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct NextHopV2 {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fqdn: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ForwardV2 {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    egress_interface: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    nexthop: Option<NextHopV2>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    monitor: Option<Monitor>,
}

impl ForwardSpec for ForwardV2 {
    const CARRIES_UUID: bool = true;

    fn specify(e: &Entry) -> Self {
        let value = e.forward_next_hop_value.clone();
        let nexthop = match e.forward_next_hop_type.as_deref() {
            Some(NEXT_HOP_IP_ADDRESS) => Some(NextHopV2 {
                ip_address: value,
                fqdn: None,
            }),
            Some(NEXT_HOP_FQDN) => Some(NextHopV2 {
                ip_address: None,
                fqdn: value,
            }),
            _ => None,
        };
        ForwardV2 {
            egress_interface: e.forward_egress_interface.clone(),
            nexthop,
            monitor: Monitor::specify(e),
        }
    }

    fn normalize(self, e: &mut Entry) {
        e.forward_egress_interface = self.egress_interface;
        match self.nexthop {
            Some(NextHopV2 {
                ip_address: Some(ip),
                ..
            }) => {
                e.forward_next_hop_type = Some(NEXT_HOP_IP_ADDRESS.to_string());
                e.forward_next_hop_value = Some(ip);
            }
            Some(NextHopV2 {
                fqdn: Some(fqdn), ..
            }) => {
                e.forward_next_hop_type = Some(NEXT_HOP_FQDN.to_string());
                e.forward_next_hop_value = Some(fqdn);
            }
            _ => {}
        }
        if let Some(monitor) = self.monitor {
            monitor.normalize(e);
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", bound(deserialize = "F: Deserialize<'de>"))]
struct ActionSpec<F> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    forward: Option<F>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    forward_to_vsys: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    discard: Option<Empty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    no_pbf: Option<Empty>,
}

impl<F> ActionSpec<F> {
    fn empty() -> Self {
        Self {
            forward: None,
            forward_to_vsys: None,
            discard: None,
            no_pbf: None,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct SymmetricReturn {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    enabled: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    nexthop_address_list: Option<NamedList>,
}

#[derive(Debug, Serialize, Deserialize)]
struct DeviceTarget {
    #[serde(rename = "@name")]
    serial: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    vsys: Option<NamedList>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct DeviceList {
    #[serde(default, deserialize_with = "one_or_many")]
    entry: Vec<DeviceTarget>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct TargetSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    devices: Option<DeviceList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    negate: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", bound(deserialize = "F: Deserialize<'de>"))]
struct WireEntry<F> {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@uuid", default, skip_serializing_if = "Option::is_none")]
    uuid: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tag: Option<MemberList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    from: Option<FromSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source: Option<MemberList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source_user: Option<MemberList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    negate_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    destination: Option<MemberList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    negate_destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    application: Option<MemberList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    service: Option<MemberList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    schedule: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    disabled: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    action: Option<ActionSpec<F>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    enforce_symmetric_return: Option<SymmetricReturn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    active_active_device_binding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target: Option<TargetSpec>,
}

impl<F: ForwardSpec> WireEntry<F> {
    fn specify(e: &Entry) -> Self {
        let from = match e.from_type.as_deref() {
            Some(FROM_ZONE) => Some(FromSpec {
                zone: members(&e.from_values),
                interface: None,
            }),
            Some(FROM_INTERFACE) => Some(FromSpec {
                zone: None,
                interface: members(&e.from_values),
            }),
            _ => None,
        };

        let action = match e.action.as_deref() {
            Some(ACTION_FORWARD) => Some(ActionSpec {
                forward: Some(F::specify(e)),
                ..ActionSpec::empty()
            }),
            Some(ACTION_FORWARD_TO_VSYS) => Some(ActionSpec {
                forward_to_vsys: e.forward_vsys.clone(),
                ..ActionSpec::empty()
            }),
            Some(ACTION_DISCARD) => Some(ActionSpec {
                discard: Some(Empty {}),
                ..ActionSpec::empty()
            }),
            Some(ACTION_NO_PBF) => Some(ActionSpec {
                no_pbf: Some(Empty {}),
                ..ActionSpec::empty()
            }),
            _ => None,
        };

        let enforce_symmetric_return =
            if e.enable_enforce_symmetric_return || !e.symmetric_return_addresses.is_empty() {
                Some(SymmetricReturn {
                    enabled: yes_no(e.enable_enforce_symmetric_return),
                    nexthop_address_list: named_list(&e.symmetric_return_addresses),
                })
            } else {
                None
            };

        let target = if e.targets.is_empty() && !e.negate_target {
            None
        } else {
            let devices = (!e.targets.is_empty()).then(|| DeviceList {
                entry: e
                    .targets
                    .iter()
                    .map(|(serial, vsys)| DeviceTarget {
                        serial: serial.clone(),
                        vsys: named_list(vsys),
                    })
                    .collect(),
            });
            Some(TargetSpec {
                devices,
                negate: yes_no(e.negate_target),
            })
        };

        WireEntry {
            name: e.name.clone(),
            uuid: if F::CARRIES_UUID { e.uuid } else { None },
            description: e.description.clone(),
            tag: members(&e.tags),
            from,
            source: members(&e.source_addresses),
            source_user: members(&e.source_users),
            negate_source: yes_no(e.negate_source),
            destination: members(&e.destination_addresses),
            negate_destination: yes_no(e.negate_destination),
            application: members(&e.applications),
            service: members(&e.services),
            schedule: e.schedule.clone(),
            disabled: yes_no(e.disabled),
            action,
            enforce_symmetric_return,
            active_active_device_binding: e.active_active_device_binding.clone(),
            target,
        }
    }

    fn normalize(self) -> Entry {
        let mut e = Entry {
            name: self.name,
            uuid: if F::CARRIES_UUID { self.uuid } else { None },
            description: self.description,
            tags: unmember(self.tag),
            source_addresses: unmember(self.source),
            source_users: unmember(self.source_user),
            negate_source: is_yes(self.negate_source.as_deref()),
            destination_addresses: unmember(self.destination),
            negate_destination: is_yes(self.negate_destination.as_deref()),
            applications: unmember(self.application),
            services: unmember(self.service),
            schedule: self.schedule,
            disabled: is_yes(self.disabled.as_deref()),
            active_active_device_binding: self.active_active_device_binding,
            ..Entry::default()
        };

        if let Some(from) = self.from {
            if let Some(zone) = from.zone {
                e.from_type = Some(FROM_ZONE.to_string());
                e.from_values = zone.member;
            } else if let Some(interface) = from.interface {
                e.from_type = Some(FROM_INTERFACE.to_string());
                e.from_values = interface.member;
            }
        }

        if let Some(action) = self.action {
            if let Some(forward) = action.forward {
                e.action = Some(ACTION_FORWARD.to_string());
                forward.normalize(&mut e);
            } else if let Some(vsys) = action.forward_to_vsys {
                e.action = Some(ACTION_FORWARD_TO_VSYS.to_string());
                e.forward_vsys = Some(vsys);
            } else if action.discard.is_some() {
                e.action = Some(ACTION_DISCARD.to_string());
            } else if action.no_pbf.is_some() {
                e.action = Some(ACTION_NO_PBF.to_string());
            }
        }

        if let Some(esr) = self.enforce_symmetric_return {
            e.enable_enforce_symmetric_return = is_yes(esr.enabled.as_deref());
            e.symmetric_return_addresses = unname(esr.nexthop_address_list);
        }

        if let Some(target) = self.target {
            e.negate_target = is_yes(target.negate.as_deref());
            if let Some(devices) = target.devices {
                e.targets = devices
                    .entry
                    .into_iter()
                    .map(|d| (d.serial, unname(d.vsys)))
                    .collect();
            }
        }

        e
    }
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "F: Deserialize<'de>"))]
struct Container<F> {
    #[serde(default, deserialize_with = "one_or_many")]
    entry: Vec<WireEntry<F>>,
}

impl<F: ForwardSpec> Container<F> {
    fn normalize(self) -> Vec<Entry> {
        self.entry.into_iter().map(WireEntry::normalize).collect()
    }
}
