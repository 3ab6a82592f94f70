#![allow(dead_code)]

use pango_pbf::{xpath, Entry, ACTION_FORWARD, FROM_ZONE, NEXT_HOP_IP_ADDRESS};
use pango_types::{Scope, Version, PRE_RULEBASE};
use pango_xapi::mock::MockXapi;
use serde_json::{json, Value};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn scope() -> Scope {
    Scope::device_group("dg1", PRE_RULEBASE)
}

/// The `rules` container of [`scope`].
pub fn rules() -> Vec<String> {
    let mut path = xpath::<&str>(&scope(), &[]);
    path.pop();
    path
}

pub fn entry_path(name: &str) -> Vec<String> {
    xpath(&scope(), &[name])
}

pub fn client(version: Version) -> MockXapi {
    MockXapi::new(version)
}

/// A mock holding bare rules named `names`, in order.
pub fn seeded(names: &[&str]) -> MockXapi {
    let entries: Vec<Value> = names.iter().map(|n| json!({ "@name": n })).collect();
    MockXapi::new(Version::new(10, 1, 0)).with_entries(&rules(), entries)
}

pub fn rule(name: &str) -> Entry {
    Entry::new(name)
}

/// A zone-based forwarding rule with an ip next hop.
pub fn forward_rule(name: &str) -> Entry {
    Entry {
        description: Some(format!("{name} via isp-b")),
        from_type: Some(FROM_ZONE.to_string()),
        from_values: vec!["trust".to_string()],
        source_addresses: vec!["10.1.0.0/16".to_string()],
        destination_addresses: vec!["any".to_string()],
        applications: vec!["any".to_string()],
        services: vec!["application-default".to_string()],
        action: Some(ACTION_FORWARD.to_string()),
        forward_egress_interface: Some("ethernet1/2".to_string()),
        forward_next_hop_type: Some(NEXT_HOP_IP_ADDRESS.to_string()),
        forward_next_hop_value: Some("192.0.2.1".to_string()),
        ..Entry::new(name)
    }
}
