mod common;

use common::{entry_path, forward_rule, init_tracing, rule, rules, scope, seeded};
use pango_pbf::{xpath, Entry, Pbf, PbfError, Target, NEXT_HOP_FQDN};
use pango_types::{Placement, Scope, Version, RULEBASE};
use pango_xapi::mock::{CallKind, MockXapi, XapiCall};
use pango_xapi::{Retrieval, XapiClient, XapiError, XapiResult, CODE_OBJECT_NOT_FOUND};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

// ── xpath ────────────────────────────────────────────────────────

#[test]
fn xpath_selects_a_single_rule() {
    let path = xpath(&scope(), &["r1"]);
    assert_eq!(
        path,
        vec![
            "config",
            "devices",
            "entry[@name='localhost.localdomain']",
            "device-group",
            "entry[@name='dg1']",
            "pre-rulebase",
            "pbf",
            "rules",
            "entry[@name='r1']",
        ]
    );
}

#[test]
fn xpath_keeps_name_order() {
    let path = xpath(&scope(), &["b", "a"]);
    assert_eq!(path.last().unwrap(), "entry[@name='b' or @name='a']");
}

#[test]
fn xpath_without_names_selects_every_rule() {
    let path = xpath::<&str>(&scope(), &[]);
    assert_eq!(path.last().unwrap(), "entry");
    assert_eq!(path.len(), 9);
}

#[test]
fn xpath_for_shared_and_vsys() {
    let shared = xpath(&Scope::device_group("", RULEBASE), &["r"]);
    assert_eq!(shared, vec!["config", "shared", "rulebase", "pbf", "rules", "entry[@name='r']"]);

    let vsys = xpath(&Scope::vsys(""), &["r"]);
    assert_eq!(vsys[3], "vsys");
    assert_eq!(vsys[4], "entry[@name='vsys1']");
}

// ── lists ────────────────────────────────────────────────────────

#[test]
fn get_list_returns_candidate_order() {
    let client = seeded(&["c", "a", "b"]);
    let pbf = Pbf::new(&client);

    assert_eq!(pbf.get_list(&scope()).unwrap(), vec!["c", "a", "b"]);
    assert_eq!(client.calls(), vec![XapiCall::Get { path: rules() }]);
}

#[test]
fn show_list_reads_running_config() {
    let client = seeded(&["a"]);
    let pbf = Pbf::new(&client);
    pbf.set(&scope(), &[rule("b")]).unwrap();

    assert_eq!(pbf.show_list(&scope()).unwrap(), vec!["a"]);
    client.commit();
    assert_eq!(pbf.show_list(&scope()).unwrap(), vec!["a", "b"]);
}

#[test]
fn list_of_unknown_rulebase_is_empty() {
    let client = MockXapi::default();
    let pbf = Pbf::new(&client);
    assert!(pbf.get_list(&scope()).unwrap().is_empty());
    assert!(pbf.show_list(&scope()).unwrap().is_empty());
}

// ── set ──────────────────────────────────────────────────────────

#[test]
fn set_nothing_sends_nothing() {
    let client = MockXapi::default();
    Pbf::new(&client).set(&scope(), &[]).unwrap();
    assert!(client.calls().is_empty());
}

#[test]
fn set_one_rule_targets_rules_container() {
    init_tracing();
    let client = MockXapi::default();
    Pbf::new(&client).set(&scope(), &[rule("r1")]).unwrap();

    assert_eq!(
        client.calls(),
        vec![XapiCall::Set {
            path: rules(),
            element: json!({"@name": "r1"}),
        }]
    );
}

#[test]
fn set_many_rules_in_one_request() {
    let client = MockXapi::default();
    Pbf::new(&client)
        .set(&scope(), &[rule("r1"), rule("r2")])
        .unwrap();

    let mut parent = rules();
    parent.pop();
    assert_eq!(
        client.calls(),
        vec![XapiCall::Set {
            path: parent,
            element: json!({"rules": {"entry": [{"@name": "r1"}, {"@name": "r2"}]}}),
        }]
    );
    assert_eq!(client.names(&rules()), vec!["r1", "r2"]);
}

#[test]
fn set_drops_one_more_segment_for_bulk_writes() {
    let single = MockXapi::default();
    Pbf::new(&single).set(&scope(), &[rule("a")]).unwrap();
    let bulk = MockXapi::default();
    Pbf::new(&bulk).set(&scope(), &[rule("a"), rule("b")]).unwrap();

    let single_path = single.calls()[0].path().to_vec();
    let bulk_path = bulk.calls()[0].path().to_vec();
    assert_eq!(single_path.len(), bulk_path.len() + 1);
    assert_eq!(single_path.last().unwrap(), "rules");
    assert_eq!(bulk_path.last().unwrap(), "pbf");
}

#[test]
fn set_failure_fails_the_whole_batch() {
    let client = MockXapi::default();
    client.fail_nth(CallKind::Set, 1, XapiError::Transport("connection reset".to_string()));

    let err = Pbf::new(&client)
        .set(&scope(), &[rule("a"), rule("b")])
        .unwrap_err();
    assert!(matches!(err, PbfError::Xapi(XapiError::Transport(ref m)) if m == "connection reset"));
    assert!(client.names(&rules()).is_empty());
}

// ── pre-9.0 devices ──────────────────────────────────────────────

fn fqdn_rule(name: &str) -> Entry {
    Entry {
        forward_next_hop_type: Some(NEXT_HOP_FQDN.to_string()),
        forward_next_hop_value: Some("gw.example.net".to_string()),
        ..forward_rule(name)
    }
}

fn with_uuid(entry: Entry) -> Entry {
    Entry {
        uuid: Some(Uuid::new_v4()),
        ..entry
    }
}

fn set_element(client: &MockXapi) -> Value {
    let calls = client.calls_of(CallKind::Set);
    assert_eq!(calls.len(), 1);
    match &calls[0] {
        XapiCall::Set { element, .. } => element.clone(),
        other => panic!("expected a set, got {other:?}"),
    }
}

#[test]
fn set_on_eight_one_encodes_every_rule_as_v1() {
    let client = MockXapi::new(Version::new(8, 1, 0));
    Pbf::new(&client)
        .set(&scope(), &[with_uuid(forward_rule("a")), with_uuid(fqdn_rule("b"))])
        .unwrap();

    let element = set_element(&client);
    let entries = element["rules"]["entry"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(
        entries[0]["action"]["forward"],
        json!({"egress-interface": "ethernet1/2", "next-hop": "192.0.2.1"})
    );
    assert_eq!(entries[1]["action"]["forward"], json!({"egress-interface": "ethernet1/2"}));
    for entry in entries {
        assert!(entry.get("@uuid").is_none());
        assert!(entry["action"]["forward"].get("nexthop").is_none());
    }
}

#[test]
fn set_on_nine_oh_encodes_every_rule_as_v2() {
    let client = MockXapi::new(Version::new(9, 0, 0));
    Pbf::new(&client)
        .set(&scope(), &[with_uuid(forward_rule("a")), with_uuid(fqdn_rule("b"))])
        .unwrap();

    let element = set_element(&client);
    let entries = element["rules"]["entry"].as_array().unwrap();
    assert_eq!(entries[0]["action"]["forward"]["nexthop"], json!({"ip-address": "192.0.2.1"}));
    assert_eq!(entries[1]["action"]["forward"]["nexthop"], json!({"fqdn": "gw.example.net"}));
    for entry in entries {
        assert!(entry["@uuid"].is_string());
        assert!(entry["action"]["forward"].get("next-hop").is_none());
    }
}

#[test]
fn edit_on_eight_one_sends_v1() {
    let client = MockXapi::new(Version::new(8, 1, 0));
    let pbf = Pbf::new(&client);
    pbf.set(&scope(), &[rule("a")]).unwrap();
    pbf.edit(&scope(), &with_uuid(forward_rule("a"))).unwrap();

    let edits = client.calls_of(CallKind::Edit);
    let XapiCall::Edit { path, element } = &edits[0] else {
        panic!("expected an edit, got {edits:?}");
    };
    assert_eq!(path, &entry_path("a"));
    assert!(element.get("@uuid").is_none());
    assert_eq!(element["action"]["forward"]["next-hop"], json!("192.0.2.1"));
}

#[test]
fn get_on_eight_one_round_trips_through_v1() {
    let client = MockXapi::new(Version::new(8, 1, 0));
    let pbf = Pbf::new(&client);
    pbf.set(&scope(), &[with_uuid(forward_rule("a")), fqdn_rule("b")])
        .unwrap();

    assert_eq!(pbf.get(&scope(), "a").unwrap(), forward_rule("a"));

    let b = pbf.get(&scope(), "b").unwrap();
    assert_eq!(b.forward_next_hop_type, None);
    assert_eq!(b.forward_next_hop_value, None);
    assert_eq!(b.forward_egress_interface.as_deref(), Some("ethernet1/2"));
}

// ── get / show ───────────────────────────────────────────────────

#[test]
fn set_then_get_returns_the_rule() {
    let client = MockXapi::new(Version::new(10, 0, 0));
    let pbf = Pbf::new(&client);
    let wanted = forward_rule("to-isp-b");

    pbf.set(&scope(), &[wanted.clone()]).unwrap();
    let got = pbf.get(&scope(), "to-isp-b").unwrap();

    assert_eq!(got, wanted);
    assert_eq!(
        client.calls_of(CallKind::Get),
        vec![XapiCall::Get {
            path: entry_path("to-isp-b")
        }]
    );
}

#[test]
fn show_needs_a_commit() {
    let client = MockXapi::default();
    let pbf = Pbf::new(&client);
    pbf.set(&scope(), &[forward_rule("r1")]).unwrap();

    let err = pbf.show(&scope(), "r1").unwrap_err();
    assert!(err.is_not_found());

    client.commit();
    assert_eq!(pbf.show(&scope(), "r1").unwrap(), forward_rule("r1"));
}

#[test]
fn get_missing_rule_propagates_device_error() {
    let client = seeded(&["a"]);
    let err = Pbf::new(&client).get(&scope(), "zzz").unwrap_err();
    assert!(matches!(
        err,
        PbfError::Xapi(XapiError::Api {
            code: CODE_OBJECT_NOT_FOUND,
            ..
        })
    ));
}

#[test]
fn get_transport_error_is_not_rewrapped() {
    let client = seeded(&["a"]);
    client.fail_nth(CallKind::Get, 1, XapiError::Transport("timed out".to_string()));

    let err = Pbf::new(&client).get(&scope(), "a").unwrap_err();
    assert_eq!(err.to_string(), "transport error: timed out");
}

/// Answers every read with an empty container.
struct EmptyDevice;

impl XapiClient for EmptyDevice {
    fn versioning(&self) -> Version {
        Version::new(9, 1, 0)
    }

    fn retrieve(&self, _: Retrieval, _: &[String], _: Option<&Value>) -> XapiResult<Value> {
        Ok(json!({"entry": []}))
    }

    fn set(&self, _: &[String], _: &Value, _: Option<&Value>) -> XapiResult<Value> {
        Ok(Value::Null)
    }

    fn edit(&self, _: &[String], _: &Value, _: Option<&Value>) -> XapiResult<Value> {
        Ok(Value::Null)
    }

    fn delete(&self, _: &[String], _: Option<&Value>) -> XapiResult<Value> {
        Ok(Value::Null)
    }

    fn move_entry(
        &self,
        _: &[String],
        _: Placement,
        _: &str,
        _: Option<&Value>,
    ) -> XapiResult<Value> {
        Ok(Value::Null)
    }
}

#[test]
fn get_without_entries_is_not_found() {
    let device = EmptyDevice;
    let err = Pbf::new(&device).get(&scope(), "ghost").unwrap_err();
    assert!(matches!(err, PbfError::NotFound(ref name) if name == "ghost"));
}

#[test]
fn facade_works_over_trait_objects() {
    let device: Box<dyn XapiClient> = Box::new(EmptyDevice);
    let pbf = Pbf::new(device.as_ref());
    assert!(pbf.get_all(&scope()).unwrap().is_empty());
}

#[test]
fn get_all_keeps_rulebase_order() {
    let client = MockXapi::default();
    let pbf = Pbf::new(&client);
    pbf.set(&scope(), &[forward_rule("b"), rule("a")]).unwrap();

    let all = pbf.get_all(&scope()).unwrap();
    assert_eq!(all, vec![forward_rule("b"), rule("a")]);
    assert!(pbf.show_all(&scope()).unwrap().is_empty());
}

// ── edit ─────────────────────────────────────────────────────────

#[test]
fn edit_replaces_the_rule() {
    let client = MockXapi::default();
    let pbf = Pbf::new(&client);
    pbf.set(&scope(), &[forward_rule("r1")]).unwrap();

    let replacement = Entry {
        disabled: true,
        ..rule("r1")
    };
    pbf.edit(&scope(), &replacement).unwrap();

    assert_eq!(
        client.calls_of(CallKind::Edit),
        vec![XapiCall::Edit {
            path: entry_path("r1"),
            element: json!({"@name": "r1", "disabled": "yes"}),
        }]
    );
    assert_eq!(pbf.get(&scope(), "r1").unwrap(), replacement);
}

// ── delete ───────────────────────────────────────────────────────

#[test]
fn delete_nothing_sends_nothing() {
    let client = seeded(&["a"]);
    Pbf::new(&client).delete(&scope(), &[]).unwrap();
    Pbf::new(&client).delete_values(&scope(), &[]).unwrap();
    assert!(client.calls().is_empty());
}

#[test]
fn delete_names_and_rules_in_one_request() {
    let client = seeded(&["a", "b", "c"]);
    let targets = [Target::from("a"), Target::from(rule("c"))];
    Pbf::new(&client).delete(&scope(), &targets).unwrap();

    assert_eq!(
        client.calls(),
        vec![XapiCall::Delete {
            path: xpath(&scope(), &["a", "c"])
        }]
    );
    assert_eq!(client.names(&rules()), vec!["b"]);
}

#[test]
fn delete_values_accepts_names_and_objects() {
    let client = seeded(&["a", "b", "c"]);
    Pbf::new(&client)
        .delete_values(&scope(), &[json!("a"), json!({"name": "b"})])
        .unwrap();
    assert_eq!(client.names(&rules()), vec!["c"]);
}

#[test]
fn delete_values_rejects_other_types_before_sending() {
    let client = seeded(&["a", "b"]);
    let err = Pbf::new(&client)
        .delete_values(&scope(), &[json!("a"), json!({"name": "b"}), json!(42)])
        .unwrap_err();

    assert!(matches!(err, PbfError::InvalidArgument(_)));
    assert!(client.calls().is_empty());
    assert_eq!(client.names(&rules()), vec!["a", "b"]);
}

#[test]
fn delete_values_rejects_objects_that_are_not_rules() {
    let client = seeded(&["a"]);
    let err = Pbf::new(&client)
        .delete_values(&scope(), &[json!({"name": 5})])
        .unwrap_err();

    assert!(matches!(err, PbfError::InvalidArgument(_)));
    assert!(client.calls().is_empty());
}

#[test]
fn delete_rejects_unnamed_rule() {
    let client = seeded(&["a"]);
    let err = Pbf::new(&client)
        .delete(&scope(), &[Target::from("a"), Target::from(Entry::default())])
        .unwrap_err();
    assert!(matches!(err, PbfError::InvalidArgument(_)));
    assert!(client.calls().is_empty());
}
