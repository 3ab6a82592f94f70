use pango_xapi::BulkElement;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn empty_bulk_element() {
    let bulk = BulkElement::new("rules");
    assert!(bulk.is_empty());
    assert_eq!(bulk.config(), json!({"rules": {"entry": []}}));
}

#[test]
fn config_keeps_insertion_order() {
    let mut bulk = BulkElement::new("temp");
    bulk.push(json!({"@name": "b"}));
    bulk.push(json!({"@name": "a"}));
    bulk.set_name("rules");

    assert_eq!(bulk.name(), "rules");
    assert_eq!(bulk.len(), 2);
    assert_eq!(
        bulk.config(),
        json!({"rules": {"entry": [{"@name": "b"}, {"@name": "a"}]}})
    );
}

#[test]
fn single_entry_is_sent_bare() {
    let mut bulk = BulkElement::new("rules");
    bulk.push(json!({"@name": "only", "schedule": "nights"}));
    assert_eq!(bulk.config(), json!({"@name": "only", "schedule": "nights"}));
}
