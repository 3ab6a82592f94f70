//! Helpers for the JSON rendering of XML API bodies.
//!
//! Entries carry their key in an `@name` attribute and list-valued elements
//! may arrive either as an array or, for a single item, as a bare object.

use crate::error::XapiResult;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Key holding an entry's name.
pub const ENTRY_NAME_KEY: &str = "@name";

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

/// Deserializes a list that may be collapsed to a single item or be absent.
pub fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Option::<OneOrMany<T>>::deserialize(deserializer)? {
        Some(OneOrMany::Many(items)) => items,
        Some(OneOrMany::One(item)) => vec![item],
        None => Vec::new(),
    })
}

/// The name of an encoded entry, if it carries one.
pub fn entry_name(entry: &Value) -> Option<&str> {
    entry.get(ENTRY_NAME_KEY).and_then(Value::as_str)
}

#[derive(Deserialize)]
struct NamedEntry {
    #[serde(rename = "@name")]
    name: String,
}

#[derive(Deserialize)]
struct EntryList {
    #[serde(default, deserialize_with = "one_or_many")]
    entry: Vec<NamedEntry>,
}

/// Extracts the entry names from a `{"entry": [..]}` retrieval result.
pub fn entry_names(raw: &Value) -> XapiResult<Vec<String>> {
    if raw.is_null() {
        return Ok(Vec::new());
    }
    let list: EntryList = serde_json::from_value(raw.clone())?;
    Ok(list.entry.into_iter().map(|e| e.name).collect())
}
