//! Container payloads carrying several entries in one write.

use serde_json::{json, Value};

/// A container element wrapping encoded entries, e.g.
/// `{"rules": {"entry": [{..}, {..}]}}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkElement {
    name: String,
    data: Vec<Value>,
}

impl BulkElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: Vec::new(),
        }
    }

    /// The container element name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the container; namespaces only learn it once the xpath is built.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn push(&mut self, entry: Value) {
        self.data.push(entry);
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The element as sent on the wire.
    ///
    /// A single entry is sent bare, to be set at the container xpath.
    pub fn config(&self) -> Value {
        if let [only] = self.data.as_slice() {
            return only.clone();
        }
        let mut root = serde_json::Map::new();
        root.insert(self.name.clone(), json!({ "entry": self.data }));
        Value::Object(root)
    }
}
