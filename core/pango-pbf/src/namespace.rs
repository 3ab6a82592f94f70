//! The policy-based forwarding namespace on Panorama.

use crate::entry::Entry;
use crate::error::{PbfError, PbfResult};
use crate::wire::WireAdapter;
use pango_types::xpath::as_entry_xpath;
use pango_types::{Movement, Placement, Scope};
use pango_xapi::{BulkElement, Retrieval, XapiClient};
use serde_json::Value;
use tracing::debug;

const SINGULAR: &str = "policy based forwarding rule";
const PLURAL: &str = "policy based forwarding rules";

/// Builds the xpath of the rules in `scope`.
///
/// The last segment selects `names`, or every entry when `names` is empty.
pub fn xpath<S: AsRef<str>>(scope: &Scope, names: &[S]) -> Vec<String> {
    let mut ans = scope.xpath_prefix();
    ans.reserve(3);
    ans.push("pbf".to_string());
    ans.push("rules".to_string());
    ans.push(as_entry_xpath(names));
    ans
}

/// Something that names a rule to delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Name(String),
    Entry(Entry),
}

impl Target {
    pub fn name(&self) -> &str {
        match self {
            Target::Name(name) => name,
            Target::Entry(entry) => &entry.name,
        }
    }
}

impl From<&str> for Target {
    fn from(name: &str) -> Self {
        Target::Name(name.to_string())
    }
}

impl From<String> for Target {
    fn from(name: String) -> Self {
        Target::Name(name)
    }
}

impl From<Entry> for Target {
    fn from(entry: Entry) -> Self {
        Target::Entry(entry)
    }
}

impl From<&Entry> for Target {
    fn from(entry: &Entry) -> Self {
        Target::Entry(entry.clone())
    }
}

/// A JSON string is a rule name and a JSON object is a rule.
impl TryFrom<Value> for Target {
    type Error = PbfError;

    fn try_from(value: Value) -> PbfResult<Self> {
        match value {
            Value::String(name) => Ok(Target::Name(name)),
            obj @ Value::Object(_) => serde_json::from_value(obj)
                .map(Target::Entry)
                .map_err(|e| PbfError::InvalidArgument(format!("not a {SINGULAR}: {e}"))),
            other => Err(PbfError::InvalidArgument(format!(
                "unknown type sent to delete: {other}"
            ))),
        }
    }
}

/// Policy-based forwarding rules, read and written through a borrowed client.
pub struct Pbf<'c, C: XapiClient + ?Sized> {
    con: &'c C,
}

impl<'c, C: XapiClient + ?Sized> Pbf<'c, C> {
    pub fn new(con: &'c C) -> Self {
        Self { con }
    }

    /// Rule names in the running configuration.
    pub fn show_list(&self, scope: &Scope) -> PbfResult<Vec<String>> {
        self.con.log_query(format_args!("(show) list of {PLURAL}"));
        self.list(Retrieval::Show, scope)
    }

    /// Rule names in the candidate configuration.
    pub fn get_list(&self, scope: &Scope) -> PbfResult<Vec<String>> {
        self.con.log_query(format_args!("(get) list of {PLURAL}"));
        self.list(Retrieval::Get, scope)
    }

    /// One rule from the candidate configuration.
    pub fn get(&self, scope: &Scope, name: &str) -> PbfResult<Entry> {
        self.con.log_query(format_args!("(get) {SINGULAR} {name:?}"));
        self.details(Retrieval::Get, scope, name)
    }

    /// One rule from the running configuration.
    pub fn show(&self, scope: &Scope, name: &str) -> PbfResult<Entry> {
        self.con.log_query(format_args!("(show) {SINGULAR} {name:?}"));
        self.details(Retrieval::Show, scope, name)
    }

    /// Every rule of the candidate configuration, in rulebase order.
    pub fn get_all(&self, scope: &Scope) -> PbfResult<Vec<Entry>> {
        self.con.log_query(format_args!("(get) all {PLURAL}"));
        self.all(Retrieval::Get, scope)
    }

    /// Every rule of the running configuration, in rulebase order.
    pub fn show_all(&self, scope: &Scope) -> PbfResult<Vec<Entry>> {
        self.con.log_query(format_args!("(show) all {PLURAL}"));
        self.all(Retrieval::Show, scope)
    }

    /// Creates or merges `entries` with a single request.
    ///
    /// One rule is set at the `rules` container. Several rules are wrapped in
    /// a `rules` element and set at its parent.
    pub fn set(&self, scope: &Scope, entries: &[Entry]) -> PbfResult<()> {
        if entries.is_empty() {
            return Ok(());
        }

        let adapter = self.adapter();
        let mut bulk = BulkElement::new("rules");
        let mut names = Vec::with_capacity(entries.len());
        for entry in entries {
            bulk.push(adapter.encode(entry)?);
            names.push(entry.name.as_str());
        }
        self.con.log_action(format_args!("(set) {PLURAL}: {names:?}"));

        let mut path = xpath(scope, names.as_slice());
        let selector = path.len() - 1;
        bulk.set_name(path[selector - 1].clone());
        path.truncate(if entries.len() == 1 {
            selector
        } else {
            selector - 1
        });

        self.con.log_xpath(&path);
        self.con.set(&path, &bulk.config(), None)?;
        Ok(())
    }

    /// Replaces one rule.
    pub fn edit(&self, scope: &Scope, entry: &Entry) -> PbfResult<()> {
        self.con.log_action(format_args!("(edit) {SINGULAR} {:?}", entry.name));

        let path = xpath(scope, &[entry.name.as_str()]);
        let element = self.adapter().encode(entry)?;

        self.con.log_xpath(&path);
        self.con.edit(&path, &element, None)?;
        Ok(())
    }

    /// Removes the given rules with a single request.
    pub fn delete(&self, scope: &Scope, targets: &[Target]) -> PbfResult<()> {
        if targets.is_empty() {
            return Ok(());
        }

        let names = targets
            .iter()
            .map(|t| match t.name() {
                "" => Err(PbfError::InvalidArgument(format!(
                    "cannot delete a {SINGULAR} without a name"
                ))),
                name => Ok(name),
            })
            .collect::<PbfResult<Vec<_>>>()?;
        self.con.log_action(format_args!("(delete) {PLURAL}: {names:?}"));

        let path = xpath(scope, names.as_slice());
        self.con.log_xpath(&path);
        self.con.delete(&path, None)?;
        Ok(())
    }

    /// Like [`Pbf::delete`] for loosely typed input; every value is checked
    /// before anything is sent.
    pub fn delete_values(&self, scope: &Scope, values: &[Value]) -> PbfResult<()> {
        let targets = values
            .iter()
            .cloned()
            .map(Target::try_from)
            .collect::<PbfResult<Vec<_>>>()?;
        self.delete(scope, &targets)
    }

    /// Moves a group of rules so they end up contiguous and in order.
    ///
    /// The first rule is placed according to `movement` relative to `anchor`,
    /// every following rule is moved directly after its predecessor. The
    /// first failure stops the group, possibly leaving it partially moved.
    pub fn move_group(
        &self,
        scope: &Scope,
        movement: Movement,
        anchor: &str,
        entries: &[Entry],
    ) -> PbfResult<()> {
        self.con.log_action(format_args!("(move) {SINGULAR} group"));

        let Some(first) = entries.first() else {
            return Err(PbfError::InvalidArgument(
                "grouped move requires at least one rule".to_string(),
            ));
        };

        let mut path = xpath(scope, &[first.name.as_str()]);
        let list = self.get_list(scope)?;

        self.con
            .position_first_entity(movement, anchor, &first.name, &path, &list)?;

        let last = path.len() - 1;
        for pair in entries.windows(2) {
            let (prev, cur) = (&pair[0], &pair[1]);
            path[last] = as_entry_xpath(&[cur.name.as_str()]);
            debug!(rule = %cur.name, after = %prev.name, "moving grouped rule");
            self.con
                .move_entry(&path, Placement::After, &prev.name, None)?;
        }

        Ok(())
    }

    fn adapter(&self) -> WireAdapter {
        WireAdapter::for_version(&self.con.versioning())
    }

    fn list(&self, mode: Retrieval, scope: &Scope) -> PbfResult<Vec<String>> {
        let mut path = xpath::<&str>(scope, &[]);
        path.pop();
        Ok(self.con.entry_list_using(mode, &path)?)
    }

    fn details(&self, mode: Retrieval, scope: &Scope, name: &str) -> PbfResult<Entry> {
        let path = xpath(scope, &[name]);
        let adapter = self.adapter();

        self.con.log_xpath(&path);
        let raw = self.con.retrieve(mode, &path, None)?;
        adapter
            .decode(raw)?
            .into_iter()
            .next()
            .ok_or_else(|| PbfError::NotFound(name.to_string()))
    }

    fn all(&self, mode: Retrieval, scope: &Scope) -> PbfResult<Vec<Entry>> {
        let path = xpath::<&str>(scope, &[]);
        let adapter = self.adapter();

        self.con.log_xpath(&path);
        match self.con.retrieve(mode, &path, None) {
            Ok(raw) => adapter.decode(raw),
            Err(e) if e.is_object_not_found() => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}
