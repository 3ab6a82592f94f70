//! An in-memory XML API for testing namespaces without a device.
//!
//! [`MockXapi`] keeps an ordered list of entries per container xpath (for the
//! candidate and the running configuration), applies set / edit / delete /
//! move the way the device does, records every call, and can be told to fail
//! a given call.

use crate::client::{Retrieval, XapiClient};
use crate::config::{ClientSettings, LogSettings};
use crate::error::{
    XapiError, XapiResult, ALREADY_AT_BOTTOM, ALREADY_AT_TOP, CODE_INVALID_OBJECT,
    CODE_OBJECT_NOT_FOUND,
};
use crate::wire::{entry_name, ENTRY_NAME_KEY};
use pango_types::xpath::{parse_entry_xpath, render_xpath};
use pango_types::{Placement, Version};
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Schema version reported when none is configured.
pub const DEFAULT_MOCK_VERSION: Version = Version::new(10, 1, 0);

/// The kind of a recorded call, used to target injected failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    Get,
    Show,
    Set,
    Edit,
    Delete,
    Move,
}

/// A call received by the mock, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum XapiCall {
    Get { path: Vec<String> },
    Show { path: Vec<String> },
    Set { path: Vec<String>, element: Value },
    Edit { path: Vec<String>, element: Value },
    Delete { path: Vec<String> },
    Move {
        path: Vec<String>,
        placement: Placement,
        anchor: String,
    },
}

impl XapiCall {
    pub fn kind(&self) -> CallKind {
        match self {
            XapiCall::Get { .. } => CallKind::Get,
            XapiCall::Show { .. } => CallKind::Show,
            XapiCall::Set { .. } => CallKind::Set,
            XapiCall::Edit { .. } => CallKind::Edit,
            XapiCall::Delete { .. } => CallKind::Delete,
            XapiCall::Move { .. } => CallKind::Move,
        }
    }

    pub fn path(&self) -> &[String] {
        match self {
            XapiCall::Get { path }
            | XapiCall::Show { path }
            | XapiCall::Set { path, .. }
            | XapiCall::Edit { path, .. }
            | XapiCall::Delete { path }
            | XapiCall::Move { path, .. } => path,
        }
    }
}

struct Failure {
    kind: CallKind,
    nth: usize,
    error: Option<XapiError>,
}

#[derive(Default)]
struct MockState {
    candidate: BTreeMap<String, Vec<Value>>,
    running: BTreeMap<String, Vec<Value>>,
    calls: Vec<XapiCall>,
    counts: HashMap<CallKind, usize>,
    failures: Vec<Failure>,
}

impl MockState {
    /// Records the call and returns the injected failure for it, if any.
    fn record(&mut self, call: XapiCall) -> XapiResult<()> {
        let kind = call.kind();
        self.calls.push(call);
        let count = self.counts.entry(kind).or_insert(0);
        *count += 1;
        let nth = *count;

        for failure in &mut self.failures {
            if failure.kind == kind && failure.nth == nth {
                if let Some(error) = failure.error.take() {
                    return Err(error);
                }
            }
        }
        Ok(())
    }
}

/// In-memory XML API.
pub struct MockXapi {
    version: Version,
    log: LogSettings,
    state: Mutex<MockState>,
}

impl MockXapi {
    /// Creates an empty configuration reporting `version`.
    pub fn new(version: Version) -> Self {
        Self {
            version,
            log: LogSettings::default(),
            state: Mutex::new(MockState::default()),
        }
    }

    /// Creates a mock honouring the version override and log settings.
    pub fn from_settings(settings: &ClientSettings) -> Self {
        let version = settings.version.clone().unwrap_or(DEFAULT_MOCK_VERSION);
        Self::new(version).with_log_settings(settings.logging)
    }

    pub fn with_log_settings(mut self, log: LogSettings) -> Self {
        self.log = log;
        self
    }

    /// Seeds a container in both the candidate and the running config.
    pub fn with_entries(self, container: &[String], entries: Vec<Value>) -> Self {
        {
            let mut state = self.state();
            let key = render_xpath(container);
            state.candidate.insert(key.clone(), entries.clone());
            state.running.insert(key, entries);
        }
        self
    }

    /// Fails the `nth` (1-based) call of `kind` with `error`, once.
    pub fn fail_nth(&self, kind: CallKind, nth: usize, error: XapiError) {
        self.state().failures.push(Failure {
            kind,
            nth,
            error: Some(error),
        });
    }

    /// Candidate entries of a container.
    pub fn entries(&self, container: &[String]) -> Vec<Value> {
        self.state()
            .candidate
            .get(&render_xpath(container))
            .cloned()
            .unwrap_or_default()
    }

    /// Candidate entry names of a container, in order.
    pub fn names(&self, container: &[String]) -> Vec<String> {
        self.entries(container)
            .iter()
            .filter_map(entry_name)
            .map(str::to_string)
            .collect()
    }

    /// Copies the candidate configuration to the running configuration.
    pub fn commit(&self) {
        let mut state = self.state();
        state.running = state.candidate.clone();
    }

    /// Every call received so far.
    pub fn calls(&self) -> Vec<XapiCall> {
        self.state().calls.clone()
    }

    /// Calls of one kind, in order.
    pub fn calls_of(&self, kind: CallKind) -> Vec<XapiCall> {
        self.state()
            .calls
            .iter()
            .filter(|c| c.kind() == kind)
            .cloned()
            .collect()
    }

    pub fn clear_calls(&self) {
        let mut state = self.state();
        state.calls.clear();
        state.counts.clear();
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn trace_send(&self, action: &str, path: &[String], body: Option<&Value>) {
        if self.log.send {
            debug!(target: "pango::send", action, xpath = %render_xpath(path), body = ?body);
        }
    }
}

impl Default for MockXapi {
    fn default() -> Self {
        Self::new(DEFAULT_MOCK_VERSION)
    }
}

/// Splits an xpath into its container key and the names its selector picks.
/// A path without a trailing selector addresses the whole container.
fn split_selector(path: &[String]) -> XapiResult<(String, Option<Vec<String>>)> {
    let (last, container) = path
        .split_last()
        .ok_or_else(|| XapiError::InvalidArgument("empty xpath".to_string()))?;
    Ok(match parse_entry_xpath(last) {
        Some(names) => (render_xpath(container), Some(names)),
        None => (render_xpath(path), None),
    })
}

/// Splits an xpath that must select exactly one entry.
fn split_single(path: &[String]) -> XapiResult<(String, String)> {
    match split_selector(path)? {
        (key, Some(mut names)) if names.len() == 1 => Ok((key, names.remove(0))),
        _ => Err(XapiError::InvalidArgument(format!(
            "xpath must select exactly one entry: {}",
            render_xpath(path)
        ))),
    }
}

fn position_of(entries: &[Value], name: &str) -> Option<usize> {
    entries.iter().position(|e| entry_name(e) == Some(name))
}

/// Set semantics: merge top-level fields into an existing entry, else append.
fn upsert(entries: &mut Vec<Value>, entry: Value) -> XapiResult<()> {
    let name = entry_name(&entry)
        .ok_or_else(|| XapiError::api(CODE_INVALID_OBJECT, "entry is missing @name"))?
        .to_string();
    match position_of(entries, &name) {
        Some(idx) => {
            if let (Some(existing), Value::Object(fields)) = (entries[idx].as_object_mut(), entry)
            {
                for (key, value) in fields {
                    existing.insert(key, value);
                }
            }
        }
        None => entries.push(entry),
    }
    Ok(())
}

fn as_list(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.clone(),
        Value::Null => Vec::new(),
        other => vec![other.clone()],
    }
}

impl XapiClient for MockXapi {
    fn versioning(&self) -> Version {
        self.version.clone()
    }

    fn log_settings(&self) -> LogSettings {
        self.log
    }

    fn retrieve(
        &self,
        mode: Retrieval,
        path: &[String],
        _extras: Option<&Value>,
    ) -> XapiResult<Value> {
        let mut state = self.state();
        state.record(match mode {
            Retrieval::Get => XapiCall::Get {
                path: path.to_vec(),
            },
            Retrieval::Show => XapiCall::Show {
                path: path.to_vec(),
            },
        })?;
        self.trace_send(mode.as_str(), path, None);

        let (key, names) = split_selector(path)?;
        let config = match mode {
            Retrieval::Get => &state.candidate,
            Retrieval::Show => &state.running,
        };
        let entries = config
            .get(&key)
            .ok_or_else(|| XapiError::api(CODE_OBJECT_NOT_FOUND, "No such node"))?;

        let selected: Vec<Value> = match names {
            Some(names) if !names.is_empty() => {
                let picked: Vec<Value> = entries
                    .iter()
                    .filter(|e| entry_name(e).is_some_and(|n| names.iter().any(|w| w == n)))
                    .cloned()
                    .collect();
                if picked.is_empty() {
                    return Err(XapiError::api(CODE_OBJECT_NOT_FOUND, "No such node"));
                }
                picked
            }
            _ => entries.clone(),
        };

        let ans = json!({ "entry": selected });
        if self.log.receive {
            debug!(target: "pango::receive", body = %ans);
        }
        Ok(ans)
    }

    fn set(&self, path: &[String], element: &Value, _extras: Option<&Value>) -> XapiResult<Value> {
        let mut state = self.state();
        state.record(XapiCall::Set {
            path: path.to_vec(),
            element: element.clone(),
        })?;
        self.trace_send("set", path, Some(element));

        let (key, names) = split_selector(path)?;
        let (key, incoming) = match names {
            Some(_) => (key, vec![element.clone()]),
            None if entry_name(element).is_some() => (key, vec![element.clone()]),
            None => {
                let fields = element.as_object().filter(|o| o.len() == 1).ok_or_else(|| {
                    XapiError::api(CODE_INVALID_OBJECT, "set element must have a single root")
                })?;
                let (child, body) = fields.iter().next().ok_or_else(|| {
                    XapiError::api(CODE_INVALID_OBJECT, "set element must have a single root")
                })?;
                let mut container = path.to_vec();
                container.push(child.clone());
                let items = body.get("entry").map(as_list).unwrap_or_default();
                (render_xpath(&container), items)
            }
        };

        let entries = state.candidate.entry(key).or_default();
        for entry in incoming {
            upsert(entries, entry)?;
        }
        Ok(json!({}))
    }

    fn edit(&self, path: &[String], element: &Value, _extras: Option<&Value>) -> XapiResult<Value> {
        let mut state = self.state();
        state.record(XapiCall::Edit {
            path: path.to_vec(),
            element: element.clone(),
        })?;
        self.trace_send("edit", path, Some(element));

        let (key, name) = split_single(path)?;
        if entry_name(element) != Some(name.as_str()) {
            return Err(XapiError::api(
                CODE_INVALID_OBJECT,
                format!("edit breaks config validity: {ENTRY_NAME_KEY} must be {name:?}"),
            ));
        }

        let entries = state.candidate.entry(key).or_default();
        match position_of(entries, &name) {
            Some(idx) => entries[idx] = element.clone(),
            None => entries.push(element.clone()),
        }
        Ok(json!({}))
    }

    fn delete(&self, path: &[String], _extras: Option<&Value>) -> XapiResult<Value> {
        let mut state = self.state();
        state.record(XapiCall::Delete {
            path: path.to_vec(),
        })?;
        self.trace_send("delete", path, None);

        let (key, names) = split_selector(path)?;
        match names {
            Some(names) if !names.is_empty() => {
                if let Some(entries) = state.candidate.get_mut(&key) {
                    entries.retain(|e| entry_name(e).is_none_or(|n| !names.iter().any(|w| w == n)));
                }
            }
            _ => {
                state.candidate.remove(&key);
            }
        }
        Ok(json!({}))
    }

    fn move_entry(
        &self,
        path: &[String],
        placement: Placement,
        anchor: &str,
        _extras: Option<&Value>,
    ) -> XapiResult<Value> {
        let mut state = self.state();
        state.record(XapiCall::Move {
            path: path.to_vec(),
            placement,
            anchor: anchor.to_string(),
        })?;
        self.trace_send(placement.as_str(), path, None);

        let (key, name) = split_single(path)?;
        let entries = state
            .candidate
            .get_mut(&key)
            .ok_or_else(|| XapiError::api(CODE_OBJECT_NOT_FOUND, "No such node"))?;
        let idx = position_of(entries, &name)
            .ok_or_else(|| XapiError::api(CODE_OBJECT_NOT_FOUND, "No such node"))?;

        match placement {
            Placement::Top if idx == 0 => {
                return Err(XapiError::api(CODE_INVALID_OBJECT, ALREADY_AT_TOP));
            }
            Placement::Bottom if idx + 1 == entries.len() => {
                return Err(XapiError::api(CODE_INVALID_OBJECT, ALREADY_AT_BOTTOM));
            }
            Placement::Top => {
                let entry = entries.remove(idx);
                entries.insert(0, entry);
            }
            Placement::Bottom => {
                let entry = entries.remove(idx);
                entries.push(entry);
            }
            Placement::Before | Placement::After => {
                if anchor == name {
                    return Err(XapiError::api(
                        CODE_INVALID_OBJECT,
                        "cannot move an entry relative to itself",
                    ));
                }
                if position_of(entries, anchor).is_none() {
                    return Err(XapiError::api(
                        CODE_OBJECT_NOT_FOUND,
                        format!("reference entry {anchor:?} not found"),
                    ));
                }
                let entry = entries.remove(idx);
                let anchor_idx = position_of(entries, anchor).unwrap_or(entries.len());
                let at = if placement == Placement::Before {
                    anchor_idx
                } else {
                    anchor_idx + 1
                };
                entries.insert(at, entry);
            }
        }
        Ok(json!({}))
    }
}
