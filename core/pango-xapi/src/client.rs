//! The XML API client contract consumed by every namespace.
//!
//! Namespaces never talk to a device directly: they build xpaths and payloads
//! and hand them to an [`XapiClient`]. Session setup, authentication and
//! retries live behind this trait.

use crate::config::LogSettings;
use crate::error::{XapiError, XapiResult, ALREADY_AT_BOTTOM, ALREADY_AT_TOP};
use crate::wire::entry_names;
use pango_types::xpath::render_xpath;
use pango_types::{Movement, Placement, Version};
use serde_json::Value;
use std::fmt;
use tracing::{debug, info};

/// Which configuration a read targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Retrieval {
    /// Candidate configuration (`action=get`).
    Get,
    /// Running configuration (`action=show`).
    Show,
}

impl Retrieval {
    pub const fn as_str(self) -> &'static str {
        match self {
            Retrieval::Get => "get",
            Retrieval::Show => "show",
        }
    }
}

/// A session with a PAN-OS device or Panorama.
///
/// Every method blocks until the device answers. Implementations return the
/// `result` section of the response rendered as JSON.
pub trait XapiClient: Send + Sync {
    /// The negotiated schema version.
    fn versioning(&self) -> Version;

    /// Reads the subtree at `path`.
    fn retrieve(&self, mode: Retrieval, path: &[String], extras: Option<&Value>)
    -> XapiResult<Value>;

    /// Creates or merges `element` at `path`.
    fn set(&self, path: &[String], element: &Value, extras: Option<&Value>) -> XapiResult<Value>;

    /// Replaces the object at `path` with `element`.
    fn edit(&self, path: &[String], element: &Value, extras: Option<&Value>) -> XapiResult<Value>;

    /// Removes the object(s) selected by `path`.
    fn delete(&self, path: &[String], extras: Option<&Value>) -> XapiResult<Value>;

    /// Moves the single entry selected by `path`. `anchor` is ignored for
    /// top and bottom.
    fn move_entry(
        &self,
        path: &[String],
        placement: Placement,
        anchor: &str,
        extras: Option<&Value>,
    ) -> XapiResult<Value>;

    /// Candidate config read.
    fn get(&self, path: &[String], extras: Option<&Value>) -> XapiResult<Value> {
        self.retrieve(Retrieval::Get, path, extras)
    }

    /// Running config read.
    fn show(&self, path: &[String], extras: Option<&Value>) -> XapiResult<Value> {
        self.retrieve(Retrieval::Show, path, extras)
    }

    fn log_settings(&self) -> LogSettings {
        LogSettings::default()
    }

    fn log_action(&self, args: fmt::Arguments<'_>) {
        if self.log_settings().action {
            info!(target: "pango::action", "{}", args);
        }
    }

    fn log_query(&self, args: fmt::Arguments<'_>) {
        if self.log_settings().query {
            debug!(target: "pango::query", "{}", args);
        }
    }

    fn log_xpath(&self, path: &[String]) {
        if self.log_settings().xpath {
            debug!(target: "pango::xpath", xpath = %render_xpath(path));
        }
    }

    /// Lists the entry names of the container at `path`.
    ///
    /// A container the device does not know yet has no entries.
    fn entry_list_using(&self, mode: Retrieval, path: &[String]) -> XapiResult<Vec<String>> {
        self.log_xpath(path);
        match self.retrieve(mode, path, None) {
            Ok(raw) => entry_names(&raw),
            Err(e) if e.is_object_not_found() => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// Places the first entity of a group according to `movement`.
    ///
    /// `list` is the current order of the container. Relative movements only
    /// issue a move when the entity is not already where it should be.
    fn position_first_entity(
        &self,
        movement: Movement,
        anchor: &str,
        moving: &str,
        path: &[String],
        list: &[String],
    ) -> XapiResult<()> {
        if anchor == moving {
            return Err(XapiError::InvalidArgument(format!(
                "can't position {moving:?} in relation to itself"
            )));
        }
        if movement.is_relative() && anchor.is_empty() {
            return Err(XapiError::InvalidArgument(
                "specify reference rule for before/after moves".to_string(),
            ));
        }

        match movement {
            Movement::Skip => Ok(()),
            Movement::Top => match self.move_entry(path, Placement::Top, "", None) {
                Err(e) if !e.has_message(ALREADY_AT_TOP) => Err(e),
                _ => Ok(()),
            },
            Movement::Bottom => match self.move_entry(path, Placement::Bottom, "", None) {
                Err(e) if !e.has_message(ALREADY_AT_BOTTOM) => Err(e),
                _ => Ok(()),
            },
            Movement::Before
            | Movement::DirectlyBefore
            | Movement::After
            | Movement::DirectlyAfter => {
                let moving_idx = list.iter().position(|n| n == moving).ok_or_else(|| {
                    XapiError::NotFound(format!("entity to be moved {moving:?} does not exist"))
                })?;
                let anchor_idx = list.iter().position(|n| n == anchor).ok_or_else(|| {
                    XapiError::NotFound(format!("reference entity {anchor:?} does not exist"))
                })?;

                let placement = match movement {
                    Movement::Before if moving_idx > anchor_idx => Some(Placement::Before),
                    Movement::DirectlyBefore if moving_idx + 1 != anchor_idx => {
                        Some(Placement::Before)
                    }
                    Movement::After if moving_idx < anchor_idx => Some(Placement::After),
                    Movement::DirectlyAfter if moving_idx != anchor_idx + 1 => {
                        Some(Placement::After)
                    }
                    _ => None,
                };

                if let Some(placement) = placement {
                    self.move_entry(path, placement, anchor, None)?;
                }
                Ok(())
            }
        }
    }
}
