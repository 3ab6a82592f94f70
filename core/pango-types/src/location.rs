//! Configuration tree scopes.
//!
//! A [`Scope`] pairs the tree-scope identifier ([`Location`]) with the base
//! location (the rulebase) a namespace hangs its objects under.

use crate::xpath::as_entry_xpath;
use serde::{Deserialize, Serialize};

/// The device entry every local configuration lives under.
pub const DEFAULT_DEVICE: &str = "localhost.localdomain";

/// The vsys used when a firewall location leaves it empty.
pub const DEFAULT_VSYS: &str = "vsys1";

/// Panorama pre-rules.
pub const PRE_RULEBASE: &str = "pre-rulebase";

/// Panorama post-rules.
pub const POST_RULEBASE: &str = "post-rulebase";

/// The firewall rulebase.
pub const RULEBASE: &str = "rulebase";

/// Which subtree of the configuration a call addresses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// `/config/shared`.
    Shared,
    /// A Panorama device group.
    DeviceGroup(String),
    /// A firewall virtual system.
    Vsys(String),
}

impl Location {
    /// A device group location; an empty name means shared.
    pub fn device_group(dg: impl Into<String>) -> Self {
        let dg = dg.into();
        if dg.is_empty() {
            Self::Shared
        } else {
            Self::DeviceGroup(dg)
        }
    }

    /// A vsys location; an empty name means `vsys1`.
    pub fn vsys(vsys: impl Into<String>) -> Self {
        let vsys = vsys.into();
        if vsys.is_empty() {
            Self::Vsys(DEFAULT_VSYS.to_string())
        } else {
            Self::Vsys(vsys)
        }
    }

    /// The xpath segments leading to this location.
    #[must_use]
    pub fn xpath_prefix(&self) -> Vec<String> {
        match self {
            Location::Shared => vec!["config".to_string(), "shared".to_string()],
            Location::DeviceGroup(dg) => vec![
                "config".to_string(),
                "devices".to_string(),
                as_entry_xpath(&[DEFAULT_DEVICE]),
                "device-group".to_string(),
                as_entry_xpath(&[dg.as_str()]),
            ],
            Location::Vsys(vsys) => vec![
                "config".to_string(),
                "devices".to_string(),
                as_entry_xpath(&[DEFAULT_DEVICE]),
                "vsys".to_string(),
                as_entry_xpath(&[vsys.as_str()]),
            ],
        }
    }
}

/// A `(location, base)` pair selecting the rulebase a call works on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scope {
    pub location: Location,
    pub base: String,
}

impl Scope {
    pub fn new(location: Location, base: impl Into<String>) -> Self {
        Self {
            location,
            base: base.into(),
        }
    }

    /// A Panorama scope; `base` is usually [`PRE_RULEBASE`] or [`POST_RULEBASE`].
    pub fn device_group(dg: impl Into<String>, base: impl Into<String>) -> Self {
        Self::new(Location::device_group(dg), base)
    }

    /// A firewall scope under [`RULEBASE`].
    pub fn vsys(vsys: impl Into<String>) -> Self {
        Self::new(Location::vsys(vsys), RULEBASE)
    }

    /// Location prefix followed by the base segment.
    #[must_use]
    pub fn xpath_prefix(&self) -> Vec<String> {
        let mut ans = self.location.xpath_prefix();
        ans.push(self.base.clone());
        ans
    }
}
