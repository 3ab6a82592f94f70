//! Rule ordering requests.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a group of rules should end up relative to an anchor rule.
///
/// The integer codes (`Skip` = 0 through `Bottom` = 6) match the values the
/// client has always accepted from configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Movement {
    /// Leave the first rule where it is.
    Skip,
    /// Anywhere before the anchor.
    Before,
    /// Immediately before the anchor.
    DirectlyBefore,
    /// Anywhere after the anchor.
    After,
    /// Immediately after the anchor.
    DirectlyAfter,
    Top,
    Bottom,
}

impl Movement {
    /// Returns true for the movements that need an anchor rule.
    #[must_use]
    pub const fn is_relative(self) -> bool {
        matches!(
            self,
            Movement::Before | Movement::DirectlyBefore | Movement::After | Movement::DirectlyAfter
        )
    }

    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Movement::Skip => 0,
            Movement::Before => 1,
            Movement::DirectlyBefore => 2,
            Movement::After => 3,
            Movement::DirectlyAfter => 4,
            Movement::Top => 5,
            Movement::Bottom => 6,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Movement::Skip => "skip",
            Movement::Before => "before",
            Movement::DirectlyBefore => "directly-before",
            Movement::After => "after",
            Movement::DirectlyAfter => "directly-after",
            Movement::Top => "top",
            Movement::Bottom => "bottom",
        }
    }
}

impl TryFrom<i32> for Movement {
    type Error = Error;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Movement::Skip),
            1 => Ok(Movement::Before),
            2 => Ok(Movement::DirectlyBefore),
            3 => Ok(Movement::After),
            4 => Ok(Movement::DirectlyAfter),
            5 => Ok(Movement::Top),
            6 => Ok(Movement::Bottom),
            other => Err(Error::InvalidMovement(format!("invalid position int given: {other}"))),
        }
    }
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `where` argument of a single move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    Top,
    Bottom,
    Before,
    After,
}

impl Placement {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Placement::Top => "top",
            Placement::Bottom => "bottom",
            Placement::Before => "before",
            Placement::After => "after",
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Placement {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Placement::Top),
            "bottom" => Ok(Placement::Bottom),
            "before" => Ok(Placement::Before),
            "after" => Ok(Placement::After),
            other => Err(Error::InvalidMovement(format!("unknown move location: {other}"))),
        }
    }
}
