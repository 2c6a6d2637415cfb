//! Type-safe enumerations for result classification.
//!
//! Flags are stored as strings in saved records and report payloads; these
//! enums keep the in-memory representation closed and comparable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification of a measured value against its reference range.
///
/// A parameter with no entered value (or a value the range cannot judge)
/// carries no flag at all; that state is modeled as `Option<Flag>::None`
/// rather than a variant, so saved records never contain empty flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Flag {
    /// Numeric value below the lower bound of its interval.
    Low,
    /// Numeric value above the upper bound, or at/above a `<X` threshold.
    High,
    /// Value within range, or matching the expected qualitative token.
    Normal,
    /// Qualitative value differing from the expected token.
    Abnormal,
    /// Manually escalated result requiring immediate attention.
    /// Never produced by automatic classification.
    Critical,
}

impl Flag {
    /// Returns the canonical badge text as it appears on printed reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Flag::Low => "LOW",
            Flag::High => "HIGH",
            Flag::Normal => "NORMAL",
            Flag::Abnormal => "ABNORMAL",
            Flag::Critical => "CRITICAL",
        }
    }

    /// Returns true if this flag marks a result outside its reference range.
    pub fn is_out_of_range(&self) -> bool {
        !matches!(self, Flag::Normal)
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Flag {
    type Err = String;

    /// Parse a flag string. Handles the badge casing used in saved records
    /// as well as lowercase user input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();

        match normalized.as_str() {
            "LOW" | "L" => Ok(Flag::Low),
            "HIGH" | "H" => Ok(Flag::High),
            "NORMAL" | "N" => Ok(Flag::Normal),
            "ABNORMAL" | "A" => Ok(Flag::Abnormal),
            "CRITICAL" | "C" => Ok(Flag::Critical),
            _ => Err(format!("Unknown flag: {s}")),
        }
    }
}
