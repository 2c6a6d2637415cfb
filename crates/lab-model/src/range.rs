//! Reference-range grammar.
//!
//! Range strings come from catalog files, custom templates, and hand edits
//! in the result entry form, in one of four forms:
//!
//! - `"min-max"` — closed numeric interval, both bounds inclusive
//! - `"<X"` — upper-bound-only threshold
//! - `">X"` — lower-bound-only threshold
//! - a literal token (e.g. `"Negative"`) for qualitative parameters
//!
//! Parsing is total: anything outside the grammar yields `None`, and the
//! evaluator treats the parameter as unevaluable rather than failing the
//! form submission.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A parsed reference-range specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RangeSpec {
    /// `"min-max"`: values inside the closed interval are normal.
    Interval { min: f64, max: f64 },
    /// `"<X"`: values at or above the threshold are high.
    Below { limit: f64 },
    /// `">X"`: values at or below the threshold are low.
    Above { limit: f64 },
    /// Literal expected token for qualitative parameters.
    Text(String),
}

impl RangeSpec {
    /// Parse a range string into its typed form.
    ///
    /// Returns `None` when the string is empty or uses a recognized prefix
    /// with an unparseable bound (`"<abc"`, `"1.2-"`). A string with no
    /// recognized numeric structure is a qualitative token, not an error.
    pub fn parse(raw: &str) -> Option<RangeSpec> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }
        if let Some(rest) = text.strip_prefix('<') {
            let limit = parse_bound(rest)?;
            return Some(RangeSpec::Below { limit });
        }
        if let Some(rest) = text.strip_prefix('>') {
            let limit = parse_bound(rest)?;
            return Some(RangeSpec::Above { limit });
        }
        if text.contains('-') {
            if let Some((lo, hi)) = text.split_once('-')
                && let (Some(min), Some(max)) = (parse_bound(lo), parse_bound(hi))
            {
                return Some(RangeSpec::Interval { min, max });
            }
            // A dash with digits around it is a broken interval; a dash in a
            // word ("Non-reactive") is part of a qualitative token.
            if text.contains(|ch: char| ch.is_ascii_digit()) {
                return None;
            }
        }
        Some(RangeSpec::Text(text.to_string()))
    }

    /// Returns true if this range compares numeric values.
    pub fn is_numeric(&self) -> bool {
        !matches!(self, RangeSpec::Text(_))
    }
}

/// Parse one bound of a range string.
///
/// Bounds are non-negative decimals; the interval form splits at the first
/// `-`, so negative bounds are outside the grammar.
fn parse_bound(raw: &str) -> Option<f64> {
    let text = raw.trim();
    if text.is_empty() || text.starts_with('-') {
        return None;
    }
    let value: f64 = text.parse().ok()?;
    value.is_finite().then_some(value)
}

impl fmt::Display for RangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeSpec::Interval { min, max } => write!(f, "{min}-{max}"),
            RangeSpec::Below { limit } => write!(f, "<{limit}"),
            RangeSpec::Above { limit } => write!(f, ">{limit}"),
            RangeSpec::Text(token) => write!(f, "{token}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_interval() {
        assert_eq!(
            RangeSpec::parse("0.27-4.20"),
            Some(RangeSpec::Interval {
                min: 0.27,
                max: 4.20
            })
        );
        assert_eq!(
            RangeSpec::parse(" 70 - 100 "),
            Some(RangeSpec::Interval {
                min: 70.0,
                max: 100.0
            })
        );
    }

    #[test]
    fn test_parse_thresholds() {
        assert_eq!(RangeSpec::parse("<5"), Some(RangeSpec::Below { limit: 5.0 }));
        assert_eq!(
            RangeSpec::parse("> 40"),
            Some(RangeSpec::Above { limit: 40.0 })
        );
    }

    #[test]
    fn test_parse_qualitative() {
        assert_eq!(
            RangeSpec::parse("Negative"),
            Some(RangeSpec::Text("Negative".to_string()))
        );
        assert_eq!(
            RangeSpec::parse("Non-reactive"),
            Some(RangeSpec::Text("Non-reactive".to_string()))
        );
    }

    #[test]
    fn test_parse_malformed() {
        assert_eq!(RangeSpec::parse(""), None);
        assert_eq!(RangeSpec::parse("   "), None);
        assert_eq!(RangeSpec::parse("<abc"), None);
        assert_eq!(RangeSpec::parse("1.2-"), None);
        assert_eq!(RangeSpec::parse("-5-10"), None);
    }
}
