//! Value classification against a reference range string.

use lab_model::{Flag, RangeSpec};

/// Classify a single entered value against a range string.
///
/// Pure and total: an empty value, a non-numeric value against a numeric
/// range, or a range outside the grammar all yield `None` (unevaluable).
/// That is the expected state for a not-yet-filled field, not an error,
/// so the caller can keep rendering a partially entered form.
///
/// Boundary policy, applied uniformly: interval bounds are inclusive
/// (`value == min` and `value == max` are `NORMAL`), while for the
/// one-sided forms the threshold itself is already out of range
/// (`"<5"` flags `5.0` as `HIGH`, `">40"` flags `40` as `LOW`).
pub fn classify(value: &str, range: &str) -> Option<Flag> {
    let entered = value.trim();
    if entered.is_empty() {
        return None;
    }
    match RangeSpec::parse(range)? {
        RangeSpec::Below { limit } => {
            let measured = parse_numeric(entered)?;
            Some(if measured >= limit {
                Flag::High
            } else {
                Flag::Normal
            })
        }
        RangeSpec::Above { limit } => {
            let measured = parse_numeric(entered)?;
            Some(if measured <= limit {
                Flag::Low
            } else {
                Flag::Normal
            })
        }
        RangeSpec::Interval { min, max } => {
            let measured = parse_numeric(entered)?;
            Some(if measured < min {
                Flag::Low
            } else if measured > max {
                Flag::High
            } else {
                Flag::Normal
            })
        }
        RangeSpec::Text(expected) => Some(if entered.eq_ignore_ascii_case(&expected) {
            Flag::Normal
        } else {
            Flag::Abnormal
        }),
    }
}

fn parse_numeric(text: &str) -> Option<f64> {
    let value: f64 = text.parse().ok()?;
    value.is_finite().then_some(value)
}
