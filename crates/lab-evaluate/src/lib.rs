//! Reference range evaluation.
//!
//! Classifies entered results against their effective reference ranges and
//! assembles the flag map persisted with a saved test. The evaluator is
//! synchronous and never fails: malformed ranges and unparseable values
//! degrade to "no flag" so a partially filled form always renders.

mod classify;
mod record;
mod session;

pub use classify::classify;
pub use record::{
    TestRecordPayload, read_test_record_json, snapshot_record, write_test_record_json,
};
pub use session::{OverrideSession, OverrideSource};

use std::collections::BTreeMap;

use lab_model::{Flag, Panel, ParameterSpec};

/// The reference range in force for a parameter: the session override when
/// one is set and non-empty, else the catalog default.
pub fn resolve_effective_range<'a>(
    param_name: &str,
    spec: &'a ParameterSpec,
    session: &'a OverrideSession,
) -> &'a str {
    session
        .range_override(param_name)
        .unwrap_or(&spec.normal_range)
}

/// Effective flag for one parameter: the computed classification, unless a
/// manual flag override is present — the override always wins. This is the
/// deliberate escape hatch for staff overriding a borderline automatic
/// classification.
pub fn get_flag(
    param_name: &str,
    value: &str,
    spec: &ParameterSpec,
    session: &OverrideSession,
) -> Option<Flag> {
    if let Some(flag) = session.flag_override(param_name) {
        return Some(flag);
    }
    classify(value, resolve_effective_range(param_name, spec, session))
}

/// Compute the flag map persisted with a saved test.
///
/// Only parameters with a non-empty entered value appear; entered values
/// the range cannot judge are likewise absent rather than carrying an
/// empty flag. A value entered against a parameter the panel does not
/// define gets a flag only through a manual override.
pub fn calculate_flags(
    results: &BTreeMap<String, String>,
    panel: &Panel,
    session: &OverrideSession,
) -> BTreeMap<String, Flag> {
    let mut flags = BTreeMap::new();
    for (name, value) in results {
        if value.trim().is_empty() {
            continue;
        }
        let flag = match panel.parameter(name) {
            Some(spec) => get_flag(name, value, spec, session),
            None => session.flag_override(name),
        };
        if let Some(flag) = flag {
            flags.insert(name.clone(), flag);
        }
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str, range: &str) -> ParameterSpec {
        ParameterSpec {
            name: name.to_string(),
            label: name.to_string(),
            unit: None,
            normal_range: range.to_string(),
            step: None,
        }
    }

    #[test]
    fn effective_range_prefers_non_empty_override() {
        let glucose = spec("glucose", "70-100");
        let mut session = OverrideSession::new();
        assert_eq!(
            resolve_effective_range("glucose", &glucose, &session),
            "70-100"
        );
        session.set_range("glucose", "70-110");
        assert_eq!(
            resolve_effective_range("glucose", &glucose, &session),
            "70-110"
        );
        session.set_range("glucose", "");
        assert_eq!(
            resolve_effective_range("glucose", &glucose, &session),
            "70-100"
        );
    }

    #[test]
    fn flag_override_beats_computed_classification() {
        let glucose = spec("glucose", "70-100");
        let mut session = OverrideSession::new();
        assert_eq!(
            get_flag("glucose", "95", &glucose, &session),
            Some(Flag::Normal)
        );
        session.set_flag("glucose", Flag::Critical);
        assert_eq!(
            get_flag("glucose", "95", &glucose, &session),
            Some(Flag::Critical)
        );
    }
}
