use std::collections::BTreeMap;

use lab_evaluate::{OverrideSession, calculate_flags, classify, get_flag};
use lab_model::{Flag, Panel, ParameterSpec};

fn spec(name: &str, range: &str) -> ParameterSpec {
    ParameterSpec {
        name: name.to_string(),
        label: name.to_string(),
        unit: None,
        normal_range: range.to_string(),
        step: None,
    }
}

fn panel(parameters: Vec<ParameterSpec>) -> Panel {
    Panel {
        code: "TEST".to_string(),
        label: "Test Panel".to_string(),
        description: None,
        parameters,
    }
}

fn results(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

#[test]
fn interval_boundaries_are_inclusive() {
    assert_eq!(classify("0.27", "0.27-4.20"), Some(Flag::Normal));
    assert_eq!(classify("4.20", "0.27-4.20"), Some(Flag::Normal));
    assert_eq!(classify("5.0", "0.27-4.20"), Some(Flag::High));
    assert_eq!(classify("0.1", "0.27-4.20"), Some(Flag::Low));
}

#[test]
fn blank_value_is_unevaluable_for_any_range() {
    for range in ["70-100", "<5", ">40", "Negative", "", "garbage"] {
        assert_eq!(classify("", range), None);
        assert_eq!(classify("   ", range), None);
    }
}

#[test]
fn qualitative_match_is_case_insensitive() {
    assert_eq!(classify("negative", "Negative"), Some(Flag::Normal));
    assert_eq!(classify("Positive", "Negative"), Some(Flag::Abnormal));
}

#[test]
fn crp_upper_bound_uses_threshold_is_high_policy() {
    // "<5": the threshold itself is already out of range.
    let crp = spec("crp", "<5");
    let session = OverrideSession::new();
    assert_eq!(get_flag("crp", "4.9", &crp, &session), Some(Flag::Normal));
    assert_eq!(get_flag("crp", "5.0", &crp, &session), Some(Flag::High));
}

#[test]
fn hdl_lower_bound_uses_threshold_is_low_policy() {
    let hdl = spec("hdl", ">40");
    let session = OverrideSession::new();
    assert_eq!(get_flag("hdl", "40", &hdl, &session), Some(Flag::Low));
    assert_eq!(get_flag("hdl", "41", &hdl, &session), Some(Flag::Normal));
}

#[test]
fn flag_override_always_wins() {
    let tsh = spec("tsh", "0.27-4.20");
    let mut session = OverrideSession::new();
    session.set_flag("tsh", Flag::Abnormal);
    // 2.0 would classify NORMAL; the manual override takes precedence.
    assert_eq!(get_flag("tsh", "2.0", &tsh, &session), Some(Flag::Abnormal));
    session.clear_flag("tsh");
    assert_eq!(get_flag("tsh", "2.0", &tsh, &session), Some(Flag::Normal));
}

#[test]
fn calculate_flags_omits_absent_and_empty_values() {
    let panel = panel(vec![
        spec("glucose", "70-100"),
        spec("urea", "17-43"),
        spec("creatinine", "0.7-1.3"),
    ]);
    let session = OverrideSession::new();
    let flags = calculate_flags(
        &results(&[("glucose", "95"), ("urea", ""), ("creatinine", "  ")]),
        &panel,
        &session,
    );
    assert_eq!(flags.get("glucose"), Some(&Flag::Normal));
    assert!(!flags.contains_key("urea"));
    assert!(!flags.contains_key("creatinine"));
}

#[test]
fn calculate_flags_omits_unevaluable_entered_values() {
    let panel = panel(vec![spec("glucose", "70-100")]);
    let session = OverrideSession::new();
    let flags = calculate_flags(&results(&[("glucose", "pending")]), &panel, &session);
    assert!(flags.is_empty());
}

#[test]
fn calculate_flags_keeps_override_on_unevaluable_value() {
    let panel = panel(vec![spec("glucose", "70-100")]);
    let mut session = OverrideSession::new();
    session.set_flag("glucose", Flag::Critical);
    let flags = calculate_flags(&results(&[("glucose", "hemolyzed")]), &panel, &session);
    assert_eq!(flags.get("glucose"), Some(&Flag::Critical));
}

#[test]
fn tsh_scenario() {
    let panel = panel(vec![spec("tsh", "0.27-4.20")]);
    let session = OverrideSession::new();

    let flags = calculate_flags(&results(&[("tsh", "5.0")]), &panel, &session);
    assert_eq!(flags.get("tsh"), Some(&Flag::High));

    let flags = calculate_flags(&results(&[("tsh", "0.27")]), &panel, &session);
    assert_eq!(flags.get("tsh"), Some(&Flag::Normal));

    let flags = calculate_flags(&results(&[("tsh", "")]), &panel, &session);
    assert!(!flags.contains_key("tsh"));
}

#[test]
fn range_override_changes_classification() {
    let panel = panel(vec![spec("glucose", "70-100")]);
    let mut session = OverrideSession::new();
    let entries = results(&[("glucose", "105")]);

    let flags = calculate_flags(&entries, &panel, &session);
    assert_eq!(flags.get("glucose"), Some(&Flag::High));

    session.set_range("glucose", "70-110");
    let flags = calculate_flags(&entries, &panel, &session);
    assert_eq!(flags.get("glucose"), Some(&Flag::Normal));
}
