use lab_evaluate::{OverrideSession, resolve_effective_range};
use lab_model::{Panel, ParameterSpec, Patient, Sex};
use lab_standards::DemographicRule;

fn spec(name: &str, range: &str) -> ParameterSpec {
    ParameterSpec {
        name: name.to_string(),
        label: name.to_string(),
        unit: None,
        normal_range: range.to_string(),
        step: None,
    }
}

fn cbc() -> Panel {
    Panel {
        code: "CBC".to_string(),
        label: "Complete Blood Count".to_string(),
        description: None,
        parameters: vec![spec("hemoglobin", "13-17"), spec("wbc", "4000-11000")],
    }
}

fn hemoglobin_rules() -> Vec<DemographicRule> {
    vec![
        DemographicRule {
            parameter: "hemoglobin".to_string(),
            sex: Some(Sex::Male),
            min_age: None,
            max_age: None,
            normal_range: "14-18".to_string(),
        },
        DemographicRule {
            parameter: "hemoglobin".to_string(),
            sex: Some(Sex::Female),
            min_age: None,
            max_age: None,
            normal_range: "12-15".to_string(),
        },
    ]
}

#[test]
fn demographic_default_by_sex() {
    let panel = cbc();
    let rules = hemoglobin_rules();
    let hemoglobin = panel.parameter("hemoglobin").unwrap();

    let mut session = OverrideSession::new();
    session.apply_demographic_defaults(&panel, &Patient::new("p1").with_sex(Sex::Male), &rules);
    assert_eq!(
        resolve_effective_range("hemoglobin", hemoglobin, &session),
        "14-18"
    );

    let mut session = OverrideSession::new();
    session.apply_demographic_defaults(&panel, &Patient::new("p2").with_sex(Sex::Female), &rules);
    assert_eq!(
        resolve_effective_range("hemoglobin", hemoglobin, &session),
        "12-15"
    );
}

#[test]
fn no_recorded_sex_keeps_catalog_default() {
    let panel = cbc();
    let hemoglobin = panel.parameter("hemoglobin").unwrap();
    let mut session = OverrideSession::new();
    session.apply_demographic_defaults(&panel, &Patient::new("p3"), &hemoglobin_rules());
    assert_eq!(
        resolve_effective_range("hemoglobin", hemoglobin, &session),
        "13-17"
    );
    assert!(session.is_empty());
}

#[test]
fn demographic_defaults_never_clobber_manual_edits() {
    let panel = cbc();
    let hemoglobin = panel.parameter("hemoglobin").unwrap();
    let mut session = OverrideSession::new();
    session.set_range("hemoglobin", "13.5-16.5");
    session.apply_demographic_defaults(&panel, &Patient::new("p4").with_sex(Sex::Male), &hemoglobin_rules());
    assert_eq!(
        resolve_effective_range("hemoglobin", hemoglobin, &session),
        "13.5-16.5"
    );
}

#[test]
fn changing_patient_replaces_stale_prefills() {
    let panel = cbc();
    let rules = hemoglobin_rules();
    let hemoglobin = panel.parameter("hemoglobin").unwrap();
    let mut session = OverrideSession::new();

    session.apply_demographic_defaults(&panel, &Patient::new("p5").with_sex(Sex::Male), &rules);
    assert_eq!(
        resolve_effective_range("hemoglobin", hemoglobin, &session),
        "14-18"
    );

    // Re-selecting a patient with no matching rule drops the old prefill.
    session.apply_demographic_defaults(&panel, &Patient::new("p6"), &rules);
    assert_eq!(
        resolve_effective_range("hemoglobin", hemoglobin, &session),
        "13-17"
    );
}

#[test]
fn first_matching_rule_wins() {
    let panel = cbc();
    let hemoglobin = panel.parameter("hemoglobin").unwrap();
    let rules = vec![
        DemographicRule {
            parameter: "hemoglobin".to_string(),
            sex: Some(Sex::Male),
            min_age: None,
            max_age: None,
            normal_range: "14-18".to_string(),
        },
        DemographicRule {
            parameter: "hemoglobin".to_string(),
            sex: None,
            min_age: None,
            max_age: None,
            normal_range: "10-20".to_string(),
        },
    ];
    let mut session = OverrideSession::new();
    session.apply_demographic_defaults(&panel, &Patient::new("p7").with_sex(Sex::Male), &rules);
    assert_eq!(
        resolve_effective_range("hemoglobin", hemoglobin, &session),
        "14-18"
    );
}

#[test]
fn reset_discards_all_overrides() {
    let mut session = OverrideSession::new();
    session.set_range("hemoglobin", "1-2");
    session.set_flag("wbc", lab_model::Flag::Critical);
    assert!(!session.is_empty());
    session.reset();
    assert!(session.is_empty());
}
