use lab_model::Sex;
use lab_standards::{
    StandardsRegistry, default_standards_root, load_default_demographic_rules,
    load_default_panels, run_doctor,
};

#[test]
fn default_panels_load_and_validate() {
    let panels = load_default_panels().expect("load panels");
    assert_eq!(panels.len(), 6);
    for panel in &panels {
        assert!(!panel.parameters.is_empty(), "{} has parameters", panel.code);
        panel.validate().expect("unique parameter names");
    }
}

#[test]
fn cbc_panel_has_expected_parameters() {
    let panels = load_default_panels().expect("load panels");
    let cbc = panels
        .iter()
        .find(|panel| panel.code == "CBC")
        .expect("CBC panel");
    let hemoglobin = cbc.parameter("hemoglobin").expect("hemoglobin");
    assert_eq!(hemoglobin.normal_range, "13-17");
    assert_eq!(hemoglobin.unit.as_deref(), Some("g/dL"));
    assert_eq!(hemoglobin.step, Some(0.1));
}

#[test]
fn serology_panel_is_qualitative() {
    let panels = load_default_panels().expect("load panels");
    let serology = panels
        .iter()
        .find(|panel| panel.code == "SEROLOGY")
        .expect("SEROLOGY panel");
    let hiv = serology.parameter("hiv").expect("hiv");
    assert_eq!(hiv.normal_range, "Non-reactive");
    assert!(hiv.unit.is_none());
}

#[test]
fn demographic_rules_cover_hemoglobin_by_sex() {
    let rules = load_default_demographic_rules().expect("load rules");
    let male = rules
        .iter()
        .find(|rule| rule.parameter == "hemoglobin" && rule.sex == Some(Sex::Male))
        .expect("male hemoglobin rule");
    assert_eq!(male.normal_range, "14-18");
    let female = rules
        .iter()
        .find(|rule| rule.parameter == "hemoglobin" && rule.sex == Some(Sex::Female))
        .expect("female hemoglobin rule");
    assert_eq!(female.normal_range, "12-15");
}

#[test]
fn child_rules_are_age_bounded() {
    let rules = load_default_demographic_rules().expect("load rules");
    let child_cholesterol = rules
        .iter()
        .find(|rule| rule.parameter == "cholesterol_total")
        .expect("child cholesterol rule");
    assert_eq!(child_cholesterol.min_age, Some(2));
    assert_eq!(child_cholesterol.max_age, Some(19));
    assert_eq!(child_cholesterol.normal_range, "<170");
}

#[test]
fn shipped_standards_verify_against_manifest() {
    let registry = StandardsRegistry::open(default_standards_root()).expect("open registry");
    let summary = registry.verify().expect("verify");
    assert!(
        summary.is_clean(),
        "missing={:?} unexpected={:?} mismatched={:?}",
        summary.missing,
        summary.unexpected,
        summary.mismatched
    );
    assert_eq!(summary.verified.len(), registry.manifest().files.len());
}

#[test]
fn doctor_reports_healthy_installation() {
    let report = run_doctor(default_standards_root()).expect("doctor");
    assert!(report.is_healthy());
    assert_eq!(report.problem_count(), 0);
    assert_eq!(report.panels_pin, "v1");
}
