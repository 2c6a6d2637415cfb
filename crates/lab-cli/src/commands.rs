use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use comfy_table::Table;
use tracing::{debug, info, info_span, warn};

use lab_cli::logging::redact_value;
use lab_cli::results::read_results_file;
use lab_evaluate::{
    OverrideSession, resolve_effective_range, snapshot_record, write_test_record_json,
};
use lab_model::{LabError, Panel, Patient};
use lab_standards::templates::load_template;
use lab_standards::{
    DoctorReport, TemplateIssueSeverity, default_standards_root, load_default_demographic_rules,
    load_default_panels, run_doctor,
};

use crate::cli::{DoctorArgs, EvaluateArgs};
use crate::summary::apply_table_style;
use crate::types::{EvaluateResult, ResultRow};

pub fn run_panels() -> Result<()> {
    let mut panels = load_default_panels().context("load standards")?;
    panels.sort_by(|a, b| a.code.cmp(&b.code));
    let mut table = Table::new();
    table.set_header(vec!["Panel", "Description", "Parameters"]);
    apply_table_style(&mut table);
    for panel in panels {
        let description = panel.description.clone().unwrap_or_else(|| panel.label.clone());
        table.add_row(vec![
            panel.code,
            description,
            panel.parameters.len().to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_evaluate(args: &EvaluateArgs) -> Result<EvaluateResult> {
    let panel = select_panel(args)?;
    let span = info_span!("evaluate", panel = %panel.code);
    let _guard = span.enter();

    let results = read_results_file(&args.results_file)?;
    let mut warnings = results.issues.clone();
    for name in results.values.keys() {
        if panel.parameter(name).is_none() {
            warnings.push(format!("unknown parameter {name} (not in {})", panel.code));
        }
    }

    let patient = build_patient(args);
    let mut session = OverrideSession::new();

    // Demographic substitution runs once, on patient selection, before any
    // hand edit from the results file is applied.
    if !args.no_demographics
        && let Some(patient) = patient.as_ref()
    {
        let rules = load_default_demographic_rules().context("load demographic rules")?;
        session.apply_demographic_defaults(&panel, patient, &rules);
        debug!(rule_count = rules.len(), "demographic defaults applied");
    }
    for (parameter, range) in &results.range_overrides {
        session.set_range(parameter, range);
    }
    for (parameter, flag) in &results.flag_overrides {
        session.set_flag(parameter, *flag);
    }

    let record = snapshot_record(&panel, patient.as_ref(), &results.values, &session);

    let mut rows = Vec::new();
    for spec in &panel.parameters {
        let Some(value) = results.values.get(&spec.name) else {
            continue;
        };
        let flag = record.flags.get(&spec.name).copied();
        debug!(
            parameter = %spec.name,
            value = redact_value(value),
            flag = flag.map(|f| f.as_str()).unwrap_or("-"),
            "evaluated"
        );
        rows.push(ResultRow {
            label: spec.label.clone(),
            value: value.clone(),
            unit: spec.unit.clone(),
            range: resolve_effective_range(&spec.name, spec, &session).to_string(),
            flag,
        });
    }

    let record_path = if args.dry_run {
        None
    } else {
        let output_dir = args
            .output_dir
            .clone()
            .unwrap_or_else(|| default_output_dir(&args.results_file));
        Some(write_test_record_json(&output_dir, &record)?)
    };

    info!(
        flag_count = record.flags.len(),
        out_of_range = record.out_of_range_count(),
        "evaluation complete"
    );

    Ok(EvaluateResult {
        panel_code: panel.code,
        panel_label: panel.label,
        patient_id: record.patient_id.clone(),
        rows,
        record_path,
        out_of_range: record.out_of_range_count(),
        warnings,
    })
}

pub fn run_doctor_command(args: &DoctorArgs) -> Result<DoctorReport> {
    let root = args
        .standards_dir
        .clone()
        .unwrap_or_else(default_standards_root);
    run_doctor(root).context("check standards installation")
}

fn select_panel(args: &EvaluateArgs) -> Result<Panel> {
    if let Some(path) = &args.template {
        let template = load_template(path)?;
        for issue in template.validate() {
            match issue.severity {
                TemplateIssueSeverity::Error => {
                    bail!("template {}: {}", path.display(), issue.message)
                }
                TemplateIssueSeverity::Warning => {
                    warn!(template = %path.display(), "{}", issue.message);
                }
            }
        }
        let panel = template.into_panel();
        panel.validate()?;
        return Ok(panel);
    }
    let code = args
        .panel
        .as_deref()
        .context("one of --panel or --template is required")?
        .to_uppercase();
    let panels = load_default_panels().context("load standards")?;
    panels
        .into_iter()
        .find(|panel| panel.code == code)
        .ok_or_else(|| LabError::UnknownPanel(code).into())
}

fn build_patient(args: &EvaluateArgs) -> Option<Patient> {
    if args.patient_id.is_none() && args.sex.is_none() && args.age.is_none() {
        return None;
    }
    Some(Patient {
        patient_id: args.patient_id.clone(),
        sex: args.sex,
        age_years: args.age,
    })
}

fn default_output_dir(results_file: &Path) -> PathBuf {
    results_file
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("output")
}
