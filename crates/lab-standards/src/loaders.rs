//! CSV loaders for the built-in panel catalog and demographic rules.
//!
//! The standards root holds versioned subdirectories:
//!
//! ```text
//! standards/
//!   manifest.toml
//!   panels/v1/Panels.csv
//!   panels/v1/Parameters.csv
//!   demographics/v1/Ranges.csv
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::ReaderBuilder;

use lab_model::{Panel, ParameterSpec, Patient, Sex};

/// One row of the demographic range table.
///
/// A rule replaces a parameter's default reference range when every stated
/// condition matches the patient. Conditions the row leaves blank do not
/// constrain the match.
#[derive(Debug, Clone)]
pub struct DemographicRule {
    pub parameter: String,
    pub sex: Option<Sex>,
    /// Inclusive age bounds in whole years.
    pub min_age: Option<u32>,
    pub max_age: Option<u32>,
    pub normal_range: String,
}

impl DemographicRule {
    /// Returns true when the patient satisfies every stated condition.
    ///
    /// A rule conditioned on sex or age never matches a patient whose
    /// record leaves that field unset; such patients keep the
    /// unconditioned catalog default.
    pub fn matches(&self, patient: &Patient) -> bool {
        if let Some(required) = self.sex {
            if patient.sex != Some(required) {
                return false;
            }
        }
        if self.min_age.is_some() || self.max_age.is_some() {
            let Some(age) = patient.age_years else {
                return false;
            };
            if let Some(min) = self.min_age
                && age < min
            {
                return false;
            }
            if let Some(max) = self.max_age
                && age > max
            {
                return false;
            }
        }
        true
    }
}

const DEFAULT_PANELS_VERSION: &str = "v1";
const DEFAULT_DEMOGRAPHICS_VERSION: &str = "v1";
const STANDARDS_ENV_VAR: &str = "LAB_STANDARDS_DIR";

pub fn default_standards_root() -> PathBuf {
    if let Ok(root) = std::env::var(STANDARDS_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../standards")
}

pub fn load_default_panels() -> Result<Vec<Panel>> {
    let root = default_standards_root();
    load_panels(&root.join("panels").join(DEFAULT_PANELS_VERSION))
}

pub fn load_default_demographic_rules() -> Result<Vec<DemographicRule>> {
    let root = default_standards_root();
    load_demographic_rules(
        &root
            .join("demographics")
            .join(DEFAULT_DEMOGRAPHICS_VERSION)
            .join("Ranges.csv"),
    )
}

fn read_csv_rows(path: &Path) -> Result<Vec<BTreeMap<String, String>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("read csv: {}", path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("read headers: {}", path.display()))?
        .clone();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("read record: {}", path.display()))?;
        let mut row = BTreeMap::new();
        for (idx, value) in record.iter().enumerate() {
            let key = headers
                .get(idx)
                .unwrap_or("")
                .trim_matches('\u{feff}')
                .to_string();
            row.insert(key, value.trim().to_string());
        }
        rows.push(row);
    }
    Ok(rows)
}

pub fn load_panels(base_dir: &Path) -> Result<Vec<Panel>> {
    let panels = read_csv_rows(&base_dir.join("Panels.csv"))?;
    let parameters = read_csv_rows(&base_dir.join("Parameters.csv"))?;
    build_panels(&panels, &parameters)
}

fn build_panels(
    panels: &[BTreeMap<String, String>],
    parameters: &[BTreeMap<String, String>],
) -> Result<Vec<Panel>> {
    let mut grouped: BTreeMap<String, Vec<ParameterSpec>> = BTreeMap::new();
    for row in parameters {
        let panel_code = row
            .get("Panel Code")
            .cloned()
            .unwrap_or_default()
            .to_uppercase();
        let name = row.get("Parameter Name").cloned().unwrap_or_default();
        if panel_code.is_empty() || name.is_empty() {
            continue;
        }
        grouped.entry(panel_code).or_default().push(ParameterSpec {
            label: row
                .get("Parameter Label")
                .filter(|value| !value.is_empty())
                .cloned()
                .unwrap_or_else(|| name.clone()),
            name,
            unit: row.get("Unit").filter(|value| !value.is_empty()).cloned(),
            normal_range: row.get("Normal Range").cloned().unwrap_or_default(),
            step: row
                .get("Step")
                .filter(|value| !value.is_empty())
                .and_then(|value| value.parse().ok()),
        });
    }

    let mut out = Vec::new();
    for row in panels {
        let code = row
            .get("Panel Code")
            .cloned()
            .unwrap_or_default()
            .to_uppercase();
        if code.is_empty() {
            continue;
        }
        let panel = Panel {
            label: row
                .get("Panel Label")
                .filter(|value| !value.is_empty())
                .cloned()
                .unwrap_or_else(|| code.clone()),
            description: row
                .get("Description")
                .filter(|value| !value.is_empty())
                .cloned(),
            parameters: grouped.remove(&code).unwrap_or_default(),
            code,
        };
        panel
            .validate()
            .with_context(|| format!("panel {}", panel.code))?;
        out.push(panel);
    }
    Ok(out)
}

pub fn load_demographic_rules(path: &Path) -> Result<Vec<DemographicRule>> {
    let rows = read_csv_rows(path)?;
    let mut rules = Vec::new();
    for row in &rows {
        let parameter = row.get("Parameter Name").cloned().unwrap_or_default();
        let normal_range = row.get("Normal Range").cloned().unwrap_or_default();
        if parameter.is_empty() || normal_range.is_empty() {
            continue;
        }
        rules.push(DemographicRule {
            parameter,
            sex: row
                .get("Sex")
                .filter(|value| !value.is_empty())
                .and_then(|value| value.parse().ok()),
            min_age: row
                .get("Min Age")
                .filter(|value| !value.is_empty())
                .and_then(|value| value.parse().ok()),
            max_age: row
                .get("Max Age")
                .filter(|value| !value.is_empty())
                .and_then(|value| value.parse().ok()),
            normal_range,
        });
    }
    Ok(rules)
}
