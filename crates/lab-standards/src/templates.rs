//! Custom test templates.
//!
//! Admin staff can define a test the built-in catalog does not carry: a
//! named parameter schema saved as JSON and replayed as a regular panel at
//! result-entry time. Validation keeps the replayed panel within the same
//! invariants the catalog loader enforces.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use lab_model::{Panel, ParameterSpec, RangeSpec};

use crate::error::StandardsError;

/// A user-defined parameter schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestTemplate {
    /// Stable code used as the panel code when replayed.
    pub code: String,
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    pub parameters: Vec<ParameterSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateIssueSeverity {
    /// The template cannot be replayed as a panel.
    Error,
    /// The template replays, but part of it will never produce a flag.
    Warning,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateIssue {
    pub severity: TemplateIssueSeverity,
    pub parameter: Option<String>,
    pub message: String,
}

impl TestTemplate {
    /// Check the template against the panel invariants.
    ///
    /// Duplicate or empty parameter names are errors; a range string the
    /// grammar does not recognize is a warning, because evaluation will
    /// silently yield no flag for that parameter (the form still submits).
    pub fn validate(&self) -> Vec<TemplateIssue> {
        let mut issues = Vec::new();
        if self.code.trim().is_empty() {
            issues.push(TemplateIssue {
                severity: TemplateIssueSeverity::Error,
                parameter: None,
                message: "template code is empty".to_string(),
            });
        }
        let mut seen = std::collections::BTreeSet::new();
        for parameter in &self.parameters {
            if parameter.name.trim().is_empty() {
                issues.push(TemplateIssue {
                    severity: TemplateIssueSeverity::Error,
                    parameter: None,
                    message: "parameter with empty name".to_string(),
                });
                continue;
            }
            if !seen.insert(parameter.name.to_uppercase()) {
                issues.push(TemplateIssue {
                    severity: TemplateIssueSeverity::Error,
                    parameter: Some(parameter.name.clone()),
                    message: format!("duplicate parameter name {}", parameter.name),
                });
            }
            if RangeSpec::parse(&parameter.normal_range).is_none() {
                issues.push(TemplateIssue {
                    severity: TemplateIssueSeverity::Warning,
                    parameter: Some(parameter.name.clone()),
                    message: format!(
                        "range {:?} is not recognized; {} will never be flagged",
                        parameter.normal_range, parameter.name
                    ),
                });
            }
        }
        issues
    }

    pub fn has_errors(&self) -> bool {
        self.validate()
            .iter()
            .any(|issue| issue.severity == TemplateIssueSeverity::Error)
    }

    /// Replay the template as a panel for evaluation.
    pub fn into_panel(self) -> Panel {
        Panel {
            code: self.code.to_uppercase(),
            label: self.label,
            description: self.description,
            parameters: self.parameters,
        }
    }
}

pub fn load_template(path: &Path) -> Result<TestTemplate, StandardsError> {
    let raw = std::fs::read_to_string(path).map_err(|source| StandardsError::io(path, source))?;
    serde_json::from_str(&raw).map_err(|source| StandardsError::Template {
        path: path.to_path_buf(),
        message: source.to_string(),
    })
}

pub fn save_template(path: &Path, template: &TestTemplate) -> Result<(), StandardsError> {
    let json = serde_json::to_string_pretty(template).map_err(|source| StandardsError::Template {
        path: path.to_path_buf(),
        message: source.to_string(),
    })?;
    std::fs::write(path, format!("{json}\n")).map_err(|source| StandardsError::io(path, source))
}

/// List template files (`*.json`) in a directory, sorted by name.
pub fn list_templates(dir: &Path) -> Result<Vec<PathBuf>, StandardsError> {
    let mut paths = Vec::new();
    if !dir.exists() {
        return Ok(paths);
    }
    let entries = std::fs::read_dir(dir).map_err(|source| StandardsError::io(dir, source))?;
    for entry in entries {
        let entry = entry.map_err(|source| StandardsError::io(dir, source))?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}
