//! Panel and parameter definitions.
//!
//! A panel is one orderable test (CBC, LFT, lipid profile, ...) and the
//! list of parameters measured under it. Built-in panels come from the
//! standards catalog; custom templates replay into the same shape.

use serde::{Deserialize, Serialize};

use crate::error::{LabError, Result};

/// Static definition of one measurable quantity within a panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Stable key used in result and flag maps. Unique within a panel.
    pub name: String,
    /// Human-readable display name.
    pub label: String,
    /// Display unit; empty for qualitative parameters.
    #[serde(default)]
    pub unit: Option<String>,
    /// Default reference range string (see `RangeSpec` for the grammar).
    pub normal_range: String,
    /// Numeric input granularity. Display concern only.
    #[serde(default)]
    pub step: Option<f64>,
}

/// One orderable test and its parameter list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Panel {
    /// Short stable code (e.g. "CBC").
    pub code: String,
    pub label: String,
    #[serde(default)]
    pub description: Option<String>,
    pub parameters: Vec<ParameterSpec>,
}

impl Panel {
    /// Return the parameter spec matching a name (case-insensitive).
    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters
            .iter()
            .find(|parameter| parameter.name.eq_ignore_ascii_case(name))
    }

    /// Check the panel invariant: parameter names are unique within the
    /// panel (case-insensitive, since result maps are keyed by name).
    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::BTreeSet::new();
        for parameter in &self.parameters {
            let key = parameter.name.to_uppercase();
            if key.is_empty() {
                return Err(LabError::Message(format!(
                    "panel {}: parameter with empty name",
                    self.code
                )));
            }
            if !seen.insert(key) {
                return Err(LabError::DuplicateParameter {
                    panel: self.code.clone(),
                    parameter: parameter.name.clone(),
                });
            }
        }
        Ok(())
    }
}
