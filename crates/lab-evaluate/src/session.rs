//! Per-form override state.
//!
//! One `OverrideSession` belongs to one result-entry form. It is created
//! when the form opens, mutated by patient selection and hand edits, read
//! at every re-evaluation, and discarded on form reset. Nothing here is
//! shared across sessions.

use std::collections::BTreeMap;

use lab_model::{Flag, Panel, Patient};
use lab_standards::DemographicRule;

/// Where a range override came from. Demographic prefills may be replaced
/// when the patient changes; manual edits may not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideSource {
    Demographic,
    Manual,
}

#[derive(Debug, Clone)]
struct RangeOverride {
    range: String,
    source: OverrideSource,
}

/// Session-local replacements for reference ranges and computed flags.
#[derive(Debug, Clone, Default)]
pub struct OverrideSession {
    range_overrides: BTreeMap<String, RangeOverride>,
    flag_overrides: BTreeMap<String, Flag>,
}

impl OverrideSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a hand-edited range for a parameter.
    pub fn set_range(&mut self, param_name: impl Into<String>, range: impl Into<String>) {
        self.range_overrides.insert(
            param_name.into(),
            RangeOverride {
                range: range.into(),
                source: OverrideSource::Manual,
            },
        );
    }

    pub fn clear_range(&mut self, param_name: &str) {
        self.range_overrides.remove(param_name);
    }

    /// The overriding range for a parameter, if one is set and non-empty.
    /// An empty-string edit falls back to the parameter default.
    pub fn range_override(&self, param_name: &str) -> Option<&str> {
        self.range_overrides
            .get(param_name)
            .map(|entry| entry.range.as_str())
            .filter(|range| !range.trim().is_empty())
    }

    /// Record a manual flag for a parameter. Always wins over the
    /// computed classification.
    pub fn set_flag(&mut self, param_name: impl Into<String>, flag: Flag) {
        self.flag_overrides.insert(param_name.into(), flag);
    }

    pub fn clear_flag(&mut self, param_name: &str) {
        self.flag_overrides.remove(param_name);
    }

    pub fn flag_override(&self, param_name: &str) -> Option<Flag> {
        self.flag_overrides.get(param_name).copied()
    }

    /// Discard all session state (form reset / navigation away).
    pub fn reset(&mut self) {
        self.range_overrides.clear();
        self.flag_overrides.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.range_overrides.is_empty() && self.flag_overrides.is_empty()
    }

    /// Pre-fill demographic reference ranges for the selected patient.
    ///
    /// Runs once per patient selection, never per render. Stale prefills
    /// from a previously selected patient are dropped first; entries the
    /// user hand-edited in this session are left untouched. For each panel
    /// parameter the first matching rule wins.
    pub fn apply_demographic_defaults(
        &mut self,
        panel: &Panel,
        patient: &Patient,
        rules: &[DemographicRule],
    ) {
        self.range_overrides
            .retain(|_, entry| entry.source == OverrideSource::Manual);
        for parameter in &panel.parameters {
            if self.range_overrides.contains_key(&parameter.name) {
                continue;
            }
            let matched = rules.iter().find(|rule| {
                rule.parameter.eq_ignore_ascii_case(&parameter.name) && rule.matches(patient)
            });
            if let Some(rule) = matched {
                self.range_overrides.insert(
                    parameter.name.clone(),
                    RangeOverride {
                        range: rule.normal_range.clone(),
                        source: OverrideSource::Demographic,
                    },
                );
            }
        }
    }
}
