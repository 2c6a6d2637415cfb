//! Saved test records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::flag::Flag;

/// Immutable snapshot of one completed test entry.
///
/// `normal_ranges` and `flags` are the *effective* values at save time,
/// overrides already applied. Later range or flag edits in a new session
/// never rewrite a saved record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestRecord {
    /// Panel or template code this record was entered against.
    pub panel_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    /// Entered values keyed by parameter name.
    pub test_results: BTreeMap<String, String>,
    /// Effective reference range per parameter, post-override.
    pub normal_ranges: BTreeMap<String, String>,
    /// Effective flag per evaluable parameter, post-override.
    /// Parameters with no entered or evaluable value are absent.
    pub flags: BTreeMap<String, Flag>,
}

impl TestRecord {
    /// Returns the number of parameters flagged outside their range.
    pub fn out_of_range_count(&self) -> usize {
        self.flags
            .values()
            .filter(|flag| flag.is_out_of_range())
            .count()
    }

    pub fn has_out_of_range(&self) -> bool {
        self.out_of_range_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_counts() {
        let mut record = TestRecord {
            panel_code: "CBC".to_string(),
            ..TestRecord::default()
        };
        record.flags.insert("hemoglobin".to_string(), Flag::Low);
        record.flags.insert("wbc".to_string(), Flag::Normal);
        record.flags.insert("platelets".to_string(), Flag::Critical);
        assert_eq!(record.out_of_range_count(), 2);
        assert!(record.has_out_of_range());
    }
}
