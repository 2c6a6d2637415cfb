use std::path::PathBuf;

use lab_model::Flag;

/// Outcome of `labflag evaluate`, consumed by the summary printer.
#[derive(Debug)]
pub struct EvaluateResult {
    pub panel_code: String,
    pub panel_label: String,
    pub patient_id: Option<String>,
    pub rows: Vec<ResultRow>,
    /// Path of the written record; `None` on --dry-run.
    pub record_path: Option<PathBuf>,
    pub out_of_range: usize,
    pub warnings: Vec<String>,
}

/// One printed row: a panel parameter with an entry in the results file.
#[derive(Debug)]
pub struct ResultRow {
    pub label: String,
    pub value: String,
    pub unit: Option<String>,
    /// Effective reference range (post-override).
    pub range: String,
    pub flag: Option<Flag>,
}
