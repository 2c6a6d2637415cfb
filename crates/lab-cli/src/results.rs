//! Results-file ingestion.
//!
//! A results file is one entered form as CSV:
//!
//! ```text
//! Parameter,Value,Range Override,Flag Override
//! hemoglobin,11.9,,
//! wbc,12500,,
//! crp,4.9,<10,
//! esr,20,,NORMAL
//! ```
//!
//! `Range Override` and `Flag Override` columns are optional; non-empty
//! cells seed the session as hand edits.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;

use lab_model::Flag;

/// Parsed results file: entered values plus override seeds.
#[derive(Debug, Default)]
pub struct ResultsFile {
    /// Entered value per parameter, as typed (may be empty).
    pub values: BTreeMap<String, String>,
    /// Hand-edited ranges, in file order.
    pub range_overrides: Vec<(String, String)>,
    /// Hand-edited flags, in file order.
    pub flag_overrides: Vec<(String, Flag)>,
    /// Rows the reader accepted only partially (bad flag token, repeated
    /// parameter). The form still evaluates without them.
    pub issues: Vec<String>,
}

pub fn read_results_file(path: &Path) -> Result<ResultsFile> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("read results file: {}", path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("read headers: {}", path.display()))?
        .clone();

    let column = |name: &str| -> Option<usize> {
        headers
            .iter()
            .position(|header| header.trim().trim_matches('\u{feff}').eq_ignore_ascii_case(name))
    };
    let parameter_idx = column("Parameter")
        .with_context(|| format!("{}: missing Parameter column", path.display()))?;
    let value_idx =
        column("Value").with_context(|| format!("{}: missing Value column", path.display()))?;
    let range_idx = column("Range Override");
    let flag_idx = column("Flag Override");

    let mut out = ResultsFile::default();
    for (row_number, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("read record: {}", path.display()))?;
        let field = |idx: usize| record.get(idx).unwrap_or("").trim().to_string();

        let parameter = field(parameter_idx);
        if parameter.is_empty() {
            continue;
        }
        if out.values.contains_key(&parameter) {
            out.issues
                .push(format!("row {}: repeated parameter {parameter}", row_number + 2));
            continue;
        }
        out.values.insert(parameter.clone(), field(value_idx));

        if let Some(idx) = range_idx {
            let range = field(idx);
            if !range.is_empty() {
                out.range_overrides.push((parameter.clone(), range));
            }
        }
        if let Some(idx) = flag_idx {
            let raw = field(idx);
            if !raw.is_empty() {
                match raw.parse::<Flag>() {
                    Ok(flag) => out.flag_overrides.push((parameter.clone(), flag)),
                    Err(message) => out
                        .issues
                        .push(format!("row {}: {message}", row_number + 2)),
                }
            }
        }
    }
    Ok(out)
}
