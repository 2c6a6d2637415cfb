//! Snapshotting a finished form into a saved record.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use lab_model::{Panel, Patient, TestRecord};

use crate::session::OverrideSession;
use crate::{calculate_flags, resolve_effective_range};

const RECORD_SCHEMA: &str = "labflag.test-record";
const RECORD_SCHEMA_VERSION: u32 = 1;

/// Versioned envelope around a saved `TestRecord`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TestRecordPayload {
    pub schema: String,
    pub schema_version: u32,
    pub generated_at: String,
    pub record: TestRecord,
}

/// Freeze the current form state into an immutable record.
///
/// Effective ranges and flags are resolved once, here; the saved snapshot
/// never changes when the session's overrides are edited afterwards.
/// Parameters with no entered value are absent from all three maps.
pub fn snapshot_record(
    panel: &Panel,
    patient: Option<&Patient>,
    results: &BTreeMap<String, String>,
    session: &OverrideSession,
) -> TestRecord {
    let mut record = TestRecord {
        panel_code: panel.code.clone(),
        patient_id: patient.and_then(|p| p.patient_id.clone()),
        ..TestRecord::default()
    };
    for (name, value) in results {
        if value.trim().is_empty() {
            continue;
        }
        record.test_results.insert(name.clone(), value.clone());
        if let Some(spec) = panel.parameter(name) {
            record.normal_ranges.insert(
                name.clone(),
                resolve_effective_range(name, spec, session).to_string(),
            );
        }
    }
    record.flags = calculate_flags(results, panel, session);
    record
}

/// Write a record as versioned JSON under `output_dir`.
pub fn write_test_record_json(output_dir: &Path, record: &TestRecord) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("create {}", output_dir.display()))?;
    let file_name = format!("test_record_{}.json", record.panel_code.to_lowercase());
    let output_path = output_dir.join(file_name);
    let payload = TestRecordPayload {
        schema: RECORD_SCHEMA.to_string(),
        schema_version: RECORD_SCHEMA_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        record: record.clone(),
    };
    let json = serde_json::to_string_pretty(&payload)?;
    std::fs::write(&output_path, format!("{json}\n"))
        .with_context(|| format!("write {}", output_path.display()))?;
    Ok(output_path)
}

/// Read a record payload back, checking the schema pin.
pub fn read_test_record_json(path: &Path) -> Result<TestRecordPayload> {
    let raw =
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let payload: TestRecordPayload =
        serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    if payload.schema != RECORD_SCHEMA {
        bail!(
            "unexpected record schema {} in {}",
            payload.schema,
            path.display()
        );
    }
    Ok(payload)
}
