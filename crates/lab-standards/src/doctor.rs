#![deny(unsafe_code)]

//! Standards installation check backing the `doctor` CLI command.

use std::path::PathBuf;

use crate::error::StandardsError;
use crate::registry::{StandardsRegistry, VerifySummary};

/// Per-file status line for the doctor report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Verified,
    Missing,
    Unexpected,
    Mismatched,
}

impl FileStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileStatus::Verified => "ok",
            FileStatus::Missing => "missing",
            FileStatus::Unexpected => "unexpected",
            FileStatus::Mismatched => "sha256 mismatch",
        }
    }
}

#[derive(Debug, Clone)]
pub struct DoctorEntry {
    pub path: PathBuf,
    pub status: FileStatus,
    pub detail: Option<String>,
}

/// Result of checking a standards installation end to end.
#[derive(Debug, Clone)]
pub struct DoctorReport {
    pub root: PathBuf,
    pub panels_pin: String,
    pub demographics_pin: String,
    pub entries: Vec<DoctorEntry>,
}

impl DoctorReport {
    pub fn is_healthy(&self) -> bool {
        self.entries
            .iter()
            .all(|entry| entry.status == FileStatus::Verified)
    }

    pub fn problem_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.status != FileStatus::Verified)
            .count()
    }
}

/// Open the manifest at `root`, verify every pinned file, and fold the
/// outcome into a printable report.
pub fn run_doctor(root: impl Into<PathBuf>) -> Result<DoctorReport, StandardsError> {
    let registry = StandardsRegistry::open(root)?;
    let summary = registry.verify()?;
    Ok(build_report(&registry, summary))
}

fn build_report(registry: &StandardsRegistry, summary: VerifySummary) -> DoctorReport {
    let mut entries = Vec::new();
    for path in summary.verified {
        entries.push(DoctorEntry {
            path,
            status: FileStatus::Verified,
            detail: None,
        });
    }
    for path in summary.missing {
        entries.push(DoctorEntry {
            path,
            status: FileStatus::Missing,
            detail: None,
        });
    }
    for path in summary.unexpected {
        entries.push(DoctorEntry {
            path,
            status: FileStatus::Unexpected,
            detail: None,
        });
    }
    for mismatch in summary.mismatched {
        entries.push(DoctorEntry {
            path: mismatch.path,
            status: FileStatus::Mismatched,
            detail: Some(format!(
                "expected {}, got {}",
                mismatch.expected, mismatch.actual
            )),
        });
    }
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    DoctorReport {
        root: registry.root().to_path_buf(),
        panels_pin: registry.manifest().pins.panels.clone(),
        demographics_pin: registry.manifest().pins.demographics.clone(),
        entries,
    }
}
