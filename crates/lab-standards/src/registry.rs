#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::StandardsError;
use crate::manifest::{MANIFEST_FILE_NAME, Manifest, load_manifest, sha256_hex};

/// A standards root paired with its loaded manifest.
#[derive(Debug, Clone)]
pub struct StandardsRegistry {
    root: PathBuf,
    manifest: Manifest,
}

/// Outcome of checking the standards directory against its manifest.
#[derive(Debug, Clone, Default)]
pub struct VerifySummary {
    /// Files listed in the manifest and present with the pinned digest.
    pub verified: Vec<PathBuf>,
    /// Files listed in the manifest but absent on disk.
    pub missing: Vec<PathBuf>,
    /// Files on disk that the manifest does not list.
    pub unexpected: Vec<PathBuf>,
    /// Files whose digest differs from the manifest pin.
    pub mismatched: Vec<DigestMismatch>,
}

#[derive(Debug, Clone)]
pub struct DigestMismatch {
    pub path: PathBuf,
    pub expected: String,
    pub actual: String,
}

impl VerifySummary {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.unexpected.is_empty() && self.mismatched.is_empty()
    }
}

impl StandardsRegistry {
    /// Load the manifest under a standards root.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StandardsError> {
        let root = root.into();
        let manifest = load_manifest(&root)?;
        Ok(Self { root, manifest })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Compare the standards directory to the manifest.
    ///
    /// Walks every regular file under the root (the manifest itself is not
    /// expected to list itself) and reports missing, unexpected, and
    /// digest-mismatched entries.
    pub fn verify(&self) -> Result<VerifySummary, StandardsError> {
        let mut expected: BTreeMap<PathBuf, &str> = BTreeMap::new();
        for file in &self.manifest.files {
            expected.insert(PathBuf::from(&file.path), file.sha256.as_str());
        }

        let mut summary = VerifySummary::default();
        let mut on_disk = Vec::new();
        collect_files(&self.root, &self.root, &mut on_disk)?;

        for relative in on_disk {
            if relative.as_os_str() == MANIFEST_FILE_NAME {
                continue;
            }
            match expected.remove(&relative) {
                Some(pinned) => {
                    let full = self.root.join(&relative);
                    let bytes =
                        std::fs::read(&full).map_err(|source| StandardsError::io(&full, source))?;
                    let actual = sha256_hex(&bytes);
                    if actual.eq_ignore_ascii_case(pinned) {
                        summary.verified.push(relative);
                    } else {
                        summary.mismatched.push(DigestMismatch {
                            path: relative,
                            expected: pinned.to_string(),
                            actual,
                        });
                    }
                }
                None => summary.unexpected.push(relative),
            }
        }
        summary.missing.extend(expected.into_keys());
        Ok(summary)
    }
}

fn collect_files(
    root: &Path,
    dir: &Path,
    out: &mut Vec<PathBuf>,
) -> Result<(), StandardsError> {
    let entries = std::fs::read_dir(dir).map_err(|source| StandardsError::io(dir, source))?;
    for entry in entries {
        let entry = entry.map_err(|source| StandardsError::io(dir, source))?;
        let path = entry.path();
        if path.is_dir() {
            collect_files(root, &path, out)?;
        } else if path.is_file() {
            let relative = path
                .strip_prefix(root)
                .map_err(|_| StandardsError::InvalidPath {
                    path: path.clone(),
                    message: "file escapes the standards root".to_string(),
                })?;
            out.push(relative.to_path_buf());
        }
    }
    Ok(())
}
