#![deny(unsafe_code)]

use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::Digest;

use crate::error::StandardsError;

/// Parsed `standards/manifest.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub manifest: ManifestHeader,
    #[serde(default)]
    pub notes: Option<ManifestNotes>,
    pub pins: Pins,
    pub files: Vec<ManifestFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestHeader {
    pub schema: String,
    pub schema_version: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestNotes {
    pub summary: Option<String>,
}

/// Catalog versions the workspace is pinned to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pins {
    pub panels: String,
    pub demographics: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestFile {
    /// Path relative to the standards root, forward slashes.
    pub path: String,
    pub sha256: String,
    pub kind: String,
    pub role: String,
    #[serde(default)]
    pub notes: Option<String>,
}

pub const MANIFEST_FILE_NAME: &str = "manifest.toml";
pub const MANIFEST_SCHEMA: &str = "labflag.standards-manifest";

pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    hex::encode(digest)
}

/// Load and structurally validate the manifest under a standards root.
pub fn load_manifest(root: &Path) -> Result<Manifest, StandardsError> {
    let path = root.join(MANIFEST_FILE_NAME);
    let raw = std::fs::read_to_string(&path).map_err(|source| StandardsError::io(&path, source))?;
    let manifest: Manifest = toml::from_str(&raw).map_err(|source| StandardsError::Toml {
        path: path.clone(),
        source,
    })?;
    if manifest.manifest.schema != MANIFEST_SCHEMA {
        return Err(StandardsError::InvalidManifest {
            message: format!("unexpected schema {}", manifest.manifest.schema),
        });
    }
    for file in &manifest.files {
        let entry = Path::new(&file.path);
        if entry.is_absolute() || file.path.contains("..") {
            return Err(StandardsError::InvalidPath {
                path: entry.to_path_buf(),
                message: "manifest paths must be relative to the standards root".to_string(),
            });
        }
        if file.sha256.len() != 64 || !file.sha256.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(StandardsError::InvalidSha256 {
                path: entry.to_path_buf(),
                message: "expected 64 hex characters".to_string(),
            });
        }
    }
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
