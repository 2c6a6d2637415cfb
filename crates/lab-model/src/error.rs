use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("panel {panel}: duplicate parameter name {parameter}")]
    DuplicateParameter { panel: String, parameter: String },
    #[error("unknown panel: {0}")]
    UnknownPanel(String),
    #[error("failed to parse record {path}: {message}")]
    Record { path: PathBuf, message: String },
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, LabError>;
