use std::path::PathBuf;

use thiserror::Error;

/// Errors raised at the library's I/O and configuration edges.
///
/// The analysis pipeline itself never fails; these only come from loading
/// catalogs, reading configuration or validating untrusted input files.
#[derive(Error, Debug)]
pub enum CoachError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Reference catalog contains no shooters")]
    EmptyCatalog,
}

pub type Result<T> = std::result::Result<T, CoachError>;
