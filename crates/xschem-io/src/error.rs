//! Error type for the three external-collaborator seams (spec §6/§7).

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),
    #[error("malformed schematic record at line {line}: {message}")]
    Malformed { line: usize, message: String },
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("scripting bridge returned no result for `{0}`")]
    BridgeNoResult(String),
}
