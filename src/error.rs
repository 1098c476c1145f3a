use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading species sources or rule tables.
///
/// The compatibility core itself never fails; only reading its inputs can.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error for file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON from '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid rule set: {0}")]
    InvalidRules(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
