//! Error type for the fallible edges of the engine.
//!
//! Editing operations themselves never fail; out-of-range input is clamped.
//! Only loading configuration and clip data can go wrong.

use std::path::PathBuf;

/// Error type for configuration and clip loading
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
