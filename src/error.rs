// src/error.rs
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures a pipeline stage can report. Each stage returns early on these;
/// the runner is the only place they are logged.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("request for rows {start}..={end} failed: {reason}")]
    Transport { start: usize, end: usize, reason: String },
    #[error("required data is missing: {0}")]
    DataAbsent(String),
    #[error("{origin}: missing required column '{column}'")]
    MissingColumn { origin: String, column: &'static str },
    #[error("{origin}: row {row}: column '{column}' has non-count value '{value}'")]
    BadCount { origin: String, row: usize, column: &'static str, value: String },
    #[error("{path}: {source}")]
    Io { path: PathBuf, #[source] source: io::Error },
}

impl PipelineError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        PipelineError::Io { path: path.into(), source }
    }
}
