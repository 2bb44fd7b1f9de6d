//! Error taxonomy shared by every pipeline stage.

use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// Coarse error class used by the orchestrator to decide whether a stage may
/// be retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// The columnar backend is unusable. Deployment defect.
    Environment,
    /// Malformed or unconvertible input data.
    Data,
    /// Filesystem failure.
    Io,
    /// The curated dataset failed a quality precondition.
    Validation,
}

/// Quality preconditions checked, in order, by the validation stage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("dataset not found at {path}")]
    NotFound { path: PathBuf },

    #[error("no partitions found in {path}")]
    NoPartitions { path: PathBuf },

    #[error("no data files found in the partitions of {path}")]
    NoDataFiles { path: PathBuf },

    #[error("dataset at {path} is empty after read")]
    EmptyAfterRead { path: PathBuf },
}

/// Errors raised by the extract, transform, and validate stages.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("columnar backend unavailable: {message}")]
    Environment { message: String },

    #[error("invalid data in {path}: {message}")]
    Data { path: PathBuf, message: String },

    #[error("i/o failure on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("quality check failed: {0}")]
    Validation(#[from] ValidationFailure),
}

impl PipelineError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn data(path: &Path, message: impl ToString) -> Self {
        Self::Data {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }

    pub fn environment(message: impl ToString) -> Self {
        Self::Environment {
            message: message.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Environment { .. } => ErrorKind::Environment,
            Self::Data { .. } => ErrorKind::Data,
            Self::Io { .. } => ErrorKind::Io,
            Self::Validation(_) => ErrorKind::Validation,
        }
    }

    /// Environment defects need a redeploy, so re-running the stage cannot help.
    pub fn is_retryable(&self) -> bool {
        self.kind() != ErrorKind::Environment
    }

    pub fn validation_failure(&self) -> Option<&ValidationFailure> {
        match self {
            Self::Validation(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Result type for pipeline stages.
pub type Result<T> = std::result::Result<T, PipelineError>;
