//! Storage layer error types
//!
//! Every failure a store operation can hit is defined here. The
//! non-failing operations on [`RecordStore`](super::RecordStore) log these
//! and degrade; the `try_*` operations hand them back to the caller.

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

/// the main error type for store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error while opening, creating or removing the file
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization or deserialization failed
    #[error("data conversion error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// the file parsed but does not have the `{"Content": [...]}` shape
    #[error("corrupted document at {path}: {reason}")]
    Corrupted { path: PathBuf, reason: String },

    /// an empty document or record was handed to a write operation
    #[error("refusing to write empty data")]
    EmptyInput,

    /// the file is missing or empty where an existing document is required
    #[error("document not initialized: {0}")]
    NotInitialized(PathBuf),

    /// the input record lacks the field used as unique identifier
    #[error("record has no uid field `{0}`")]
    MissingUid(String),

    /// a uid-based operation was given no uid fields to match on
    #[error("no uid fields given")]
    NoUidFields,

    /// no record carries the requested uid value
    #[error("record not found: {field}={value}")]
    RecordNotFound { field: String, value: Value },
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn corrupted(path: &Path, reason: impl Into<String>) -> Self {
        StoreError::Corrupted {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// check if this error means "nothing there" rather than a real failure
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::NotInitialized(_) | StoreError::RecordNotFound { .. }
        )
    }

    /// check if the file content itself is bad
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            StoreError::Serialization(_) | StoreError::Corrupted { .. }
        )
    }

    /// OS error number for I/O failures, when the platform reports one
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            StoreError::Io { source, .. } => source.raw_os_error(),
            _ => None,
        }
    }
}

/// result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
