//! Error types for the notebook service.
//!
//! Store failures propagate up to the service facade, which reports them to
//! callers as plain messages. Enrichment failures never get this far; see
//! `wikipedia_client::EnrichmentError`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The persisted document is not a valid store
    #[error("note database {path} is corrupt: {reason}")]
    Corruption { path: PathBuf, reason: String },

    #[error("note database I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode note database: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corruption(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        StoreError::Corruption {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum NotebookError {
    /// A required field was empty; nothing was read or written
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("store worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl NotebookError {
    pub fn is_client_error(&self) -> bool {
        matches!(self, NotebookError::Validation(_))
    }
}
