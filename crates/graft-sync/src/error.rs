//! Error types for the sync service.

use graft_core::{StoreError, UpstreamFetchError};
use thiserror::Error;

/// Result type alias for sync operations.
pub type Result<T> = std::result::Result<T, SyncError>;

/// Errors that abort a sync call. Per-item failures never show up here; they are
/// collected in the call's report.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Fetch(#[from] UpstreamFetchError),

    #[error("credential error for {identity}: {message}")]
    Credential { identity: String, message: String },

    #[error(transparent)]
    Parse(#[from] graft_parser::ParseError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SyncError {
    pub fn credential(identity: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Credential {
            identity: identity.into(),
            message: message.into(),
        }
    }
}
