//! Error types for the graft pipeline.

use thiserror::Error;

/// Top-level error type for the graft pipeline.
#[derive(Debug, Error)]
pub enum GraftError {
    #[error(transparent)]
    Fetch(#[from] UpstreamFetchError),

    #[error(transparent)]
    Conversion(#[from] VariableConversionError),

    #[error(transparent)]
    UnsupportedFramework(#[from] UnsupportedFrameworkError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Network or HTTP failure against the external design API.
///
/// Carries the HTTP status, when there was one, so callers can classify it for a
/// refresh-and-retry.
#[derive(Debug, Clone, Error)]
#[error("upstream fetch failed{}: {message}", .status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default())]
pub struct UpstreamFetchError {
    pub status: Option<u16>,
    pub message: String,
}

impl UpstreamFetchError {
    /// A failure with an HTTP status.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    /// A transport failure (no response).
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    /// 401/403: the credential was rejected and a refresh may help.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status, Some(401) | Some(403))
    }
}

/// A node of the design graph lacks what is needed to identify it. Recoverable: the
/// node is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedGraphError {
    #[error("node {} has no id", .name.as_deref().unwrap_or("<unnamed>"))]
    MissingId { name: Option<String> },

    #[error("node {id} has no name")]
    MissingName { id: String },

    #[error("duplicate node id {id}")]
    DuplicateNodeId { id: String },
}

/// A remote variable value could not be canonicalised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariableConversionError {
    #[error("variable {name} has no value for any mode")]
    MissingModeValue { name: String },

    #[error("variable {name} has a null value")]
    NullValue { name: String },

    #[error("variable {name} aliases unknown variable {alias_id}")]
    UnresolvedAlias { name: String, alias_id: String },

    #[error("variable {name} has a cyclic alias chain")]
    AliasCycle { name: String },

    #[error("variable {name} has an unsupported value shape: {shape}")]
    UnsupportedShape { name: String, shape: String },
}

/// The caller asked for a target the synthesiser does not know.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported framework: {0} (expected react, vue or angular)")]
pub struct UnsupportedFrameworkError(pub String);

/// Failure reported by a persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("record not found: {0}")]
    NotFound(String),

    #[error("record already exists: {0}")]
    Conflict(String),

    #[error("store backend error: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display() {
        let err = UpstreamFetchError::http(403, "forbidden");
        assert_eq!(err.to_string(), "upstream fetch failed (HTTP 403): forbidden");
        assert!(err.is_auth_failure());

        let err = UpstreamFetchError::transport("timed out");
        assert_eq!(err.to_string(), "upstream fetch failed: timed out");
        assert!(!err.is_auth_failure());
    }

    #[test]
    fn test_malformed_display() {
        let err = MalformedGraphError::MissingId { name: None };
        assert_eq!(err.to_string(), "node <unnamed> has no id");
    }

    #[test]
    fn test_graft_error_from() {
        let err: GraftError = UnsupportedFrameworkError("svelte".to_string()).into();
        assert!(matches!(err, GraftError::UnsupportedFramework(_)));
        assert!(err.to_string().contains("svelte"));
    }
}
