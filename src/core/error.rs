use std::path::PathBuf;
use std::time::Duration;

/// Crate-wide Result type
pub type Result<T> = std::result::Result<T, E2eError>;

/// Main error type for the end-to-end harness
#[derive(thiserror::Error, Debug)]
pub enum E2eError {
    /// Shared state snapshot exists but could not be read
    #[error("failed to read shared state snapshot {path}: {source}")]
    StateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Shared state snapshot is not a JSON object
    #[error("shared state snapshot {path} is corrupt: {source}")]
    StateCorrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Shared state snapshot could not be written
    #[error("failed to persist shared state snapshot {path}: {source}")]
    StateWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Embedded fixture table failed to parse
    #[error("fixture table for '{connector}' is invalid: {source}")]
    FixtureParse {
        connector: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// Connector authentication file problems
    #[error("Connector auth error: {0}")]
    ConnectorAuth(String),

    /// A step needed a value an earlier step should have recorded
    #[error("shared state has no value for '{0}'")]
    MissingStateKey(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP middleware errors (retry layer)
    #[error("HTTP middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Actual response disagrees with the fixture expectation
    #[error("Response mismatch: {0}")]
    ResponseMismatch(String),

    /// Browser automation failed while following a redirect
    #[error("Redirection error: {0}")]
    Redirection(String),

    /// Return URL never matched within the configured bound
    #[error("timed out after {waited:?} waiting for URL matching '{pattern}'")]
    RedirectTimeout { pattern: String, waited: Duration },
}

impl E2eError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        E2eError::Configuration(msg.into())
    }

    pub fn connector_auth(msg: impl Into<String>) -> Self {
        E2eError::ConnectorAuth(msg.into())
    }

    pub fn missing_key(key: impl Into<String>) -> Self {
        E2eError::MissingStateKey(key.into())
    }

    pub fn mismatch(msg: impl Into<String>) -> Self {
        E2eError::ResponseMismatch(msg.into())
    }

    pub fn redirection(msg: impl Into<String>) -> Self {
        E2eError::Redirection(msg.into())
    }

    /// Errors that must abort the whole run rather than fail one case.
    ///
    /// Every dependent step reads the snapshot, so a snapshot that cannot be
    /// read, parsed or written invalidates the rest of the suite.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            E2eError::StateRead { .. } | E2eError::StateCorrupt { .. } | E2eError::StateWrite { .. }
        )
    }
}
