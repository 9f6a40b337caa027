//! Typed failures for each boundary of the client.
//!
//! Every layer returns its own enum so callers decide whether to retry,
//! surface, or ignore a failure instead of the layer swallowing it.

use thiserror::Error;

/// Failure while loading `AppConfig` from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set in production")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Failure of the durable client storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage entry could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Failure of a request issued through `ApiClient`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure: connection refused, timeout, TLS, invalid URL.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The backend answered with a non-success status.
    #[error("server returned {status}: {}", message.as_deref().unwrap_or("no message"))]
    Status { status: u16, message: Option<String> },
    /// The body could not be decoded into the expected type.
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    /// A multipart request body could not be assembled.
    #[error("invalid multipart body: {0}")]
    Multipart(String),
}

impl ApiError {
    /// HTTP status of a backend rejection, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Server-provided message of a backend rejection.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Generic message surfaced when a failed login carries no server message.
pub const LOGIN_FAILED: &str = "login failed";

/// Failure of a session operation.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Credentials were rejected or the login request failed. Holds the
    /// server's message, or `LOGIN_FAILED`.
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<ApiError> for AuthError {
    fn from(e: ApiError) -> Self {
        let message = e
            .server_message()
            .map(str::to_string)
            .unwrap_or_else(|| LOGIN_FAILED.to_string());
        AuthError::Rejected(message)
    }
}

/// Failure while resolving a navigation.
#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("too many redirects while navigating to {0}")]
    RedirectLoop(String),
    #[error("no route matches {0}")]
    NoRoute(String),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
