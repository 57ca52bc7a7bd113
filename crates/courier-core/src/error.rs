//! Error types for the Courier core.

/// Core error type for Courier request-URL construction.
#[derive(Debug, thiserror::Error)]
pub enum CourierError {
    /// A literal URL, or a base path that looks like a URL, could not be parsed.
    #[error("invalid request url: {0}")]
    InvalidUrl(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal error with context.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Convenience result type for Courier operations.
pub type CourierResult<T> = Result<T, CourierError>;
