//! Custom error types shared across the Reelshare crates
//!
//! `BackendError` describes failures at the HTTP boundary; `GatewayError`
//! is the single error shape gateway callers see, with the failed operation
//! embedded in the message.

use thiserror::Error;

/// Error raised by the backend HTTP client
#[derive(Error, Debug)]
pub enum BackendError {
    /// The backend answered with a non-success status
    #[error("backend responded with status {status}: {message}")]
    Api { status: u16, message: String },

    /// The request never produced a usable response
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A URL could not be built from the configured endpoint
    #[error("invalid endpoint configuration: {0}")]
    InvalidEndpoint(String),

    /// A local file selected for upload could not be read
    #[error("failed to read '{path}': {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl BackendError {
    /// True when the backend rejected the request for lack of a valid session
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, BackendError::Api { status: 401, .. })
    }
}

/// Error surfaced to gateway callers
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The underlying backend call failed during the named operation
    #[error("Failed to {operation}: {message}")]
    Backend { operation: &'static str, message: String },

    /// The backend succeeded but returned nothing where a value is required
    #[error("Failed to {operation}: empty result from backend")]
    EmptyResult { operation: &'static str },

    /// A file-kind string other than "image" or "video"
    #[error("invalid file kind '{0}', expected 'image' or 'video'")]
    InvalidFileKind(String),

    /// Caller-supplied input rejected before any network call
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl GatewayError {
    /// Wrap a backend failure with the name of the operation that issued it
    pub fn backend(operation: &'static str, source: impl std::fmt::Display) -> Self {
        GatewayError::Backend {
            operation,
            message: source.to_string(),
        }
    }
}

/// Type alias for Result with GatewayError
pub type GatewayResult<T> = Result<T, GatewayError>;
