//! Client error types

use thiserror::Error;

/// User-facing text for any authorization failure. Shown verbatim,
/// never the raw server message.
pub const UNAUTHORIZED_NOTICE: &str = "No autorizado. Por favor, inicie sesión nuevamente.";

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Authentication required or rejected
    #[error("{}", UNAUTHORIZED_NOTICE)]
    Unauthorized,

    /// Server-reported business error
    #[error("{0}")]
    Api(String),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Client-side precondition failed; the request was never sent
    #[error("{0}")]
    Precondition(String),

    /// The same logical operation is already running
    #[error("Operación en curso: {0}")]
    InFlight(&'static str),

    /// Payload validation failed before submission
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

impl ClientError {
    /// Whether this error should surface as a permission-denied notice.
    /// Matches HTTP 401 mapping plus the backend's message markers.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            ClientError::Unauthorized => true,
            ClientError::Api(message) => {
                message.contains("No autorizado") || message.contains("Unauthorized")
            }
            _ => false,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
