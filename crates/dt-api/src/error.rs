//! Error types for the Disruptive Technologies API client

/// Errors surfaced by the API client.
///
/// The client performs no recovery. Transport failures, non-2xx responses and
/// undecodable bodies are forwarded to the caller as-is.
#[derive(Debug, thiserror::Error)]
pub enum DtApiError {
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid timestamp: {0}")]
    Timestamp(String),
}

impl DtApiError {
    /// HTTP status code, if the server answered with a non-2xx response
    pub fn status(&self) -> Option<u16> {
        match self {
            DtApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias for API client operations
pub type Result<T> = std::result::Result<T, DtApiError>;
