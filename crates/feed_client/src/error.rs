use thiserror::Error;

/// Failure surface of the backend API client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("undecodable response body: {0}")]
    InvalidBody(String),
    /// The backend rejected the request with a human-readable message,
    /// carried verbatim so the user can correct their input.
    #[error("{detail}")]
    Rejected { detail: String },
}

impl ApiError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return ApiError::Timeout(err.to_string());
        }
        if err.is_decode() {
            return ApiError::InvalidBody(err.to_string());
        }
        ApiError::Network(err.to_string())
    }
}
