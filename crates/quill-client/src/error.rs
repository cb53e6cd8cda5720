use reqwest::StatusCode;
use thiserror::Error;

use quill_shared::ErrorResponse;

/// Failures of a client round trip. The cache is never touched when one is returned.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("authentication required")]
    Unauthorized,

    #[error("not permitted to modify this post")]
    Forbidden,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("server error (status {status}): {message}")]
    Server { status: u16, message: String },

    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Map a non-success response onto the error taxonomy.
    pub(crate) fn from_response(status: StatusCode, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<ErrorResponse>(body)
            .map(|problem| problem.message().to_string())
            .unwrap_or_else(|_| String::from_utf8_lossy(body).into_owned());

        match status {
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => Self::Validation(message),
            StatusCode::UNAUTHORIZED => Self::Unauthorized,
            StatusCode::FORBIDDEN => Self::Forbidden,
            StatusCode::NOT_FOUND => Self::NotFound(message),
            other => Self::Server {
                status: other.as_u16(),
                message,
            },
        }
    }
}
