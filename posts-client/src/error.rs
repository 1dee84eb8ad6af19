use std::collections::BTreeMap;

use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by `posts-client`.
pub enum PostsClientError {
    /// Transport failure (`reqwest`).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The post does not exist.
    #[error("not found")]
    NotFound,

    /// The server rejected the request; `validation` maps field to message.
    #[error("invalid request: {message}")]
    InvalidRequest {
        /// Top-level message from the error body.
        message: String,
        /// Per-field messages, empty when the error is not field-specific.
        validation: BTreeMap<String, String>,
    },

    /// Any other non-success status.
    #[error("server error {status}: {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Message from the error body or the status line.
        message: String,
    },
}

/// Result of `posts-client` operations.
pub type PostsClientResult<T> = Result<T, PostsClientError>;

impl PostsClientError {
    pub(crate) fn from_http_status(
        status: reqwest::StatusCode,
        message: Option<String>,
        validation: BTreeMap<String, String>,
    ) -> Self {
        let message = message.unwrap_or_else(|| format!("http status {status}"));
        match status {
            reqwest::StatusCode::NOT_FOUND => Self::NotFound,
            reqwest::StatusCode::BAD_REQUEST => Self::InvalidRequest {
                message,
                validation,
            },
            _ => Self::Server {
                status: status.as_u16(),
                message,
            },
        }
    }
}
