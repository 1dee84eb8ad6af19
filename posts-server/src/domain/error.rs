use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum DomainError {
    #[error("validation failed for '{field}': {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("unexpected domain error: {0}")]
    Unexpected(String),
}

impl DomainError {
    pub(crate) fn post_not_found(id: i64) -> Self {
        DomainError::NotFound(format!("post id: {id}"))
    }
}
