use std::collections::BTreeMap;

use crate::domain::error::DomainError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};
use utoipa::ToSchema;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("request timed out")]
    Timeout,
}

pub(crate) type AppResult<T> = Result<T, AppError>;

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorKind {
    InvalidRequest,
    NotFound,
    Timeout,
    Internal,
}

impl ErrorKind {
    fn status(self) -> StatusCode {
        match self {
            ErrorKind::InvalidRequest => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Timeout => StatusCode::REQUEST_TIMEOUT,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(self) -> &'static str {
        match self {
            ErrorKind::InvalidRequest => "Invalid request.",
            ErrorKind::NotFound => "Post not found.",
            ErrorKind::Timeout => "Request timed out.",
            ErrorKind::Internal => "Internal server error.",
        }
    }
}

/// Error envelope shared by every failing endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ErrorBody {
    pub(crate) code: String,
    pub(crate) message: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub(crate) validation: BTreeMap<String, String>,
}

impl AppError {
    fn into_parts(self) -> (ErrorKind, BTreeMap<String, String>) {
        match self {
            AppError::Domain(DomainError::Validation { field, message }) => (
                ErrorKind::InvalidRequest,
                BTreeMap::from([(field.to_string(), message)]),
            ),
            AppError::Domain(DomainError::NotFound(resource)) => {
                debug!(%resource, "resource not found");
                (ErrorKind::NotFound, BTreeMap::new())
            }
            AppError::Domain(DomainError::Unexpected(detail)) => {
                error!(%detail, "unexpected domain error");
                (ErrorKind::Internal, BTreeMap::new())
            }
            AppError::Validation(errors) => (ErrorKind::InvalidRequest, field_messages(&errors)),
            AppError::BadRequest(detail) => {
                debug!(%detail, "request rejected");
                (ErrorKind::InvalidRequest, BTreeMap::new())
            }
            AppError::Timeout => {
                debug!("request timed out");
                (ErrorKind::Timeout, BTreeMap::new())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (kind, validation) = self.into_parts();
        let status = kind.status();
        let body = ErrorBody {
            code: status.as_u16().to_string(),
            message: kind.message().to_string(),
            validation,
        };

        (status, Json(body)).into_response()
    }
}

fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, String> {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            errs.first().map(|err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                (field.to_string(), message)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use serde_json::{Value, json};
    use validator::{ValidationError, ValidationErrors};

    use super::AppError;
    use crate::domain::error::DomainError;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body must be readable");
        let body = serde_json::from_slice(&bytes).expect("body must be json");
        (status, body)
    }

    #[tokio::test]
    async fn not_found_maps_to_404_envelope() {
        let (status, body) = render(DomainError::post_not_found(9).into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"code": "404", "message": "Post not found."}));
    }

    #[tokio::test]
    async fn domain_validation_maps_to_field_message() {
        let err = DomainError::Validation {
            field: "title",
            message: "Title must not contain '바보'.".to_string(),
        };
        let (status, body) = render(err.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "400");
        assert_eq!(body["message"], "Invalid request.");
        assert_eq!(body["validation"]["title"], "Title must not contain '바보'.");
    }

    #[tokio::test]
    async fn validator_errors_keep_one_message_per_field() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "title",
            ValidationError::new("blank").with_message(Cow::Borrowed("Please enter a title.")),
        );
        errors.add("content", ValidationError::new("blank"));

        let (status, body) = render(AppError::Validation(errors)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["validation"]["title"], "Please enter a title.");
        assert_eq!(body["validation"]["content"], "blank");
    }

    #[tokio::test]
    async fn internal_errors_hide_details() {
        let err = DomainError::Unexpected("connection refused".to_string());
        let (status, body) = render(err.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"code": "500", "message": "Internal server error."}));
    }

    #[tokio::test]
    async fn timeout_maps_to_408_envelope() {
        let (status, body) = render(AppError::Timeout).await;
        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
        assert_eq!(body, json!({"code": "408", "message": "Request timed out."}));
    }

    #[tokio::test]
    async fn bad_request_has_no_validation_map() {
        let (status, body) = render(AppError::BadRequest("broken json".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.get("validation").is_none());
    }
}
