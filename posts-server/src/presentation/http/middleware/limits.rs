use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::middleware::map_response;
use axum::response::{IntoResponse, Response};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

use crate::presentation::http::app_error::AppError;

#[derive(Debug, Clone, Copy)]
pub(crate) struct HttpLimits {
    pub(crate) body_limit_bytes: usize,
    pub(crate) concurrency: usize,
    pub(crate) timeout: Duration,
}

/// Oversized bodies get 413, slow handlers 408.
pub(crate) fn apply_limits(router: Router, limits: HttpLimits) -> Router {
    router
        .layer(ConcurrencyLimitLayer::new(limits.concurrency))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            limits.timeout,
        ))
        .layer(map_response(timeout_envelope))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(limits.body_limit_bytes))
}

// The timeout layer answers with a bare status; handlers never return 408 themselves.
async fn timeout_envelope(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        return AppError::Timeout.into_response();
    }
    response
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::{HttpLimits, apply_limits};

    fn limited(timeout: Duration) -> Router {
        let router = Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_millis(500)).await;
                    "done"
                }),
            )
            .route("/fast", get(|| async { "done" }));
        apply_limits(
            router,
            HttpLimits {
                body_limit_bytes: 1024,
                concurrency: 4,
                timeout,
            },
        )
    }

    async fn get_path(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request must build"),
            )
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body must be readable");
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn slow_handler_gets_timeout_envelope() {
        let (status, body) = get_path(limited(Duration::from_millis(20)), "/slow").await;

        assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
        let body: Value = serde_json::from_slice(&body).expect("body must be json");
        assert_eq!(body, json!({"code": "408", "message": "Request timed out."}));
    }

    #[tokio::test]
    async fn fast_handler_passes_through() {
        let (status, body) = get_path(limited(Duration::from_secs(5)), "/fast").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"done");
    }
}
