use axum::extract::{FromRequest, FromRequestParts, Json, Path, Query};

use super::app_error::AppError;

/// `Json` whose rejections render as the standard error body.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub(crate) struct JsonBody<T>(pub(crate) T);

#[derive(FromRequestParts)]
#[from_request(via(Query), rejection(AppError))]
pub(crate) struct QueryParams<T>(pub(crate) T);

#[derive(FromRequestParts)]
#[from_request(via(Path), rejection(AppError))]
pub(crate) struct PathParam<T>(pub(crate) T);
