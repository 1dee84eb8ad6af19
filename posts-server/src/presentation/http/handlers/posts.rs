use std::borrow::Cow;

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Deserializer, Serialize, de};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::domain::post::{PostCreate, PostEdit, PostResponse, PostSearch, is_blank};
use crate::presentation::AppState;
use crate::presentation::http::app_error::{AppResult, ErrorBody};
use crate::presentation::http::extract::{JsonBody, PathParam, QueryParams};

const TITLE_REQUIRED: &str = "Please enter a title.";
const CONTENT_REQUIRED: &str = "Please enter the content.";

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct PostCreateDto {
    #[validate(
        required(message = "Please enter a title."),
        custom(function = "title_not_blank")
    )]
    pub(crate) title: Option<String>,
    #[validate(
        required(message = "Please enter the content."),
        custom(function = "content_not_blank")
    )]
    pub(crate) content: Option<String>,
}

/// Absent fields are left untouched; there is no way to clear a field.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct PostEditDto {
    #[validate(custom(function = "title_not_blank"))]
    pub(crate) title: Option<String>,
    #[validate(custom(function = "content_not_blank"))]
    pub(crate) content: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub(crate) struct PostSearchQuery {
    /// 1-based page number, values below 1 read as 1.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub(crate) page: Option<i64>,
    /// Page size, capped at 2000. Zero or less returns no posts.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub(crate) size: Option<i64>,
}

/// `?page=` reads the same as a missing `page`.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PostDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
}

impl From<PostResponse> for PostDto {
    fn from(post: PostResponse) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
        }
    }
}

impl From<PostCreateDto> for PostCreate {
    fn from(dto: PostCreateDto) -> Self {
        Self {
            title: dto.title.unwrap_or_default(),
            content: dto.content.unwrap_or_default(),
        }
    }
}

impl From<PostEditDto> for PostEdit {
    fn from(dto: PostEditDto) -> Self {
        Self {
            title: dto.title,
            content: dto.content,
        }
    }
}

impl From<PostSearchQuery> for PostSearch {
    fn from(query: PostSearchQuery) -> Self {
        PostSearch::new(query.page, query.size)
    }
}

fn title_not_blank(value: &str) -> Result<(), ValidationError> {
    not_blank(value, TITLE_REQUIRED)
}

fn content_not_blank(value: &str) -> Result<(), ValidationError> {
    not_blank(value, CONTENT_REQUIRED)
}

fn not_blank(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed(message)));
    }
    Ok(())
}

#[utoipa::path(
    post,
    path = "/posts",
    tag = "posts",
    request_body = PostCreateDto,
    responses(
        (status = 200, description = "Post created"),
        (status = 400, description = "Validation error", body = ErrorBody)
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    JsonBody(dto): JsonBody<PostCreateDto>,
) -> AppResult<StatusCode> {
    dto.validate()?;

    state.post_service.write(PostCreate::from(dto)).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    get,
    path = "/posts/{post_id}",
    tag = "posts",
    params(
        ("post_id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post found", body = PostDto),
        (status = 404, description = "Post not found", body = ErrorBody)
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    PathParam(post_id): PathParam<i64>,
) -> AppResult<Json<PostDto>> {
    let post = state.post_service.get(post_id).await?;

    Ok(Json(PostDto::from(post)))
}

#[utoipa::path(
    get,
    path = "/posts",
    tag = "posts",
    params(PostSearchQuery),
    responses(
        (status = 200, description = "Newest posts first", body = [PostDto]),
        (status = 400, description = "Malformed query", body = ErrorBody)
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<PostSearchQuery>,
) -> AppResult<Json<Vec<PostDto>>> {
    let posts = state.post_service.get_list(query.into()).await?;

    Ok(Json(posts.into_iter().map(PostDto::from).collect()))
}

#[utoipa::path(
    patch,
    path = "/posts/{post_id}",
    tag = "posts",
    params(
        ("post_id" = i64, Path, description = "Post id")
    ),
    request_body = PostEditDto,
    responses(
        (status = 200, description = "Post edited"),
        (status = 400, description = "Validation error", body = ErrorBody),
        (status = 404, description = "Post not found", body = ErrorBody)
    )
)]
pub(crate) async fn edit_post(
    State(state): State<AppState>,
    PathParam(post_id): PathParam<i64>,
    JsonBody(dto): JsonBody<PostEditDto>,
) -> AppResult<StatusCode> {
    dto.validate()?;

    state.post_service.edit(post_id, dto.into()).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    delete,
    path = "/posts/{post_id}",
    tag = "posts",
    params(
        ("post_id" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post deleted"),
        (status = 404, description = "Post not found", body = ErrorBody)
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    PathParam(post_id): PathParam<i64>,
) -> AppResult<StatusCode> {
    state.post_service.delete(post_id).await?;
    Ok(StatusCode::OK)
}
