use utoipa::OpenApi;

use crate::presentation::http::app_error::ErrorBody;
use crate::presentation::http::handlers::posts::{PostCreateDto, PostDto, PostEditDto};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::handlers::posts::create_post,
        crate::presentation::http::handlers::posts::get_post,
        crate::presentation::http::handlers::posts::list_posts,
        crate::presentation::http::handlers::posts::edit_post,
        crate::presentation::http::handlers::posts::delete_post
    ),
    components(schemas(PostCreateDto, PostEditDto, PostDto, ErrorBody)),
    tags(
        (name = "posts", description = "Post endpoints")
    )
)]
pub(crate) struct ApiDoc;
