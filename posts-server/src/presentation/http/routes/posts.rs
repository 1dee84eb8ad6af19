use axum::Router;
use axum::routing::get;

use crate::presentation::AppState;
use crate::presentation::http::handlers::posts::{
    create_post, delete_post, edit_post, get_post, list_posts,
};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{post_id}",
            get(get_post).patch(edit_post).delete(delete_post),
        )
}
