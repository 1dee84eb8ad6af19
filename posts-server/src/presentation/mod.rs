use std::sync::Arc;

use crate::application::post_service::PostService;
use crate::data::post_repository::PostRepository;

pub(crate) mod http;

pub(crate) type DynPostRepository = Arc<dyn PostRepository>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) post_service: Arc<PostService<DynPostRepository>>,
}

impl AppState {
    pub(crate) fn new(post_service: Arc<PostService<DynPostRepository>>) -> Self {
        Self { post_service }
    }

    pub(crate) fn from_repository(repo: DynPostRepository) -> Self {
        Self::new(Arc::new(PostService::new(repo)))
    }
}
