use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::post::Post;

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) title: String,
    pub(crate) content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pagination {
    pub(crate) offset: u64,
    pub(crate) limit: u32,
}

/// Post storage. Listing is always newest (highest id) first.
#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError>;
    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError>;
    async fn list_posts(&self, pagination: Pagination) -> Result<Vec<Post>, DomainError>;
    /// Writes `post` over the stored row with the same id. `None` if that row is gone.
    async fn save_post(&self, post: Post) -> Result<Option<Post>, DomainError>;
    async fn delete_post(&self, id: i64) -> Result<bool, DomainError>;
    /// Store-wide reset for fixtures; not exposed over HTTP.
    async fn delete_all_posts(&self) -> Result<u64, DomainError>;
    /// Row count, reported at startup and used by fixtures.
    async fn total_posts(&self) -> Result<i64, DomainError>;
}

#[async_trait]
impl<R> PostRepository for Arc<R>
where
    R: PostRepository + ?Sized,
{
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        (**self).create_post(input).await
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        (**self).get_post(id).await
    }

    async fn list_posts(&self, pagination: Pagination) -> Result<Vec<Post>, DomainError> {
        (**self).list_posts(pagination).await
    }

    async fn save_post(&self, post: Post) -> Result<Option<Post>, DomainError> {
        (**self).save_post(post).await
    }

    async fn delete_post(&self, id: i64) -> Result<bool, DomainError> {
        (**self).delete_post(id).await
    }

    async fn delete_all_posts(&self) -> Result<u64, DomainError> {
        (**self).delete_all_posts().await
    }

    async fn total_posts(&self) -> Result<i64, DomainError> {
        (**self).total_posts().await
    }
}
