use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::data::post_repository::{NewPost, Pagination, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::Post;

#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    rows: BTreeMap<i64, Post>,
}

/// Process-local store. Ids keep growing after deletes, like a sequence.
#[derive(Debug, Default)]
pub(crate) struct InMemoryPostRepository {
    table: RwLock<Table>,
}

impl InMemoryPostRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let mut table = self.table.write().await;
        let id = table.last_id + 1;
        let post = Post::new(id, input.title, input.content)?;
        table.last_id = id;
        table.rows.insert(id, post.clone());
        Ok(post)
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn list_posts(&self, pagination: Pagination) -> Result<Vec<Post>, DomainError> {
        let table = self.table.read().await;
        let skip = usize::try_from(pagination.offset).unwrap_or(usize::MAX);

        Ok(table
            .rows
            .values()
            .rev()
            .skip(skip)
            .take(pagination.limit as usize)
            .cloned()
            .collect())
    }

    async fn save_post(&self, post: Post) -> Result<Option<Post>, DomainError> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&post.id) {
            Some(row) => {
                *row = post.clone();
                Ok(Some(post))
            }
            None => Ok(None),
        }
    }

    async fn delete_post(&self, id: i64) -> Result<bool, DomainError> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn delete_all_posts(&self) -> Result<u64, DomainError> {
        let mut table = self.table.write().await;
        let removed = table.rows.len() as u64;
        table.rows.clear();
        Ok(removed)
    }

    async fn total_posts(&self) -> Result<i64, DomainError> {
        Ok(self.table.read().await.rows.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::InMemoryPostRepository;
    use crate::data::post_repository::{NewPost, Pagination, PostRepository};
    use crate::domain::error::DomainError;
    use crate::domain::post::Post;

    async fn seed(repo: &InMemoryPostRepository, count: usize) {
        for i in 1..=count {
            repo.create_post(NewPost {
                title: format!("title {i}"),
                content: format!("content {i}"),
            })
            .await
            .expect("insert must succeed");
        }
    }

    #[tokio::test]
    async fn create_post_assigns_increasing_ids() {
        let repo = InMemoryPostRepository::new();
        seed(&repo, 3).await;

        let post = repo
            .get_post(3)
            .await
            .expect("get must succeed")
            .expect("post must exist");
        assert_eq!(post.title, "title 3");
        assert_eq!(repo.total_posts().await.expect("count"), 3);
    }

    #[tokio::test]
    async fn create_post_rejects_blank_fields() {
        let repo = InMemoryPostRepository::new();
        let err = repo
            .create_post(NewPost {
                title: " ".to_string(),
                content: "content".to_string(),
            })
            .await
            .expect_err("blank title must be rejected");
        assert!(matches!(err, DomainError::Validation { field: "title", .. }));
        assert_eq!(repo.total_posts().await.expect("count"), 0);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = InMemoryPostRepository::new();
        seed(&repo, 2).await;
        assert!(repo.delete_post(2).await.expect("delete"));

        let post = repo
            .create_post(NewPost {
                title: "again".to_string(),
                content: "body".to_string(),
            })
            .await
            .expect("insert must succeed");
        assert_eq!(post.id, 3);
    }

    #[tokio::test]
    async fn list_posts_is_newest_first_with_offset() {
        let repo = InMemoryPostRepository::new();
        seed(&repo, 30).await;

        let page = repo
            .list_posts(Pagination {
                offset: 10,
                limit: 10,
            })
            .await
            .expect("list must succeed");
        let ids: Vec<i64> = page.iter().map(|post| post.id).collect();
        assert_eq!(ids, (11..=20).rev().collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn list_posts_past_the_end_is_empty() {
        let repo = InMemoryPostRepository::new();
        seed(&repo, 3).await;

        let page = repo
            .list_posts(Pagination {
                offset: u64::MAX,
                limit: 10,
            })
            .await
            .expect("list must succeed");
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn save_post_overwrites_existing_row_only() {
        let repo = InMemoryPostRepository::new();
        seed(&repo, 1).await;

        let edited = Post::new(1, "new", "body").expect("valid post");
        let saved = repo.save_post(edited).await.expect("save must succeed");
        assert_eq!(saved.map(|post| post.title), Some("new".to_string()));

        let missing = Post::new(99, "new", "body").expect("valid post");
        assert!(repo.save_post(missing).await.expect("save").is_none());
        assert_eq!(repo.total_posts().await.expect("count"), 1);
    }

    #[tokio::test]
    async fn delete_all_posts_reports_removed_rows() {
        let repo = InMemoryPostRepository::new();
        seed(&repo, 4).await;

        assert_eq!(repo.delete_all_posts().await.expect("delete all"), 4);
        assert_eq!(repo.total_posts().await.expect("count"), 0);
        assert!(!repo.delete_post(1).await.expect("delete"));
    }
}
