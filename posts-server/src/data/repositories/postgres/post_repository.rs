use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::data::post_repository::{NewPost, Pagination, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::Post;

#[derive(Debug, Clone)]
pub(crate) struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create_post(&self, input: NewPost) -> Result<Post, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (title, content)
            VALUES ($1, $2)
            RETURNING id, title, content
            "#,
        )
        .bind(input.title)
        .bind(input.content)
        .fetch_one(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        map_row_to_post(row)
    }

    async fn get_post(&self, id: i64) -> Result<Option<Post>, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, title, content
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        row.map(map_row_to_post).transpose()
    }

    async fn list_posts(&self, pagination: Pagination) -> Result<Vec<Post>, DomainError> {
        let limit = i64::from(pagination.limit);
        let offset = i64::try_from(pagination.offset).unwrap_or(i64::MAX);

        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, title, content
            FROM posts
            ORDER BY id DESC
            LIMIT $1
            OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        rows.into_iter().map(map_row_to_post).collect()
    }

    async fn save_post(&self, post: Post) -> Result<Option<Post>, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            UPDATE posts
            SET title = $2,
                content = $3
            WHERE id = $1
            RETURNING id, title, content
            "#,
        )
        .bind(post.id)
        .bind(post.title)
        .bind(post.content)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        row.map(map_row_to_post).transpose()
    }

    async fn delete_post(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all_posts(&self) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM posts")
            .execute(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        Ok(result.rows_affected())
    }

    async fn total_posts(&self) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await
            .map_err(map_post_db_error)
    }
}

fn map_row_to_post(row: PostRow) -> Result<Post, DomainError> {
    Post::new(row.id, row.title, row.content)
        .map_err(|err| DomainError::Unexpected(err.to_string()))
}

fn map_post_db_error(err: sqlx::Error) -> DomainError {
    DomainError::Unexpected(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::PostgresPostRepository;
    use crate::data::post_repository::{NewPost, Pagination, PostRepository};
    use crate::infrastructure::database::{create_pool, run_migrations};

    async fn repository() -> PostgresPostRepository {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let pool = create_pool(&url, 2).await.expect("pool must connect");
        run_migrations(&pool).await.expect("migrations must apply");
        let repo = PostgresPostRepository::new(pool);
        repo.delete_all_posts().await.expect("cleanup must succeed");
        repo
    }

    #[tokio::test]
    #[ignore = "requires running PostgreSQL (DATABASE_URL)"]
    async fn postgres_round_trip() {
        let repo = repository().await;

        let first = repo
            .create_post(NewPost {
                title: "foo".to_string(),
                content: "bar".to_string(),
            })
            .await
            .expect("insert must succeed");
        let second = repo
            .create_post(NewPost {
                title: "foo2".to_string(),
                content: "bar2".to_string(),
            })
            .await
            .expect("insert must succeed");
        assert!(second.id > first.id);

        let listed = repo
            .list_posts(Pagination {
                offset: 0,
                limit: 10,
            })
            .await
            .expect("list must succeed");
        let ids: Vec<i64> = listed.iter().map(|post| post.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);

        let mut edited = first.clone();
        edited.title = "changed".to_string();
        let saved = repo
            .save_post(edited)
            .await
            .expect("save must succeed")
            .expect("row must exist");
        assert_eq!(saved.title, "changed");
        assert_eq!(saved.content, "bar");

        assert!(repo.delete_post(first.id).await.expect("delete must succeed"));
        assert!(!repo.delete_post(first.id).await.expect("delete must succeed"));
        assert_eq!(repo.total_posts().await.expect("count must succeed"), 1);
    }
}
