use tracing::{debug, info};

use crate::data::post_repository::{NewPost, Pagination, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::post::{PostCreate, PostEdit, PostResponse, PostSearch};
use crate::domain::rules::{CreateRule, check_all, default_create_rules};

pub(crate) struct PostService<R: PostRepository> {
    repo: R,
    create_rules: Vec<Box<dyn CreateRule>>,
}

impl<R: PostRepository> PostService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self::with_rules(repo, default_create_rules())
    }

    pub(crate) fn with_rules(repo: R, create_rules: Vec<Box<dyn CreateRule>>) -> Self {
        Self { repo, create_rules }
    }

    pub(crate) async fn write(&self, req: PostCreate) -> Result<(), DomainError> {
        check_all(&self.create_rules, &req)?;

        let created = self
            .repo
            .create_post(NewPost {
                title: req.title,
                content: req.content,
            })
            .await?;
        info!(post_id = created.id, "post created");
        Ok(())
    }

    pub(crate) async fn get(&self, id: i64) -> Result<PostResponse, DomainError> {
        self.repo
            .get_post(id)
            .await?
            .map(PostResponse::from)
            .ok_or_else(|| DomainError::post_not_found(id))
    }

    pub(crate) async fn get_list(
        &self,
        search: PostSearch,
    ) -> Result<Vec<PostResponse>, DomainError> {
        debug!(page = search.page(), size = search.size(), "listing posts");
        let pagination = Pagination {
            offset: search.offset(),
            limit: search.size(),
        };
        let posts = self.repo.list_posts(pagination).await?;

        Ok(posts.into_iter().map(PostResponse::from).collect())
    }

    pub(crate) async fn edit(&self, id: i64, edit: PostEdit) -> Result<(), DomainError> {
        let mut post = self
            .repo
            .get_post(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;

        post.apply_edit(edit);

        // Row may have been deleted between the read and the write.
        self.repo
            .save_post(post)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;
        info!(post_id = id, "post edited");
        Ok(())
    }

    pub(crate) async fn delete(&self, id: i64) -> Result<(), DomainError> {
        self.repo
            .get_post(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;

        let deleted = self.repo.delete_post(id).await?;
        if !deleted {
            return Err(DomainError::post_not_found(id));
        }
        info!(post_id = id, "post deleted");
        Ok(())
    }
}
