use super::error::DomainError;

pub(crate) const TITLE_PREVIEW_CHARS: usize = 10;
pub(crate) const DEFAULT_PAGE_SIZE: u32 = 10;
pub(crate) const MAX_PAGE_SIZE: u32 = 2000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Post {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
}

impl Post {
    pub(crate) fn new(
        id: i64,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Self, DomainError> {
        if id <= 0 {
            return Err(DomainError::Validation {
                field: "id",
                message: "must be > 0".to_string(),
            });
        }
        let title = require_text("title", title.into())?;
        let content = require_text("content", content.into())?;

        Ok(Self { id, title, content })
    }

    /// Overwrites only the fields present in `edit`.
    pub(crate) fn apply_edit(&mut self, edit: PostEdit) {
        if let Some(title) = edit.title {
            self.title = title;
        }
        if let Some(content) = edit.content {
            self.content = content;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PostCreate {
    pub(crate) title: String,
    pub(crate) content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PostEdit {
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
}

/// Page request. `page` is 1-based; a `size` of zero or less yields an empty page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PostSearch {
    page: u64,
    size: u32,
}

impl PostSearch {
    pub(crate) fn new(page: Option<i64>, size: Option<i64>) -> Self {
        let page = page.unwrap_or(1).max(1) as u64;
        let size = size
            .unwrap_or(DEFAULT_PAGE_SIZE as i64)
            .clamp(0, MAX_PAGE_SIZE as i64) as u32;
        Self { page, size }
    }

    pub(crate) fn page(&self) -> u64 {
        self.page
    }

    pub(crate) fn size(&self) -> u32 {
        self.size
    }

    pub(crate) fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.size as u64)
    }
}

impl Default for PostSearch {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PostResponse {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title.chars().take(TITLE_PREVIEW_CHARS).collect(),
            content: post.content,
        }
    }
}

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn require_text(field: &'static str, value: String) -> Result<String, DomainError> {
    if is_blank(&value) {
        return Err(DomainError::Validation {
            field,
            message: "must not be blank".to_string(),
        });
    }
    Ok(value)
}
