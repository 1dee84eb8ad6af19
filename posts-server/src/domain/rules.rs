use super::error::DomainError;
use super::post::PostCreate;

pub(crate) const FORBIDDEN_TITLE_WORD: &str = "바보";

/// A business check run against every new post before it is stored.
pub(crate) trait CreateRule: Send + Sync {
    fn check(&self, post: &PostCreate) -> Result<(), DomainError>;
}

#[derive(Debug, Clone)]
pub(crate) struct ForbiddenTitleWord {
    word: String,
}

impl ForbiddenTitleWord {
    pub(crate) fn new(word: impl Into<String>) -> Self {
        Self { word: word.into() }
    }
}

impl CreateRule for ForbiddenTitleWord {
    fn check(&self, post: &PostCreate) -> Result<(), DomainError> {
        if post.title.contains(&self.word) {
            return Err(DomainError::Validation {
                field: "title",
                message: format!("Title must not contain '{}'.", self.word),
            });
        }
        Ok(())
    }
}

pub(crate) fn default_create_rules() -> Vec<Box<dyn CreateRule>> {
    vec![Box::new(ForbiddenTitleWord::new(FORBIDDEN_TITLE_WORD))]
}

pub(crate) fn check_all(rules: &[Box<dyn CreateRule>], post: &PostCreate) -> Result<(), DomainError> {
    rules.iter().try_for_each(|rule| rule.check(post))
}
