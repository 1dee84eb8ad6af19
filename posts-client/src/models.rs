use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// A post as returned by the server. `title` is already cut to 10 characters.
pub struct Post {
    /// Post id.
    pub id: i64,
    /// Title preview.
    pub title: String,
    /// Full content.
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Partial update. `None` fields are left unchanged on the server.
pub struct PostEdit {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}
