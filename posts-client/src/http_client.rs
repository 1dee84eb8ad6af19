use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Deserialize, Serialize};

use crate::error::{PostsClientError, PostsClientResult};
use crate::models::{Post, PostEdit};

#[derive(Debug, Serialize)]
struct PostCreateDto<'a> {
    title: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    message: Option<String>,
    #[serde(default)]
    validation: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct PostDto {
    id: i64,
    title: String,
    content: String,
}

#[derive(Serialize)]
struct ListPostsQuery {
    page: u32,
    size: u32,
}

impl From<PostDto> for Post {
    fn from(value: PostDto) -> Self {
        Self {
            id: value.id,
            title: value.title,
            content: value.content,
        }
    }
}

#[derive(Debug, Clone)]
/// HTTP client for the posts REST API.
pub struct PostsClient {
    base_url: String,
    client: Client,
}

impl PostsClient {
    /// Builds a client for a server base URL such as `http://127.0.0.1:8080`.
    pub fn new(base_url: impl Into<String>) -> PostsClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.endpoint(path))
    }

    async fn decode_error(response: Response) -> PostsClientError {
        let status = response.status();

        match response.json::<ErrorResponseDto>().await {
            Ok(body) => PostsClientError::from_http_status(status, body.message, body.validation),
            Err(_) => PostsClientError::from_http_status(status, None, BTreeMap::new()),
        }
    }

    async fn send(request: RequestBuilder) -> PostsClientResult<Response> {
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }
        Ok(response)
    }

    /// Creates a post. The server answers with an empty body.
    pub async fn create_post(&self, title: &str, content: &str) -> PostsClientResult<()> {
        let payload = PostCreateDto { title, content };
        Self::send(self.request(Method::POST, "/posts").json(&payload)).await?;
        Ok(())
    }

    /// Fetches one post.
    pub async fn get_post(&self, id: i64) -> PostsClientResult<Post> {
        let response = Self::send(self.request(Method::GET, &format!("/posts/{id}"))).await?;
        let dto = response.json::<PostDto>().await?;
        Ok(dto.into())
    }

    /// Lists posts newest first. `page` is 1-based.
    pub async fn list_posts(&self, page: u32, size: u32) -> PostsClientResult<Vec<Post>> {
        let query = ListPostsQuery { page, size };
        let response = Self::send(self.request(Method::GET, "/posts").query(&query)).await?;
        let dtos = response.json::<Vec<PostDto>>().await?;
        Ok(dtos.into_iter().map(Post::from).collect())
    }

    /// Applies a partial update.
    pub async fn edit_post(&self, id: i64, edit: &PostEdit) -> PostsClientResult<()> {
        Self::send(
            self.request(Method::PATCH, &format!("/posts/{id}"))
                .json(edit),
        )
        .await?;
        Ok(())
    }

    /// Deletes a post.
    pub async fn delete_post(&self, id: i64) -> PostsClientResult<()> {
        Self::send(self.request(Method::DELETE, &format!("/posts/{id}"))).await?;
        Ok(())
    }
}
