//! Client library for the posts server HTTP API.
//!
//! [`PostsClient`] wraps the five post endpoints and turns the server's error
//! envelope into [`PostsClientError`].
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;

pub use error::{PostsClientError, PostsClientResult};
pub use http_client::PostsClient;
pub use models::{Post, PostEdit};
