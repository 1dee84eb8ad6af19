use std::process;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use posts_client::{Post, PostEdit, PostsClient, PostsClientError};

const DEFAULT_SERVER: &str = "http://127.0.0.1:8080";

#[derive(Debug, Parser)]
#[command(name = "posts-cli", version, about = "Command line client for posts-server")]
struct Cli {
    /// Server address; the scheme defaults to http.
    #[arg(long, global = true, env = "POSTS_SERVER")]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a post.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    /// Show one post.
    Get {
        #[arg(long)]
        id: i64,
    },
    /// List posts, newest first.
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        size: u32,
    },
    /// Edit a post. Omitted fields stay as they are.
    Edit {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Delete a post.
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    if let Err(err) = run(Cli::parse()).await {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let server = normalize_server(cli.server.unwrap_or_else(|| DEFAULT_SERVER.to_string()));
    let client = PostsClient::new(server).map_err(map_client_error)?;

    match cli.command {
        Command::Create { title, content } => {
            client
                .create_post(&title, &content)
                .await
                .map_err(map_client_error)?;
            println!("Post created");
        }
        Command::Get { id } => {
            let post = client.get_post(id).await.map_err(map_client_error)?;
            print_post(&post);
        }
        Command::List { page, size } => {
            let posts = client
                .list_posts(page, size)
                .await
                .map_err(map_client_error)?;
            print_list(page, &posts);
        }
        Command::Edit { id, title, content } => {
            let edit = build_edit(title, content)?;
            client
                .edit_post(id, &edit)
                .await
                .map_err(map_client_error)?;
            println!("Post edited: id={id}");
        }
        Command::Delete { id } => {
            client.delete_post(id).await.map_err(map_client_error)?;
            println!("Post deleted: id={id}");
        }
    }

    Ok(())
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn build_edit(title: Option<String>, content: Option<String>) -> Result<PostEdit> {
    if title.is_none() && content.is_none() {
        return Err(anyhow!("nothing to edit: pass --title and/or --content"));
    }
    Ok(PostEdit { title, content })
}

fn map_client_error(err: PostsClientError) -> anyhow::Error {
    let message = match err {
        PostsClientError::NotFound => "post not found".to_string(),
        PostsClientError::InvalidRequest {
            message,
            validation,
        } => {
            let mut text = format!("invalid request: {message}");
            for (field, reason) in validation {
                text.push_str(&format!("\n  {field}: {reason}"));
            }
            text
        }
        PostsClientError::Server { status, message } => {
            format!("server error {status}: {message}")
        }
        PostsClientError::Http(err) => format!("HTTP error: {err}"),
    };
    anyhow!(message)
}

fn print_post(post: &Post) {
    println!("id: {}", post.id);
    println!("title: {}", post.title);
    println!("content: {}", post.content);
}

fn print_list(page: u32, posts: &[Post]) {
    println!("Page {page}: {} post(s)", posts.len());

    for post in posts {
        println!("- [{}] {}", post.id, post.title);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn normalize_server_keeps_scheme() {
        let s = normalize_server("https://example.com:8080".to_string());
        assert_eq!(s, "https://example.com:8080");
    }

    #[test]
    fn normalize_server_adds_http_scheme() {
        let s = normalize_server("127.0.0.1:8080".to_string());
        assert_eq!(s, "http://127.0.0.1:8080");
    }

    #[test]
    fn build_edit_requires_a_field() {
        assert!(build_edit(None, None).is_err());

        let edit = build_edit(None, Some("bar2".to_string())).expect("content only is valid");
        assert_eq!(edit.title, None);
        assert_eq!(edit.content.as_deref(), Some("bar2"));
    }

    #[test]
    fn invalid_request_lists_field_messages() {
        let err = map_client_error(PostsClientError::InvalidRequest {
            message: "Invalid request.".to_string(),
            validation: BTreeMap::from([(
                "title".to_string(),
                "Please enter a title.".to_string(),
            )]),
        });
        let text = err.to_string();
        assert!(text.contains("Invalid request."));
        assert!(text.contains("title: Please enter a title."));
    }

    #[test]
    fn cli_parses_edit_with_content_only() {
        let cli = Cli::try_parse_from(["posts-cli", "edit", "--id", "3", "--content", "bar2"])
            .expect("args must parse");
        match cli.command {
            Command::Edit { id, title, content } => {
                assert_eq!(id, 3);
                assert!(title.is_none());
                assert_eq!(content.as_deref(), Some("bar2"));
            }
            other => panic!("expected edit command, got {other:?}"),
        }
    }
}
