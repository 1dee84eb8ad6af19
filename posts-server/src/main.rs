use std::sync::Arc;

use anyhow::Result;
use tracing::info;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use data::post_repository::PostRepository;
use data::repositories::memory::post_repository::InMemoryPostRepository;
use data::repositories::postgres::post_repository::PostgresPostRepository;
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::logging::init_logging;
use infrastructure::settings::{Settings, StoreBackend};
use presentation::{AppState, DynPostRepository};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level, settings.log_format)?;

    let repo: DynPostRepository = match &settings.store {
        StoreBackend::Postgres {
            database_url,
            max_connections,
        } => {
            let pool = create_pool(database_url, *max_connections).await?;
            run_migrations(&pool).await?;
            info!("using PostgreSQL post store");
            Arc::new(PostgresPostRepository::new(pool))
        }
        StoreBackend::Memory => {
            info!("using in-memory post store");
            Arc::new(InMemoryPostRepository::new())
        }
    };
    info!(posts = repo.total_posts().await?, "post store ready");

    server::run_http(&settings, AppState::from_repository(repo)).await
}
