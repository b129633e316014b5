use std::sync::Arc;

use anyhow::Result;
use sqlx::PgPool;
use tracing::{info, warn};

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::blog_service::BlogService;
use data::post_repository::DynPostRepository;
use data::repositories::memory::post_repository::InMemoryPostRepository;
use data::repositories::postgres::post_repository::PostgresPostRepository;
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let (repo, pool) = build_repository(&settings).await?;
    let state = AppState::new(Arc::new(BlogService::new(repo)));

    server::run_http(&settings, state).await?;

    if let Some(pool) = pool {
        pool.close().await;
        info!("database pool closed");
    }
    Ok(())
}

async fn build_repository(settings: &Settings) -> Result<(DynPostRepository, Option<PgPool>)> {
    let Some(database_url) = settings.database_url.as_deref() else {
        warn!("DATABASE_URL is not set, posts are kept in memory only");
        let repo: DynPostRepository = Arc::new(InMemoryPostRepository::new());
        return Ok((repo, None));
    };

    let pool = create_pool(database_url, settings.database_max_connections).await?;
    run_migrations(&pool).await?;
    info!("connected to PostgreSQL, migrations applied");

    let repo: DynPostRepository = Arc::new(PostgresPostRepository::new(pool.clone()));
    Ok((repo, Some(pool)))
}
