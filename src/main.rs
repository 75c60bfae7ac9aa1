//! Todo API server binary.

use sqlx::PgPool;
use todo_api::{AppConfig, AppState, PostgresTodoRepository, TodoService, router};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    let pool = PgPool::connect(&config.database_url).await?;
    let repo = PostgresTodoRepository::new(pool);
    repo.migrate().await?;

    let state = AppState::new(TodoService::new(repo));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "todo API listening");
    axum::serve(listener, app).await?;

    Ok(())
}
