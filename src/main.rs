use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use movie_clusters::{
    api::{create_router, AppState},
    config::Config,
    services::Catalog,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movie_clusters=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Clustering runs once here; a bad dataset stops the process before it serves
    let catalog = Catalog::load(&config.dataset_path, &config.cluster_config())
        .with_context(|| format!("Failed to build catalog from {}", config.dataset_path))?;

    let state = AppState::new(catalog, config.candidate_limit);
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!(address = %address, "Server listening");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
