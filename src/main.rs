use axum::routing::{get, post};
use axum::Router;
use tracing_subscriber::EnvFilter;

use faq_search::api;
use faq_search::config::Config;
use faq_search::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    tracing::info!("FAQ store: {}", config.store_path.display());
    tracing::info!(
        "Embedding provider: {} ({}, dim {})",
        config.embedding.provider,
        config.embedding.base_url,
        config.embedding.dimension
    );
    tracing::info!(
        "Weights: tfidf {} / embedding {}",
        config.search.tfidf_weight,
        config.search.embedding_weight
    );

    let state = AppState::new(config.clone())?;

    // First build happens before the listener binds, so no search is ever
    // served against a missing or half-built index.
    let snapshot = state.rebuild_index().await?;
    if snapshot.is_empty() {
        tracing::warn!("FAQ corpus is empty; searches will return no results");
    }

    let app = Router::new()
        .route("/api/search", post(api::search::search))
        .route("/api/faqs", get(api::faqs::list_faqs))
        .route("/api/faqs", post(api::faqs::add_faq))
        .route("/api/faqs/{id}", get(api::faqs::get_faq))
        .route("/api/reindex", post(api::faqs::reindex))
        .route("/api/health", get(api::faqs::health))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
