use std::{sync::Arc, time::Duration};

use movie_recommender::{
    api::{create_router, AppState},
    config::Config,
    data::MovieStore,
    services::TmdbProvider,
    session::SessionStore,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("movie_recommender=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // The service cannot run without both artifacts
    let store = MovieStore::load(&config.movie_data_path, &config.similarity_path)?;

    let provider = TmdbProvider::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
        config.tmdb_language.clone(),
    );
    let sessions = SessionStore::new(Duration::from_secs(config.session_idle_secs));

    let state = AppState::new(
        store,
        Arc::new(provider),
        sessions,
        config.tmdb_image_url.clone(),
    );
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
