//! # Hearth API Server
//!
//! This is the main API server for the Hearth property marketplace,
//! providing listing CRUD endpoints with image upload and static serving
//! of the uploaded files.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p hearth-api
//! ```

use hearth_api::{
    app::{build_router, AppState},
    config::Config,
};
use hearth_shared::db::{
    migrations::run_migrations,
    pool::{DatabaseConfig, Store},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hearth_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Hearth API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let store = Store::new(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    });
    let pool = store.connect().await?;

    run_migrations(&pool).await?;

    let state = AppState::new(pool, config.clone());
    state.intake.ensure_root().await?;

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutdown signal received, exiting...");
}
