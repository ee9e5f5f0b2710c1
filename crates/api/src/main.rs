use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use atreia_api::config::ServerConfig;
use atreia_api::router::build_app_router;
use atreia_api::state::AppState;
use atreia_gameapi::{CharacterSource, GameApiClient, GameApiConfig};
use atreia_pipeline::character::CacheSettings;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "atreia_api=debug,atreia_pipeline=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let game_api_config = GameApiConfig::from_env();
    tracing::info!(
        api_base_url = %game_api_config.api_base_url,
        timeout_secs = game_api_config.timeout_secs,
        "Loaded game API configuration"
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = atreia_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    atreia_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    atreia_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Upstream client ---
    let cache = CacheSettings {
        ttl_secs: config.cache_ttl_secs,
        image_host: game_api_config.image_host.clone(),
    };
    let source: Arc<dyn CharacterSource> =
        Arc::new(GameApiClient::new(game_api_config).expect("Failed to build game API client"));

    // --- Scheduled collector ---
    let collector_cancel = CancellationToken::new();
    let collector_handle = if config.collector_interval_secs > 0 {
        let cancel = collector_cancel.clone();
        Some(tokio::spawn(atreia_api::background::collector::run(
            pool.clone(),
            Arc::clone(&source),
            cache.image_host.clone(),
            Duration::from_secs(config.collector_interval_secs),
            cancel,
        )))
    } else {
        tracing::info!("Scheduled collector disabled (COLLECTOR_INTERVAL_SECS=0)");
        None
    };

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        source,
        cache: Arc::new(cache),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    collector_cancel.cancel();
    if let Some(handle) = collector_handle {
        let _ = tokio::time::timeout(Duration::from_secs(config.shutdown_timeout_secs), handle).await;
        tracing::info!("Collector job stopped");
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
