mod api;
mod config;
mod storage;

use crate::api::{diagnostics_handler, root_handler, AppState};
use crate::config::AppConfig;
use crate::storage::Store;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("🚀 Starting Food Ordering API Server");

    // Load configuration
    let config = AppConfig::load()?;
    info!("📋 Configuration loaded");
    info!("   - Database: {}", config.database.name);
    info!("   - Server: {}:{}", config.server.host, config.server.port);

    // Create store client (connects lazily on first operation)
    info!("💾 Initializing document store client...");
    let store = Arc::new(Store::connect(&config.database.url, &config.database.name).await?);
    info!("✅ Store client ready (database: {})", store.database_name());

    // Create application state
    let state = AppState {
        store,
        database_url_from_env: config.database_url_from_env,
        database_name_from_env: config.database_name_from_env,
    };

    // Demo deployment: any origin, any method, any header
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with modular routes
    let app = Router::new()
        .route("/", get(root_handler))
        .route("/test", get(diagnostics_handler))
        .merge(api::seed::routes())
        .merge(api::restaurants::routes())
        .merge(api::orders::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 Server listening on http://{}", addr);
    info!("");
    info!("📡 Available endpoints:");
    info!("   GET  /                        - Liveness");
    info!("   POST /seed                    - Seed sample data (idempotent)");
    info!("   GET  /restaurants             - List restaurants");
    info!("   GET  /restaurants/{{id}}/menu   - Restaurant menu");
    info!("   POST /orders                  - Place an order");
    info!("   GET  /orders?limit=N          - List recent orders");
    info!("   GET  /test                    - Store diagnostics");
    info!("");
    info!("✨ Server is ready to accept requests!");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutting down gracefully");

    Ok(())
}

/// Graceful shutdown handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("🛑 Shutdown signal received");
}
