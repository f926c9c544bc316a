use application::UserApp;
use config::Config;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod dto;
mod error;
mod routes;

use routes::{user_routes, AppState};

const DEFAULT_LOG_FILTER: &str = "api_server=debug,domain=info,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; RUST_LOG overrides the default filter
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    info!("🚀 Starting User Registry API Server");

    // Load configuration from environment
    let config = Config::from_env(None)?;
    info!("🎂 Minimum user age: {} years", config.minimum_age);

    let app_state = AppState::new(UserApp::new_with_config(&config));

    let cors = if config.cors_permissive {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
    };

    let app = user_routes(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Run the server
    let bind_address = config.api_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("🌐 API Server listening on http://{}", bind_address);
    info!("📖 API Documentation:");
    info!("   POST   /users/registration              - Register a user");
    info!("   PUT    /users/:id                       - Replace all user fields");
    info!("   PATCH  /users/:id                       - Update some user fields");
    info!("   DELETE /users/:id                       - Delete a user");
    info!("   GET    /users/searchByBirthDateRange    - Users born between fromDate and toDate");
    info!("   GET    /users/:id                       - Get one user");
    info!("   GET    /users                           - List users");
    info!("   GET    /health                          - Health check");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 API Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
