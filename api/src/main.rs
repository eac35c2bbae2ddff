use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use trill::{AppState, app, config::Config};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let state = AppState::new(&config);
    let router = app(state, config.max_concurrent_requests);

    let listener = match tokio::net::TcpListener::bind(&config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", config.bind_addr, e);
            return ExitCode::FAILURE;
        }
    };

    info!("Server running on http://{}", config.bind_addr);
    info!("API Endpoints:");
    info!("  GET    /health                  - Health check");
    info!("  GET    /users/me                - Current identity (auth optional)");
    info!("  POST   /posts                   - Create post (moderated)");
    info!("  GET    /posts                   - List posts (paginated)");
    info!("  GET    /posts/:id               - Get specific post");
    info!("  DELETE /posts/:id               - Delete post (author only)");
    info!("  POST   /posts/:id/like          - Toggle like");
    info!("  POST   /posts/:id/repost        - Toggle repost");
    info!("  PUT    /posts/:id/reply-draft   - Store reply draft");
    info!("  POST   /posts/:id/replies       - Reply (text or stored draft)");
    info!("  GET    /profile                 - Load profile");
    info!("  PUT    /profile                 - Save profile (auth)");
    info!("  PUT    /profile/photo           - Upload profile photo (auth)");
    info!("  DELETE /profile                 - Delete profile (auth)");

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
