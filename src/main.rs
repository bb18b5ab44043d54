use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use journey_server::config::Config;
use journey_server::context::AppContext;
use journey_server::create_router;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::from_env()?;
    let config = Arc::new(config);

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.rust_log.clone()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("=== Journey Front-End Server Starting ===");
    info!("Port: {}", config.port);
    info!("Backend API: {}", config.api_base_url);
    info!(
        "Locales: {} (default: {})",
        config.supported_locales.join(","),
        config.default_locale
    );
    info!("Static shell: {}", config.static_dir);

    // Build shared context and router
    let app_context = Arc::new(
        AppContext::new(config.clone()).context("Failed to initialize application context")?,
    );
    let app = create_router(app_context);

    // Start server
    let addr: SocketAddr = format!("0.0.0.0:{}", config.port)
        .parse()
        .context("Failed to parse bind address")?;

    info!("Journey server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .await
        .context("Failed to start server")?;

    Ok(())
}
