// Main entry point - configuration, tracing and server setup
use std::net::SocketAddr;

use dashboard_catalog::infrastructure::config::load_app_config;
use dashboard_catalog::{build_router, build_state};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("dashboard_catalog=info,tower_http=info")),
        )
        .init();

    // Load configuration
    let config = load_app_config()?;
    if config.uses_placeholder_secret() {
        tracing::warn!("SECRET_KEY is not set; flash cookies are signed with the development placeholder");
    }

    let state = build_state(&config)?;
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = config.bind_addr.parse()?;
    tracing::info!(
        %addr,
        data_file = %config.data_file.display(),
        "Starting dashboard-catalog"
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
