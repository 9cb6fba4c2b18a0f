// Account Finder - Web Server

use account_finder::{api, logging, FinderConfig};
use anyhow::{Context, Result};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = FinderConfig::from_env().context("Failed to load configuration")?;
    logging::init(&config.log_filter);

    let directory = config
        .open_directory()
        .with_context(|| format!("Failed to open directory {}", config.directory.describe()))?;

    info!(
        source = %config.directory.describe(),
        records = directory.len(),
        fingerprint = %directory.fingerprint(),
        "directory loaded"
    );

    let app = api::router(api::AppState::new(directory, config.reset_notice.clone()));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "server running");
    println!("🚀 Server running on http://{}", config.bind_addr);
    println!("   API: POST http://{}/api/lookup", config.bind_addr);
    println!("\n   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
