// Entry point for the books scraper API server

use anyhow::{Context, Result};
use books_server::{build_app, Config, ScraperState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,books_core=debug,books_server=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting books scraper API");

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        root = %config.scraper.root_url,
        output = %config.scraper.output_path.display(),
        "Configuration loaded"
    );

    let state = ScraperState::new(config.scraper).context("Failed to create scraper")?;
    let app = build_app(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
