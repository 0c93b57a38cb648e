use std::net::SocketAddr;

use anyhow::{Context, Result};
use tracing::info;

use fare_locale_router::config::Config;
use fare_locale_router::server::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fare_locale_router=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!(
        "Serving {} with locale query '{}' and cookie '{}'",
        config.static_dir.display(),
        config.locale_query_param,
        config.locale_cookie
    );

    let app = build_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("✓ Listening on {}", addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
