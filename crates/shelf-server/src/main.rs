//! Shelf Server Binary
//!
//! Standalone server for the shelf book tracker.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use shelf_core::ShelfConfig;
use shelf_server::{serve, AppState, DEFAULT_LOG_FILTER};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = ShelfConfig::load_standard()?;
    let state = Arc::new(AppState::from_config(&config)?);

    {
        let store = state.store.read().await;
        if let Some(warning) = store.load_warning() {
            tracing::warn!("Started with an empty list: {}", warning);
        }
    }

    serve(&config.server.addr, state).await?;
    Ok(())
}
