//! Duel console client binary.
//!
//! # Examples
//!
//! ```bash
//! # Built-in content, random AI
//! cargo run -p duel-client
//!
//! # Custom content directory and a reproducible opponent
//! DUEL_DATA_DIR=./data DUEL_AI_SEED=7 cargo run -p duel-client
//! ```

use anyhow::Result;
use duel_client::{Client, ClientConfig, logging};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _log_guard = logging::setup_logging(&config.session_id())?;

    tracing::info!("Starting duel client");
    Client::builder().config(config).build()?.run().await?;
    tracing::info!("Client shutdown complete");
    Ok(())
}
