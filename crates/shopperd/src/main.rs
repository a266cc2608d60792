//! shopperd - purchase-intent prediction daemon
//!
//! Loads the fitted artifacts once at startup and serves predictions over
//! local HTTP. If the artifacts cannot be loaded it exits without binding.

use anyhow::{Context, Result};
use shopper_common::ShopperConfig;
use shopperd::logging;
use shopperd::server::{self, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let log = logging::init()?;

    let config = ShopperConfig::load().context("Failed to load config")?;
    log.apply(&config.logging)?;

    info!("[BOOT] shopperd v{} starting", env!("CARGO_PKG_VERSION"));
    info!("[BOOT] Artifacts: {}", config.artifacts.dir.display());

    let predictor = server::load_predictor(&config)?;
    info!("[BOOT] Model ready");

    server::run(AppState::new(predictor), &config.server).await
}
