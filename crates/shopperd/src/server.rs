//! HTTP server for shopperd

use crate::routes;
use anyhow::{Context, Result};
use axum::Router;
use chrono::{DateTime, Utc};
use shopper_common::config::ServerConfig;
use shopper_common::{DomainBounds, ModelArtifacts, Predictor, ShopperConfig};
use std::sync::Arc;
use std::time::Instant;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers.
///
/// Read-only after startup, so handlers share it without locks.
pub struct AppState {
    pub predictor: Predictor,
    pub start_time: Instant,
    pub loaded_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(predictor: Predictor) -> Self {
        Self {
            predictor,
            start_time: Instant::now(),
            loaded_at: Utc::now(),
        }
    }
}

/// Build the predictor for serving. Bound overrides are checked before any
/// artifact is read.
pub fn load_predictor(config: &ShopperConfig) -> Result<Predictor> {
    let bounds = DomainBounds::with_overrides(&config.validation.bounds)
        .context("Invalid [validation.bounds] in config")?;
    let artifacts = ModelArtifacts::load(&config.artifacts.paths())
        .context("Model artifacts unavailable, refusing to serve")?;
    Ok(Predictor::new(artifacts, bounds))
}

/// Build the router with all routes and layers.
pub fn app(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .merge(routes::predict_routes())
        .merge(routes::model_routes())
        .merge(routes::health_routes())
        .with_state(Arc::new(state))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server until Ctrl-C
pub async fn run(state: AppState, config: &ServerConfig) -> Result<()> {
    let app = app(state, config.max_body_bytes);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    info!("  Listening on http://{}", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Shutting down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopper_common::FieldDomain;
    use std::path::Path;

    fn fixture_config() -> ShopperConfig {
        let mut config = ShopperConfig::default();
        config.artifacts.dir =
            Path::new(env!("CARGO_MANIFEST_DIR")).join("../shopper_common/tests/fixtures");
        config
    }

    #[test]
    fn test_load_predictor_from_fixtures() {
        let predictor = load_predictor(&fixture_config()).unwrap();
        assert_eq!(predictor.artifacts().info().trees, 3);
    }

    #[test]
    fn test_bad_bounds_reported_as_config_problem() {
        let mut config = fixture_config();
        config
            .validation
            .bounds
            .insert("Month".to_string(), FieldDomain::new(0.0, 1.0));
        let err = load_predictor(&config).unwrap_err();
        assert!(err.to_string().contains("validation.bounds"));
        assert!(!format!("{:#}", err).contains("Model artifacts unavailable"));
    }

    #[test]
    fn test_missing_artifacts_reported_as_unavailable() {
        let mut config = ShopperConfig::default();
        config.artifacts.dir = "/nonexistent/models".into();
        let err = load_predictor(&config).unwrap_err();
        assert!(err.to_string().contains("Model artifacts unavailable"));
    }
}
