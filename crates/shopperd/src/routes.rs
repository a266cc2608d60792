//! API routes for shopperd

use crate::server::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use shopper_common::{
    ErrorResponse, HealthResponse, ModelInfoResponse, PredictionResult, PredictionTrace,
    SessionFeatures, ShopperError,
};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

type AppStateArc = Arc<AppState>;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

/// HTTP status for a pipeline error. Input problems are the caller's; a
/// missing model is ours.
pub fn status_for(err: &ShopperError) -> StatusCode {
    match err {
        ShopperError::UnknownCategory { .. } | ShopperError::OutOfDomain { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ShopperError::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        ShopperError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        ShopperError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn reject(request_id: Uuid, err: ShopperError) -> (StatusCode, Json<ErrorResponse>) {
    warn!("  [{}] Rejected: {}", request_id, err);
    (status_for(&err), Json(ErrorResponse::from(&err)))
}

/// The session from the body, or a JSON error body carrying axum's status.
fn session(
    request_id: Uuid,
    payload: Result<Json<SessionFeatures>, JsonRejection>,
) -> Result<SessionFeatures, (StatusCode, Json<ErrorResponse>)> {
    match payload {
        Ok(Json(features)) => Ok(features),
        Err(rejection) => {
            let status = rejection.status();
            let err = ShopperError::InvalidRequest(rejection.body_text());
            warn!("  [{}] Rejected: {}", request_id, err);
            Err((status, Json(ErrorResponse::from(&err))))
        }
    }
}

// ============================================================================
// Predict Routes
// ============================================================================

pub fn predict_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/v1/predict", post(predict))
        .route("/v1/explain", post(explain))
}

async fn predict(
    State(state): State<AppStateArc>,
    payload: Result<Json<SessionFeatures>, JsonRejection>,
) -> ApiResult<PredictionResult> {
    let request_id = Uuid::new_v4();
    let features = session(request_id, payload)?;
    let result = state
        .predictor
        .predict(&features)
        .map_err(|e| reject(request_id, e))?;

    info!(
        "  [{}] will_purchase={} probability={:.4}",
        request_id, result.will_purchase, result.probability
    );
    Ok(Json(result))
}

async fn explain(
    State(state): State<AppStateArc>,
    payload: Result<Json<SessionFeatures>, JsonRejection>,
) -> ApiResult<PredictionTrace> {
    let request_id = Uuid::new_v4();
    let features = session(request_id, payload)?;
    let trace = state
        .predictor
        .explain(&features)
        .map_err(|e| reject(request_id, e))?;

    info!("  [{}] explained, decision={:.4}", request_id, trace.decision);
    Ok(Json(trace))
}

// ============================================================================
// Model Routes
// ============================================================================

pub fn model_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/model", get(model_info))
}

async fn model_info(State(state): State<AppStateArc>) -> Json<ModelInfoResponse> {
    Json(ModelInfoResponse {
        info: state.predictor.artifacts().info(),
        loaded_at: state.loaded_at.to_rfc3339(),
    })
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/health", get(health_check))
}

async fn health_check(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}
