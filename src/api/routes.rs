//! Router assembly and request handlers for the trigger API.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tracing::{error, info};

use crate::api::auth::require_api_key;
use crate::api::rate_limit::{RouteLimit, rate_limit_middleware};
use crate::features::deliver::DeliveryPipeline;
use crate::state::AppState;

const TRIGGER_WINDOW_MS: i64 = 60 * 1000;
const TRIGGER_MAX: u32 = 5;
const METRICS_WINDOW_MS: i64 = 5 * 60 * 1000;
const METRICS_MAX: u32 = 10;

/// Errors surfaced to HTTP callers as structured JSON payloads.
#[derive(Debug)]
pub enum ApiError {
    Unauthorized,
    ServiceUnavailable(&'static str),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            ApiError::ServiceUnavailable(service) => (
                StatusCode::SERVICE_UNAVAILABLE,
                format!("{service} service is not configured"),
            ),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let trigger_limit = RouteLimit {
        limiter: state.rate_limiter.clone(),
        window_ms: TRIGGER_WINDOW_MS,
        max: TRIGGER_MAX,
    };
    let metrics_limit = RouteLimit {
        limiter: state.rate_limiter.clone(),
        window_ms: METRICS_WINDOW_MS,
        max: METRICS_MAX,
    };

    let triggers = Router::new()
        .route("/idiom", post(trigger_idioms))
        .route("/how-to-say-this", post(trigger_expressions))
        .route("/test-webhook", post(test_webhook))
        .layer(middleware::from_fn_with_state(
            trigger_limit,
            rate_limit_middleware,
        ));

    let metrics = Router::new()
        .route("/metrics", get(metrics_snapshot))
        .layer(middleware::from_fn_with_state(
            metrics_limit,
            rate_limit_middleware,
        ));

    Router::new()
        .route("/", get(health))
        .merge(triggers)
        .merge(metrics)
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    info!(
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        duration_ms = started.elapsed().as_millis() as u64,
        "Request handled"
    );
    response
}

/// Health check: no auth, no rate limit.
async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Daily Idioms service is running",
        "services": {
            "idioms": state.idioms.is_some(),
            "expressions": state.expressions.is_some(),
        },
    }))
}

async fn metrics_snapshot(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    require_api_key(&headers, &state.config)?;

    Ok(Json(json!({
        "status": "ok",
        "metrics": state.metrics.snapshot(),
    })))
}

async fn trigger_idioms(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    require_api_key(&headers, &state.config)?;
    let pipeline = available(&state.idioms, "idioms")?;

    info!("Manual idiom trigger initiated");
    run_pipeline(pipeline, "Idioms sent successfully").await
}

async fn trigger_expressions(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    require_api_key(&headers, &state.config)?;
    let pipeline = available(&state.expressions, "expressions")?;

    info!("Manual phrase trigger initiated");
    run_pipeline(pipeline, "Phrases sent successfully").await
}

async fn test_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    require_api_key(&headers, &state.config)?;
    let pipeline = available(&state.idioms, "idioms")?;

    info!("Testing webhook");
    match pipeline.send_test_message().await {
        Ok(()) => Ok(Json(json!({
            "status": "success",
            "message": "Test message sent successfully",
        }))),
        Err(err) => {
            error!(error = %err, "Failed to send test message");
            Err(ApiError::Internal(err.to_string()))
        }
    }
}

fn available<'a>(
    pipeline: &'a Option<Arc<DeliveryPipeline>>,
    service: &'static str,
) -> Result<&'a DeliveryPipeline, ApiError> {
    pipeline
        .as_deref()
        .ok_or(ApiError::ServiceUnavailable(service))
}

async fn run_pipeline(
    pipeline: &DeliveryPipeline,
    success_message: &str,
) -> Result<Json<Value>, ApiError> {
    match pipeline.run().await {
        Ok(report) => Ok(Json(json!({
            "status": "success",
            "message": success_message,
            "items": report.items,
            "chunks": report.chunks,
        }))),
        Err(err) => {
            error!(kind = pipeline.kind().as_str(), error = %err, "Delivery run failed");
            Err(ApiError::Internal(err.to_string()))
        }
    }
}
