//! Shared-secret header auth for the trigger routes.

use axum::http::HeaderMap;
use tracing::warn;

use crate::api::rate_limit::client_ip;
use crate::api::routes::ApiError;
use crate::core::config::AppConfig;

/// Reject the request unless `x-api-key` matches the configured key.
pub fn require_api_key(headers: &HeaderMap, config: &AppConfig) -> Result<(), ApiError> {
    let provided = headers.get("x-api-key").and_then(|value| value.to_str().ok());

    if provided != Some(config.api_key.as_str()) {
        warn!(ip = %client_ip(headers), "Unauthorized access attempt");
        return Err(ApiError::Unauthorized);
    }

    Ok(())
}
