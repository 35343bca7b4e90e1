//! Fixed-window rate limiting for the trigger API.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::Json;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::{TimeZone, Utc};
use serde_json::json;
use tracing::warn;

/// Request count within the current window for one `(client, path)` key.
#[derive(Debug, Clone, Copy)]
struct RateLimitRecord {
    count: u32,
    reset_at: i64,
}

/// Outcome of charging one request against a window.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub remaining: u32,
    /// Epoch milliseconds at which the window resets.
    pub reset_at: i64,
}

/// In-memory fixed-window counter store.
///
/// Records are swept out of band (see `tasks::spawn_rate_limit_sweeper`);
/// the request path only ever touches the one record it is charging.
#[derive(Debug, Default)]
pub struct RateLimiter {
    store: Mutex<HashMap<String, RateLimitRecord>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Charge one request against `key`'s window and report the outcome.
    pub fn check(&self, key: &str, window_ms: i64, max: u32) -> RateLimitDecision {
        self.check_at(key, window_ms, max, Utc::now().timestamp_millis())
    }

    /// As [`check`](Self::check), with an explicit clock reading.
    ///
    /// A record whose reset time has passed is replaced wholesale rather
    /// than incremented, so a stale window never leaks counts into a new one.
    pub fn check_at(&self, key: &str, window_ms: i64, max: u32, now_ms: i64) -> RateLimitDecision {
        let mut store = self.store_lock();
        let record = store.entry(key.to_string()).or_insert(RateLimitRecord {
            count: 0,
            reset_at: now_ms + window_ms,
        });

        if now_ms > record.reset_at {
            *record = RateLimitRecord {
                count: 0,
                reset_at: now_ms + window_ms,
            };
        }

        record.count += 1;

        RateLimitDecision {
            allowed: record.count <= max,
            remaining: max.saturating_sub(record.count),
            reset_at: record.reset_at,
        }
    }

    /// Drop every record whose window has passed; returns how many were
    /// removed. Runs from a background task, never in the request path.
    pub fn sweep(&self) -> usize {
        self.sweep_at(Utc::now().timestamp_millis())
    }

    pub fn sweep_at(&self, now_ms: i64) -> usize {
        let mut store = self.store_lock();
        let before = store.len();
        store.retain(|_, record| now_ms <= record.reset_at);
        before - store.len()
    }

    pub fn len(&self) -> usize {
        self.store_lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store_lock().is_empty()
    }

    fn store_lock(&self) -> MutexGuard<'_, HashMap<String, RateLimitRecord>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Per-route-group rate-limit parameters handed to the middleware.
#[derive(Clone)]
pub struct RouteLimit {
    pub limiter: Arc<RateLimiter>,
    pub window_ms: i64,
    pub max: u32,
}

/// Middleware charging each request against its `(client ip, path)` key.
///
/// Rate-limit headers are set on every response, allowed or not; an
/// exceeded window short-circuits with 429 and a retry hint.
pub async fn rate_limit_middleware(
    State(limit): State<RouteLimit>,
    request: Request,
    next: Next,
) -> Response {
    let ip = client_ip(request.headers()).to_string();
    let path = request.uri().path().to_string();
    let key = format!("{ip}:{path}");

    let decision = limit.limiter.check(&key, limit.window_ms, limit.max);

    if !decision.allowed {
        warn!(ip = %ip, path = %path, "Rate limit exceeded");
        let body = json!({
            "error": "Too many requests",
            "message": format!("Please try again after {}", reset_hint(decision.reset_at)),
        });
        let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
        apply_headers(&mut response, limit.max, decision);
        return response;
    }

    let mut response = next.run(request).await;
    apply_headers(&mut response, limit.max, decision);
    response
}

/// The requesting client's identifier: first `x-forwarded-for` hop, or
/// `unknown` when the header is absent.
pub fn client_ip(headers: &HeaderMap) -> &str {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or("unknown")
}

fn apply_headers(response: &mut Response, max: u32, decision: RateLimitDecision) {
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&max.to_string()) {
        headers.insert("X-RateLimit-Limit", value);
    }
    if let Ok(value) = HeaderValue::from_str(&decision.remaining.to_string()) {
        headers.insert("X-RateLimit-Remaining", value);
    }
    if let Ok(value) = HeaderValue::from_str(&decision.reset_at.to_string()) {
        headers.insert("X-RateLimit-Reset", value);
    }
}

fn reset_hint(reset_at_ms: i64) -> String {
    Utc.timestamp_millis_opt(reset_at_ms)
        .single()
        .map(|at| at.format("%H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "the current window resets".to_string())
}
