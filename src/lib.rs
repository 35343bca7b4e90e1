/// Daily Idioms - a Discord bot that delivers daily language-learning drops
/// (English idioms, colloquial Indonesian expressions) over outbound webhooks.
///
/// The service acquires a batch of content from a configured source (an LLM
/// or a catalog store), filters out anything sent recently, formats the batch
/// into length-bounded Discord messages, and posts them sequentially. Two
/// daily background jobs drive the normal cadence; a small rate-limited HTTP
/// API allows manual triggers.
///
/// # Architecture
///
/// The system uses:
/// - Tokio for the async runtime
/// - axum for the HTTP trigger surface
/// - reqwest for the content-source and webhook clients
/// - tracing for structured JSON logging
// Module declarations
pub mod api;
pub mod clients;
pub mod content;
pub mod core;
pub mod discord;
pub mod errors;
pub mod features;
pub mod state;
pub mod tasks;

/// Configure structured logging with JSON output.
///
/// Sets up tracing-subscriber with a JSON formatter. The `RUST_LOG`
/// environment variable controls the filter; defaults to `info`.
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
