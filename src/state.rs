//! Application state: explicitly constructed services, shared by the HTTP
//! layer and the background jobs.

use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::api::rate_limit::RateLimiter;
use crate::clients::catalog_client::CatalogClient;
use crate::clients::llm_client::LlmClient;
use crate::content::acquirer::BatchAcquirer;
use crate::content::recency::RecencyGuard;
use crate::content::source::{CatalogSource, ContentSource, GenerativeSource};
use crate::core::config::{AppConfig, SourceMode};
use crate::core::metrics::Metrics;
use crate::core::models::ContentKind;
use crate::discord::webhook::WebhookClient;
use crate::features::deliver::DeliveryPipeline;

pub const IDIOMS_PER_RUN: usize = 4;
pub const EXPRESSIONS_PER_RUN: usize = 3;

pub struct AppState {
    pub config: AppConfig,
    pub idioms: Option<Arc<DeliveryPipeline>>,
    pub expressions: Option<Arc<DeliveryPipeline>>,
    pub rate_limiter: Arc<RateLimiter>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    /// Wire up every service the configuration allows. A missing webhook URL
    /// or source credential disables the affected pipeline (surfaced as 503
    /// on its trigger route) instead of failing startup.
    pub fn new(config: AppConfig) -> Self {
        let metrics = Arc::new(Metrics::new());
        let rate_limiter = Arc::new(RateLimiter::new());
        let recency = Arc::new(Mutex::new(RecencyGuard::new()));
        let source = build_source(&config);

        let idioms = build_pipeline(
            ContentKind::Idiom,
            IDIOMS_PER_RUN,
            config.idioms_webhook_url.as_deref(),
            "Daily Idioms",
            source.clone(),
            recency.clone(),
            metrics.clone(),
        );
        let expressions = build_pipeline(
            ContentKind::Expression,
            EXPRESSIONS_PER_RUN,
            config.phrases_webhook_url.as_deref(),
            "How to Say This?",
            source,
            recency,
            metrics.clone(),
        );

        Self {
            config,
            idioms,
            expressions,
            rate_limiter,
            metrics,
        }
    }
}

fn build_source(config: &AppConfig) -> Option<Arc<dyn ContentSource>> {
    match config.source_mode {
        SourceMode::Generative => match config.openai_api_key.clone() {
            Some(api_key) => {
                let llm = Arc::new(LlmClient::new(api_key, config.openai_model.clone()));
                Some(Arc::new(GenerativeSource::new(llm)))
            }
            None => {
                warn!("OPENAI_API_KEY not provided, content delivery will be disabled");
                None
            }
        },
        SourceMode::Catalog => {
            let (Some(token), Some(idioms_db), Some(expressions_db)) = (
                config.catalog_token.clone(),
                config.catalog_idioms_database_id.clone(),
                config.catalog_expressions_database_id.clone(),
            ) else {
                warn!(
                    "Catalog mode needs CATALOG_TOKEN and both database ids, \
                     content delivery will be disabled"
                );
                return None;
            };

            let client = Arc::new(CatalogClient::new(token));
            Some(Arc::new(CatalogSource::new(client, idioms_db, expressions_db)))
        }
    }
}

fn build_pipeline(
    kind: ContentKind,
    batch_size: usize,
    webhook_url: Option<&str>,
    display_name: &str,
    source: Option<Arc<dyn ContentSource>>,
    recency: Arc<Mutex<RecencyGuard>>,
    metrics: Arc<Metrics>,
) -> Option<Arc<DeliveryPipeline>> {
    let Some(url) = webhook_url else {
        warn!(
            kind = kind.as_str(),
            "Webhook URL not provided, delivery for this kind will be disabled"
        );
        return None;
    };
    let source = source?;

    let acquirer = BatchAcquirer::new(source.clone(), recency);
    let webhook = WebhookClient::new(url.to_string(), display_name);

    Some(Arc::new(DeliveryPipeline::new(
        kind, batch_size, acquirer, webhook, source, metrics,
    )))
}
