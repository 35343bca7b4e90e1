//! The capability seam between the batch acquirer and whatever actually
//! produces content.

use std::sync::Arc;

use async_trait::async_trait;

use crate::clients::catalog_client::CatalogClient;
use crate::clients::llm_client::LlmClient;
use crate::core::models::{ContentItem, ContentKind, Expression, Idiom};
use crate::errors::SourceError;

/// What the acquirer does when a batch slot exhausts its retry budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExhaustionPolicy {
    /// Abort the whole acquisition with an aggregated error.
    Fatal,
    /// Accept a shorter batch and top it up from the fallback pool.
    BestEffort,
}

/// A producer of content items. One attempt per call; retry lives in the
/// acquirer, not here.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn produce(&self, kind: ContentKind) -> Result<ContentItem, SourceError>;

    fn exhaustion_policy(&self) -> ExhaustionPolicy;

    /// Persist that the given catalog records were delivered. No-op for
    /// sources without backing storage.
    async fn mark_sent(&self, _ids: &[String]) -> Result<(), SourceError> {
        Ok(())
    }
}

/// LLM-backed source. Under-delivery is tolerated; the acquirer tops the
/// batch up from the fallback pool.
pub struct GenerativeSource {
    llm: Arc<LlmClient>,
}

impl GenerativeSource {
    pub fn new(llm: Arc<LlmClient>) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl ContentSource for GenerativeSource {
    async fn produce(&self, kind: ContentKind) -> Result<ContentItem, SourceError> {
        match kind {
            ContentKind::Idiom => {
                let generated = self.llm.generate_idiom().await?;
                let examples = self
                    .llm
                    .generate_idiom_examples(&generated.phrase, &generated.meaning)
                    .await;
                Ok(ContentItem::Idiom(Idiom {
                    id: None,
                    phrase: generated.phrase,
                    meaning: generated.meaning,
                    examples,
                }))
            }
            ContentKind::Expression => {
                let generated = self.llm.generate_expression().await?;
                Ok(ContentItem::Expression(Expression {
                    id: None,
                    indonesian: generated.indonesian,
                    english: generated.english,
                    examples: generated.examples,
                    alt_phrases: generated.alt_phrases,
                }))
            }
        }
    }

    fn exhaustion_policy(&self) -> ExhaustionPolicy {
        ExhaustionPolicy::BestEffort
    }
}

/// Catalog-store source. Under-delivery is fatal: the caller gets the full
/// list of attempt failures instead of a silently short batch.
pub struct CatalogSource {
    client: Arc<CatalogClient>,
    idioms_database_id: String,
    expressions_database_id: String,
}

impl CatalogSource {
    pub fn new(
        client: Arc<CatalogClient>,
        idioms_database_id: String,
        expressions_database_id: String,
    ) -> Self {
        Self {
            client,
            idioms_database_id,
            expressions_database_id,
        }
    }
}

#[async_trait]
impl ContentSource for CatalogSource {
    async fn produce(&self, kind: ContentKind) -> Result<ContentItem, SourceError> {
        match kind {
            ContentKind::Idiom => {
                let idiom = self.client.fetch_random_idiom(&self.idioms_database_id).await?;
                Ok(ContentItem::Idiom(idiom))
            }
            ContentKind::Expression => {
                let expression = self
                    .client
                    .fetch_random_expression(&self.expressions_database_id)
                    .await?;
                Ok(ContentItem::Expression(expression))
            }
        }
    }

    fn exhaustion_policy(&self) -> ExhaustionPolicy {
        ExhaustionPolicy::Fatal
    }

    async fn mark_sent(&self, ids: &[String]) -> Result<(), SourceError> {
        self.client.mark_sent(ids).await
    }
}
