//! The per-kind delivery pipeline: acquire a batch, format it, send the
//! chunks, persist sent-state.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::content::acquirer::BatchAcquirer;
use crate::content::source::ContentSource;
use crate::core::metrics::Metrics;
use crate::core::models::ContentKind;
use crate::discord::formatter;
use crate::discord::webhook::WebhookClient;
use crate::errors::PipelineError;

/// Outcome of one completed delivery run.
#[derive(Debug, Clone, Copy)]
pub struct DeliveryReport {
    pub items: usize,
    pub chunks: usize,
}

/// Everything needed to run one content kind end to end.
pub struct DeliveryPipeline {
    kind: ContentKind,
    batch_size: usize,
    acquirer: BatchAcquirer,
    webhook: WebhookClient,
    source: Arc<dyn ContentSource>,
    metrics: Arc<Metrics>,
}

impl DeliveryPipeline {
    pub fn new(
        kind: ContentKind,
        batch_size: usize,
        acquirer: BatchAcquirer,
        webhook: WebhookClient,
        source: Arc<dyn ContentSource>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            kind,
            batch_size,
            acquirer,
            webhook,
            source,
            metrics,
        }
    }

    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    /// Run one acquisition-and-delivery cycle.
    ///
    /// Chunks are sent sequentially and non-transactionally: a failure midway
    /// leaves earlier chunks delivered and skips the rest.
    pub async fn run(&self) -> Result<DeliveryReport, PipelineError> {
        let run_id = Uuid::new_v4();
        info!(
            %run_id,
            kind = self.kind.as_str(),
            count = self.batch_size,
            "Starting delivery run"
        );

        let result = self.run_inner(run_id).await;
        if result.is_err() {
            self.metrics.record_error();
        }
        result
    }

    async fn run_inner(&self, run_id: Uuid) -> Result<DeliveryReport, PipelineError> {
        let batch = self.acquirer.acquire(self.batch_size, self.kind).await?;

        if batch.is_empty() {
            warn!(%run_id, "Acquisition produced an empty batch, nothing to deliver");
            return Ok(DeliveryReport { items: 0, chunks: 0 });
        }

        let chunks = formatter::format_batch(self.kind, &batch);
        let sent = self.webhook.send_chunks(&chunks).await?;

        let ids: Vec<String> = batch
            .iter()
            .filter_map(|item| item.id().map(str::to_string))
            .collect();
        if !ids.is_empty() {
            if let Err(err) = self.source.mark_sent(&ids).await {
                // Delivery already happened; a failed stamp only risks an
                // early resend after restart.
                warn!(%run_id, error = %err, "Failed to mark catalog records as sent");
            }
        }

        self.metrics.record_messages_sent(sent as u64);
        self.metrics.record_items_sent(batch.len() as u64);
        self.metrics.record_delivery();

        info!(
            %run_id,
            items = batch.len(),
            chunks = sent,
            "Delivery run complete"
        );

        Ok(DeliveryReport {
            items: batch.len(),
            chunks: sent,
        })
    }

    /// Post a short test message through the webhook, bypassing acquisition.
    pub async fn send_test_message(&self) -> Result<(), PipelineError> {
        self.webhook
            .send_as("Test message from Daily Idioms", "Daily Idioms Test")
            .await?;
        Ok(())
    }
}
