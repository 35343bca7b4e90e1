//! Batch acquisition: bounded retries, dedup against the current batch and
//! the recency guard, and fallback top-up for best-effort sources.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use rand::seq::SliceRandom;
use tracing::{info, warn};

use crate::content::fallback;
use crate::content::fingerprint::{fingerprint, similar};
use crate::content::recency::RecencyGuard;
use crate::content::source::{ContentSource, ExhaustionPolicy};
use crate::core::models::{ContentItem, ContentKind};
use crate::errors::AcquireError;

pub const MAX_RETRIES: usize = 5;
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Assembles batches of unique, non-recent content items.
///
/// Slots are filled strictly sequentially: each accepted item's fingerprint
/// must be visible in the recency guard before the next slot's membership
/// check runs, so item acquisition is never parallelized.
pub struct BatchAcquirer {
    source: Arc<dyn ContentSource>,
    recency: Arc<Mutex<RecencyGuard>>,
    max_retries: usize,
    retry_delay: Duration,
}

impl BatchAcquirer {
    pub fn new(source: Arc<dyn ContentSource>, recency: Arc<Mutex<RecencyGuard>>) -> Self {
        Self {
            source,
            recency,
            max_retries: MAX_RETRIES,
            retry_delay: RETRY_DELAY,
        }
    }

    /// Override the retry budget and inter-attempt delay.
    pub fn with_retry_policy(mut self, max_retries: usize, retry_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_delay = retry_delay;
        self
    }

    /// Acquire up to `count` items of the given kind.
    ///
    /// With a [`ExhaustionPolicy::Fatal`] source, a slot that exhausts its
    /// retry budget aborts the whole acquisition. With
    /// [`ExhaustionPolicy::BestEffort`], acquisition stops early and the
    /// batch is topped up from the bundled fallback pool.
    pub async fn acquire(
        &self,
        count: usize,
        kind: ContentKind,
    ) -> Result<Vec<ContentItem>, AcquireError> {
        info!(count, kind = kind.as_str(), "Starting batch acquisition");
        let mut batch: Vec<ContentItem> = Vec::with_capacity(count);

        for slot in 0..count {
            match self.fill_slot(slot, kind, &batch).await {
                Ok(item) => batch.push(item),
                Err(err) => match self.source.exhaustion_policy() {
                    ExhaustionPolicy::Fatal => return Err(err),
                    ExhaustionPolicy::BestEffort => {
                        warn!(
                            slot,
                            error = %err,
                            "Acquisition exhausted, topping up from fallback pool"
                        );
                        break;
                    }
                },
            }
        }

        if batch.len() < count
            && self.source.exhaustion_policy() == ExhaustionPolicy::BestEffort
        {
            self.top_up_from_fallback(&mut batch, count, kind);
        }

        info!(acquired = batch.len(), requested = count, "Batch acquisition finished");
        Ok(batch)
    }

    /// Fill one batch slot, attempting up to `max_retries` source calls.
    ///
    /// A successful call that turns out to be a near-duplicate of the batch
    /// or a recently-sent item counts as a failed attempt.
    async fn fill_slot(
        &self,
        slot: usize,
        kind: ContentKind,
        batch: &[ContentItem],
    ) -> Result<ContentItem, AcquireError> {
        let mut causes: Vec<String> = Vec::new();
        let mut attempts = 0;

        while attempts < self.max_retries {
            attempts += 1;

            match self.source.produce(kind).await {
                Ok(item) => {
                    let is_duplicate = batch.iter().any(|accepted| similar(accepted, &item));
                    let print = fingerprint(&item);
                    let is_recent = self.guard().contains(&print);

                    if !is_duplicate && !is_recent {
                        self.guard().insert(&print);
                        info!(slot, phrase = item.primary_text(), "Accepted unique item");
                        return Ok(item);
                    }

                    info!(
                        slot,
                        attempt = attempts,
                        is_duplicate,
                        is_recent,
                        phrase = item.primary_text(),
                        "Rejected fetched item"
                    );
                    causes.push(if is_duplicate {
                        format!("`{}` duplicates an item in this batch", item.primary_text())
                    } else {
                        format!("`{}` was sent recently", item.primary_text())
                    });
                }
                Err(err) => {
                    warn!(slot, attempt = attempts, error = %err, "Content fetch attempt failed");
                    causes.push(err.to_string());
                }
            }

            if attempts < self.max_retries {
                tokio::time::sleep(self.retry_delay).await;
            }
        }

        Err(AcquireError {
            slot,
            attempts,
            causes,
        })
    }

    /// Shuffle the fallback pool and take entries that collide with neither
    /// the batch nor the recency guard, until `count` is reached or the pool
    /// is exhausted.
    fn top_up_from_fallback(&self, batch: &mut Vec<ContentItem>, count: usize, kind: ContentKind) {
        let mut pool = fallback::pool_for(kind);
        pool.shuffle(&mut rand::rng());

        for item in pool {
            if batch.len() >= count {
                break;
            }
            if batch.iter().any(|accepted| similar(accepted, &item)) {
                continue;
            }
            let print = fingerprint(&item);
            if self.guard().contains(&print) {
                continue;
            }

            self.guard().insert(&print);
            info!(phrase = item.primary_text(), "Added fallback item to batch");
            batch.push(item);
        }
    }

    fn guard(&self) -> MutexGuard<'_, RecencyGuard> {
        self.recency.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
