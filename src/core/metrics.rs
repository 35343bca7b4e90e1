//! Process-wide delivery counters, served by `GET /metrics`.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use serde::Serialize;

/// Only the most recent delivery gaps contribute to the average.
const DELIVERY_TIME_WINDOW: usize = 100;

#[derive(Debug, Default)]
pub struct Metrics {
    messages_sent: AtomicU64,
    items_sent: AtomicU64,
    errors: AtomicU64,
    timings: Mutex<DeliveryTimings>,
}

#[derive(Debug, Default)]
struct DeliveryTimings {
    last_delivery: Option<Instant>,
    gaps_ms: VecDeque<u64>,
}

/// Point-in-time view of the counters, serialized for the metrics endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub messages_sent: u64,
    pub items_sent: u64,
    pub errors: u64,
    pub average_delivery_time: String,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_messages_sent(&self, count: u64) {
        self.messages_sent.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_items_sent(&self, count: u64) {
        self.items_sent.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a completed delivery, tracking the gap since the previous one.
    pub fn record_delivery(&self) {
        let now = Instant::now();
        let mut timings = self.timings_lock();
        if let Some(last) = timings.last_delivery {
            let gap = now.duration_since(last).as_millis() as u64;
            timings.gaps_ms.push_back(gap);
            if timings.gaps_ms.len() > DELIVERY_TIME_WINDOW {
                timings.gaps_ms.pop_front();
            }
        }
        timings.last_delivery = Some(now);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let average_secs = {
            let timings = self.timings_lock();
            if timings.gaps_ms.is_empty() {
                0.0
            } else {
                let sum: u64 = timings.gaps_ms.iter().sum();
                sum as f64 / timings.gaps_ms.len() as f64 / 1000.0
            }
        };

        MetricsSnapshot {
            messages_sent: self.messages_sent.load(Ordering::Relaxed),
            items_sent: self.items_sent.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
            average_delivery_time: format!("{average_secs:.2}s"),
        }
    }

    fn timings_lock(&self) -> MutexGuard<'_, DeliveryTimings> {
        self.timings.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
