//! Background jobs: the daily delivery schedule and the rate-limit sweep.

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveTime, Utc};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::api::rate_limit::RateLimiter;
use crate::features::deliver::DeliveryPipeline;

/// Idioms go out at 08:00 GMT+7.
pub const IDIOMS_DELIVERY_UTC: (u32, u32) = (1, 0);
/// Expressions go out at 14:00 GMT+7.
pub const EXPRESSIONS_DELIVERY_UTC: (u32, u32) = (7, 0);

const SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Run a pipeline once a day at the given UTC wall-clock time.
///
/// A failed run is logged and the loop keeps going; it never takes the
/// process down or blocks the next day's run.
pub fn spawn_daily_delivery(
    pipeline: Arc<DeliveryPipeline>,
    (hour, minute): (u32, u32),
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let wait = until_next_utc(hour, minute);
            info!(
                kind = pipeline.kind().as_str(),
                next_in_secs = wait.as_secs(),
                "Scheduled next delivery"
            );
            tokio::time::sleep(wait).await;

            info!(kind = pipeline.kind().as_str(), "Starting scheduled delivery");
            match pipeline.run().await {
                Ok(report) => info!(
                    kind = pipeline.kind().as_str(),
                    items = report.items,
                    chunks = report.chunks,
                    "Scheduled delivery complete"
                ),
                Err(err) => error!(
                    kind = pipeline.kind().as_str(),
                    error = %err,
                    "Scheduled delivery failed"
                ),
            }
        }
    })
}

/// Hourly cleanup of expired rate-limit records, off the request path.
pub fn spawn_rate_limit_sweeper(limiter: Arc<RateLimiter>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
        // The first tick fires immediately; skip it so a fresh store is not
        // swept at startup.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let removed = limiter.sweep();
            if removed > 0 {
                debug!(removed, "Swept expired rate-limit records");
            }
        }
    })
}

/// Time until the next occurrence of `hour:minute` UTC, today or tomorrow.
fn until_next_utc(hour: u32, minute: u32) -> Duration {
    let now = Utc::now();
    let target_time =
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN);
    let mut next = now.date_naive().and_time(target_time).and_utc();
    if next <= now {
        next += chrono::Duration::days(1);
    }

    (next - now).to_std().unwrap_or(Duration::from_secs(60))
}
