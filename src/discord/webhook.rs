//! Outbound Discord webhook client.

use std::time::{Duration, Instant};

use reqwest::Client;
use serde_json::json;
use tracing::{error, info};

use crate::errors::DeliveryError;

pub struct WebhookClient {
    http: Client,
    url: String,
    display_name: String,
}

impl WebhookClient {
    pub fn new(url: String, display_name: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http,
            url,
            display_name: display_name.into(),
        }
    }

    /// Send one message under the client's configured display name.
    pub async fn send(&self, content: &str) -> Result<(), DeliveryError> {
        self.send_as(content, &self.display_name).await
    }

    /// Send one message under an explicit display name. Mentions are
    /// disabled on every outbound message.
    pub async fn send_as(&self, content: &str, display_name: &str) -> Result<(), DeliveryError> {
        let started = Instant::now();
        let payload = json!({
            "content": content,
            "username": display_name,
            "allowed_mentions": { "parse": [] },
        });

        info!(content_length = content.chars().count(), "Sending webhook message");

        let response = self.http.post(&self.url).json(&payload).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            error!(status, body = %body, "Webhook rejected message");
            return Err(DeliveryError::Rejected { status, body });
        }

        info!(
            duration_ms = started.elapsed().as_millis() as u64,
            "Webhook message sent"
        );
        Ok(())
    }

    /// Deliver chunks in order, stopping at the first failure. Chunks sent
    /// before the failure stay delivered; there is no compensation.
    pub async fn send_chunks(&self, chunks: &[String]) -> Result<usize, DeliveryError> {
        for (index, chunk) in chunks.iter().enumerate() {
            self.send(chunk).await.map_err(|err| {
                error!(
                    chunk = index + 1,
                    total = chunks.len(),
                    error = %err,
                    "Chunk delivery failed, remaining chunks skipped"
                );
                err
            })?;
        }
        Ok(chunks.len())
    }
}
