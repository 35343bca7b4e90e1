//! Catalog store client (Notion-style REST API).
//!
//! Queries one page of candidate records that have not been sent within the
//! trailing resend window, and marks delivered records with a last-sent
//! timestamp.

use std::time::Duration;

use chrono::Utc;
use rand::seq::IndexedRandom;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::info;

use crate::core::models::{Expression, Idiom};
use crate::errors::SourceError;

const DEFAULT_BASE_URL: &str = "https://api.notion.com";
const API_VERSION: &str = "2022-06-28";
const PAGE_SIZE: usize = 10;

/// Records sent within this window are excluded from candidate queries.
const RESEND_AFTER_DAYS: i64 = 30;

pub struct CatalogClient {
    http: Client,
    token: String,
    base_url: String,
}

impl CatalogClient {
    pub fn new(token: String) -> Self {
        Self::with_base_url(token, DEFAULT_BASE_URL.to_string())
    }

    /// Point the client at a different API host (self-hosted proxy, tests).
    pub fn with_base_url(token: String, base_url: String) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http,
            token,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn fetch_random_idiom(&self, database_id: &str) -> Result<Idiom, SourceError> {
        let page = self.pick_candidate(database_id).await?;
        let props = properties(&page)?;

        Ok(Idiom {
            id: Some(page_id(&page)?),
            phrase: title_text(props, "idiom")?,
            meaning: rich_text(props, "meaning")?,
            examples: rich_text(props, "examples")?,
        })
    }

    pub async fn fetch_random_expression(
        &self,
        database_id: &str,
    ) -> Result<Expression, SourceError> {
        let page = self.pick_candidate(database_id).await?;
        let props = properties(&page)?;

        Ok(Expression {
            id: Some(page_id(&page)?),
            indonesian: title_text(props, "sentence")?,
            english: rich_text(props, "in_english")?,
            examples: rich_text(props, "examples")?,
            alt_phrases: optional_rich_text(props, "alt_phrases"),
        })
    }

    /// Stamp each delivered record with a last-sent timestamp of now, so it
    /// drops out of candidate queries for the resend window.
    pub async fn mark_sent(&self, ids: &[String]) -> Result<(), SourceError> {
        let now = Utc::now().to_rfc3339();

        for id in ids {
            let body = json!({
                "properties": {
                    "last_sent": { "date": { "start": now } }
                }
            });

            let response = self
                .http
                .patch(format!("{}/v1/pages/{id}", self.base_url))
                .bearer_auth(&self.token)
                .header("Notion-Version", API_VERSION)
                .json(&body)
                .send()
                .await?;

            if !response.status().is_success() {
                let status = response.status();
                let body_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<failed to read body>".to_string());
                return Err(SourceError::Http(format!(
                    "Catalog mark-sent for {id} returned {status}: {body_text}"
                )));
            }
        }

        info!(count = ids.len(), "Marked catalog records as sent");
        Ok(())
    }

    /// Query the first page of not-recently-sent candidates and pick one at
    /// random.
    async fn pick_candidate(&self, database_id: &str) -> Result<Value, SourceError> {
        let cutoff = (Utc::now() - chrono::Duration::days(RESEND_AFTER_DAYS))
            .format("%Y-%m-%d")
            .to_string();

        let body = json!({
            "page_size": PAGE_SIZE,
            "filter": {
                "or": [
                    { "property": "last_sent", "date": { "is_empty": true } },
                    { "property": "last_sent", "date": { "before": cutoff } },
                ]
            },
            "sorts": [
                { "timestamp": "created_time", "direction": "descending" }
            ],
        });

        let response = self
            .http
            .post(format!("{}/v1/databases/{database_id}/query", self.base_url))
            .bearer_auth(&self.token)
            .header("Notion-Version", API_VERSION)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            return Err(SourceError::Http(format!(
                "Catalog query returned {status}: {body_text}"
            )));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            SourceError::MalformedResponse(format!("Failed to parse catalog response: {e}"))
        })?;

        let results = response_json
            .get("results")
            .and_then(|r| r.as_array())
            .ok_or_else(|| {
                SourceError::MalformedResponse("Catalog response has no results array".to_string())
            })?;

        results
            .choose(&mut rand::rng())
            .cloned()
            .ok_or(SourceError::EmptyResultSet)
    }
}

fn page_id(page: &Value) -> Result<String, SourceError> {
    page.get("id")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or(SourceError::MissingField("id"))
}

fn properties(page: &Value) -> Result<&Value, SourceError> {
    page.get("properties")
        .ok_or(SourceError::MissingField("properties"))
}

/// First plain-text fragment of a title property; absence or emptiness is a
/// fetch failure for the record.
fn title_text(props: &Value, name: &'static str) -> Result<String, SourceError> {
    props
        .get(name)
        .and_then(|p| p.get("title"))
        .and_then(|t| t.get(0))
        .and_then(|f| f.get("plain_text"))
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or(SourceError::MissingField(name))
}

fn rich_text(props: &Value, name: &'static str) -> Result<String, SourceError> {
    props
        .get(name)
        .and_then(|p| p.get("rich_text"))
        .and_then(|t| t.get(0))
        .and_then(|f| f.get("plain_text"))
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or(SourceError::MissingField(name))
}

fn optional_rich_text(props: &Value, name: &str) -> Option<String> {
    props
        .get(name)
        .and_then(|p| p.get("rich_text"))
        .and_then(|t| t.get(0))
        .and_then(|f| f.get("plain_text"))
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
