//! LLM (OpenAI) API client module
//!
//! Encapsulates the chat-completions calls that generate idioms and
//! Indonesian expressions as structured JSON.

use std::time::Duration;

use reqwest::Client;
use serde_json::{Value, json};
use tokio_retry::Retry;
use tokio_retry::strategy::FixedInterval;
use tracing::{info, warn};

use crate::errors::SourceError;

const DEFAULT_MODEL: &str = "gpt-4-1106-preview";
const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

// A malformed or field-incomplete completion is re-prompted a couple of
// times before the attempt is surfaced to the acquirer's own retry loop.
const REPROMPT_EXTRA_ATTEMPTS: usize = 2;
const REPROMPT_DELAY_MS: u64 = 500;

const IDIOM_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that generates interesting and useful English idioms.";

const IDIOM_USER_PROMPT: &str = r#"Generate a random English idiom that is:
1. Commonly used in modern conversations
2. Not too basic or obvious
3. Interesting to learn for non-native speakers
4. Different from common idioms like "break a leg", "piece of cake", etc.

Format the response as JSON:
{
  "phrase": "the idiom itself",
  "meaning": "clear, concise explanation of what it means"
}"#;

const EXAMPLES_SYSTEM_PROMPT: &str = "You are a helpful assistant that generates natural, \
conversational examples of how to use idioms in everyday situations, with accurate Indonesian \
translations.";

const EXPRESSION_SYSTEM_PROMPT: &str = r#"You are a helpful assistant that generates casual Indonesian phrases and their English equivalents.
Focus on common, everyday expressions that Indonesians use in casual conversations.

Important guidelines:
1. Use '::x::' or '::y::' as template variables when the phrase can be used with different words
2. Keep the Indonesian phrases colloquial (use "gue", "aja", "banget", etc.)
3. If there's a common alternative way to say the phrase, include it in alt_phrases
4. Focus on expressions that might be tricky for English speakers to translate directly
5. Each generated phrase should be unique and cover different contexts or situations
6. Avoid basic or literal translations; focus on idiomatic expressions
7. Include regional variations when relevant (Javanese influence, Jakarta slang, etc.)

Format the response as JSON:
{
  "indonesian": "the phrase",
  "english": "its English equivalent",
  "example": { "english": "usage example", "indonesian": "its translation" },
  "alt_phrases": "optional alternative phrasing"
}"#;

const EXPRESSION_USER_PROMPT: &str = "Generate a unique casual Indonesian phrase with its \
English equivalent. Make it colloquial, commonly used in daily conversations, and different \
from the example outputs. If there's a common alternative way to say it, include it in \
alt_phrases.";

/// A freshly generated idiom, before examples are attached.
#[derive(Debug, Clone)]
pub struct GeneratedIdiom {
    pub phrase: String,
    pub meaning: String,
}

/// A freshly generated Indonesian expression.
#[derive(Debug, Clone)]
pub struct GeneratedExpression {
    pub indonesian: String,
    pub english: String,
    pub examples: String,
    pub alt_phrases: Option<String>,
}

/// LLM API client for generating content items
pub struct LlmClient {
    http: Client,
    api_key: String,
    model: String,
}

impl LlmClient {
    pub fn new(api_key: String, model: Option<String>) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http,
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }

    pub async fn generate_idiom(&self) -> Result<GeneratedIdiom, SourceError> {
        Retry::spawn(self.reprompt_strategy(), || self.try_generate_idiom()).await
    }

    pub async fn generate_expression(&self) -> Result<GeneratedExpression, SourceError> {
        Retry::spawn(self.reprompt_strategy(), || self.try_generate_expression()).await
    }

    /// Generate two bilingual example sentences for an idiom, rendered as a
    /// single text block. Falls back to templated examples on failure rather
    /// than losing the idiom itself.
    pub async fn generate_idiom_examples(&self, phrase: &str, meaning: &str) -> String {
        match self.try_generate_examples(phrase, meaning).await {
            Ok(examples) => examples,
            Err(err) => {
                warn!(phrase, error = %err, "Failed to generate idiom examples, using template");
                format!(
                    "🇬🇧 She told me it would be {phrase} to learn a new language in just one month.\n\
                     🇮🇩 Dia bilang akan {phrase} untuk belajar bahasa baru hanya dalam satu bulan."
                )
            }
        }
    }

    fn reprompt_strategy(&self) -> impl Iterator<Item = Duration> {
        FixedInterval::from_millis(REPROMPT_DELAY_MS).take(REPROMPT_EXTRA_ATTEMPTS)
    }

    async fn try_generate_idiom(&self) -> Result<GeneratedIdiom, SourceError> {
        let result = self.chat_json(IDIOM_SYSTEM_PROMPT, IDIOM_USER_PROMPT).await?;

        Ok(GeneratedIdiom {
            phrase: require_str(&result, "phrase")?,
            meaning: require_str(&result, "meaning")?,
        })
    }

    async fn try_generate_expression(&self) -> Result<GeneratedExpression, SourceError> {
        let result = self
            .chat_json(EXPRESSION_SYSTEM_PROMPT, EXPRESSION_USER_PROMPT)
            .await?;

        let example = result
            .get("example")
            .ok_or(SourceError::MissingField("example"))?;
        let example_english = require_str(example, "english")?;
        let example_indonesian = require_str(example, "indonesian")?;

        let alt_phrases = result
            .get("alt_phrases")
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(GeneratedExpression {
            indonesian: require_str(&result, "indonesian")?,
            english: require_str(&result, "english")?,
            examples: format!("🇬🇧 {example_english}\n🇮🇩 {example_indonesian}"),
            alt_phrases,
        })
    }

    async fn try_generate_examples(
        &self,
        phrase: &str,
        meaning: &str,
    ) -> Result<String, SourceError> {
        let prompt = format!(
            "Given the idiom \"{phrase}\" which means \"{meaning}\", generate 2 natural, \
             conversational example sentences using this idiom. Each example should be in a \
             different context. Make the examples relatable and modern. Then translate each \
             example to Indonesian, maintaining the natural conversational tone. Format the \
             output as JSON:\n\n{{\n  \"examples\": [\n    {{\n      \"english\": \"example1\",\n      \
             \"indonesian\": \"translation1\"\n    }},\n    {{\n      \"english\": \"example2\",\n      \
             \"indonesian\": \"translation2\"\n    }}\n  ]\n}}"
        );

        let result = self.chat_json(EXAMPLES_SYSTEM_PROMPT, &prompt).await?;

        let examples = result
            .get("examples")
            .and_then(|v| v.as_array())
            .ok_or(SourceError::MissingField("examples"))?;
        if examples.is_empty() {
            return Err(SourceError::MissingField("examples"));
        }

        let rendered: Vec<String> = examples
            .iter()
            .map(|example| {
                let english = require_str(example, "english")?;
                let indonesian = require_str(example, "indonesian")?;
                Ok(format!("🇬🇧 {english}\n🇮🇩 {indonesian}"))
            })
            .collect::<Result<_, SourceError>>()?;

        Ok(rendered.join("\n"))
    }

    /// One chat-completions call constrained to a JSON object response;
    /// returns the parsed object from the first choice.
    async fn chat_json(&self, system: &str, user: &str) -> Result<Value, SourceError> {
        let request_body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
            "response_format": { "type": "json_object" },
        });

        info!(model = %self.model, "Requesting completion");

        let response = self
            .http
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| SourceError::Http(format!("OpenAI API request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SourceError::Http(format!(
                "OpenAI API returned {status}: {error_text}"
            )));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            SourceError::MalformedResponse(format!("Failed to parse OpenAI response: {e}"))
        })?;

        let content = response_json
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .ok_or_else(|| {
                SourceError::MalformedResponse("No content in OpenAI response".to_string())
            })?;

        serde_json::from_str(content)
            .map_err(|e| SourceError::MalformedResponse(format!("Completion is not JSON: {e}")))
    }
}

fn require_str(value: &Value, field: &'static str) -> Result<String, SourceError> {
    value
        .get(field)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or(SourceError::MissingField(field))
}
