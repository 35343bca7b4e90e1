use std::env;

/// Which backend produces content for the delivery pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMode {
    /// Generate items with an LLM, topping up from the fallback pool.
    Generative,
    /// Pull items from a catalog store, marking them sent after delivery.
    Catalog,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub api_key: String,
    pub source_mode: SourceMode,
    pub openai_api_key: Option<String>,
    pub openai_model: Option<String>,
    pub idioms_webhook_url: Option<String>,
    pub phrases_webhook_url: Option<String>,
    pub catalog_token: Option<String>,
    pub catalog_idioms_database_id: Option<String>,
    pub catalog_expressions_database_id: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|e| format!("PORT: {} is not a valid port number ({e})", raw))?,
            Err(_) => 3000,
        };

        let source_mode = match env::var("CONTENT_SOURCE").as_deref() {
            Ok("catalog") => SourceMode::Catalog,
            Ok("generative") | Err(_) => SourceMode::Generative,
            Ok(other) => {
                return Err(format!(
                    "CONTENT_SOURCE: unknown mode `{other}` (expected `generative` or `catalog`)"
                ));
            }
        };

        Ok(Self {
            port,
            api_key: env::var("API_KEY").map_err(|e| format!("API_KEY: {e}"))?,
            source_mode,
            openai_api_key: env::var("OPENAI_API_KEY").ok(),
            openai_model: env::var("OPENAI_MODEL").ok(),
            idioms_webhook_url: env::var("IDIOMS_WEBHOOK_URL").ok(),
            phrases_webhook_url: env::var("PHRASES_WEBHOOK_URL").ok(),
            catalog_token: env::var("CATALOG_TOKEN").ok(),
            catalog_idioms_database_id: env::var("CATALOG_IDIOMS_DATABASE_ID").ok(),
            catalog_expressions_database_id: env::var("CATALOG_EXPRESSIONS_DATABASE_ID").ok(),
        })
    }
}
