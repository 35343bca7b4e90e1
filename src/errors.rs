use thiserror::Error;

/// A single content-acquisition attempt failed.
///
/// These are swallowed and logged at the attempt level; only exhaustion of a
/// slot's retry budget surfaces to the caller, as an [`AcquireError`].
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to send HTTP request: {0}")]
    Http(String),

    #[error("Malformed response from content source: {0}")]
    MalformedResponse(String),

    #[error("Required field `{0}` is missing or empty")]
    MissingField(&'static str),

    #[error("Content source returned no candidates")]
    EmptyResultSet,
}

impl From<reqwest::Error> for SourceError {
    fn from(error: reqwest::Error) -> Self {
        SourceError::Http(error.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(error: serde_json::Error) -> Self {
        SourceError::MalformedResponse(error.to_string())
    }
}

/// Batch acquisition could not fill a slot after all retries.
///
/// Carries every underlying attempt failure so the caller sees the full
/// picture, not just the last error.
#[derive(Debug, Error)]
#[error("Failed to acquire item {slot} after {attempts} attempts: {}", causes.join(", "))]
pub struct AcquireError {
    /// Zero-based index of the batch slot that could not be filled.
    pub slot: usize,
    /// Number of attempts actually made for that slot.
    pub attempts: usize,
    /// One message per failed attempt, in order.
    pub causes: Vec<String>,
}

/// An outbound webhook send failed.
///
/// Not retried; chunks after the failing one are not attempted.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Failed to send HTTP request: {0}")]
    Http(String),

    #[error("Webhook rejected message with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

impl From<reqwest::Error> for DeliveryError {
    fn from(error: reqwest::Error) -> Self {
        DeliveryError::Http(error.to_string())
    }
}

/// A delivery run failed at the batch or delivery level.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Acquire(#[from] AcquireError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}
