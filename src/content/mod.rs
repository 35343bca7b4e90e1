pub mod acquirer;
pub mod fallback;
pub mod fingerprint;
pub mod recency;
pub mod source;
