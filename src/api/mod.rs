//! HTTP trigger surface: health, metrics, and manual delivery triggers.

pub mod auth;
pub mod rate_limit;
pub mod routes;

pub use routes::create_router;
