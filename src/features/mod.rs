pub mod deliver;

pub use deliver::{DeliveryPipeline, DeliveryReport};
