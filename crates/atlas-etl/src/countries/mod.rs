//! REST Countries ingest source
//!
//! - [`models`]: wire/columnar row types and the flat analytics record
//! - [`client`]: HTTP fetch of the country list
//! - [`transform`]: per-row normalization mapping
//! - [`pipeline`]: the extract and load jobs

pub mod client;
pub mod models;
pub mod pipeline;
pub mod transform;

pub use client::CountriesClient;
pub use models::{AnalyticsRecord, RawCountry};
pub use pipeline::{ExtractPipeline, ExtractStats, LoadPipeline, LoadStats};
pub use transform::normalize;
