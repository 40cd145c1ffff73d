//! Atlas ETL - country analytics pipeline
//!
//! Fetches the REST Countries API, persists the raw payload as Parquet
//! (local disk + S3), then reads it back, normalizes every row into a flat
//! analytics record, and batch-writes the records into DynamoDB.
//!
//! # Modules
//!
//! - [`config`]: job parameters (fixed defaults + environment overrides)
//! - [`countries`]: the ingest source - wire models, HTTP client,
//!   normalization, and the extract/load pipelines
//! - [`parquet`]: columnar encode/decode over serde row types
//! - [`storage`]: S3 object storage wrapper
//! - [`dynamo`]: DynamoDB batch writer and item marshalling

pub mod config;
pub mod countries;
pub mod dynamo;
pub mod parquet;
pub mod storage;

pub use atlas_common::{AtlasError, Result};
