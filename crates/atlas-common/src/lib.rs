//! Atlas Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types and utilities for the Atlas ETL workspace:
//!
//! - **Error Handling**: the workspace-wide [`AtlasError`] and `Result` alias
//! - **Logging**: `tracing` initialization shared by every binary

pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{AtlasError, Result};
