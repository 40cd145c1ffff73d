//! ETL job configuration
//!
//! All job parameters are fixed constants used as defaults; environment
//! variables override them. A `.env` file is loaded via `dotenvy` before the
//! environment is read.

use atlas_common::{AtlasError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Source API endpoint returning the full JSON array of country documents
pub const DEFAULT_SOURCE_URL: &str = "https://restcountries.com/v3.1/all";

/// HTTP request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Local path the Parquet file is written to by the extract job
pub const DEFAULT_OUTPUT_PATH: &str = "data/raw_data.parquet";

/// S3 bucket holding the raw Parquet object
pub const DEFAULT_BUCKET: &str = "travel-agency-data-lakes";

/// Object key of the raw Parquet file inside the bucket
pub const DEFAULT_OBJECT_KEY: &str = "raw_data.parquet";

/// DynamoDB table the analytics records are written to
pub const DEFAULT_TABLE: &str = "analytics_data";

/// Configuration for the country source fetch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Endpoint URL
    pub url: String,

    /// HTTP timeout in seconds
    pub timeout_secs: u64,

    /// Fetch limit for testing (None = keep all records)
    pub limit: Option<usize>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            url: DEFAULT_SOURCE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            limit: None,
        }
    }
}

impl SourceConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.url.is_empty() {
            return Err(AtlasError::config("Source URL cannot be empty"));
        }

        if self.timeout_secs == 0 {
            return Err(AtlasError::config("Timeout must be greater than 0"));
        }

        if let Some(0) = self.limit {
            return Err(AtlasError::config("Fetch limit must be greater than 0"));
        }

        Ok(())
    }
}

/// Top-level ETL job configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EtlConfig {
    /// Country source fetch settings
    pub source: SourceConfig,

    /// Local path for the Parquet file
    pub local_path: PathBuf,

    /// S3 object key for the Parquet file
    pub object_key: String,
}

impl Default for EtlConfig {
    fn default() -> Self {
        EtlConfig {
            source: SourceConfig::default(),
            local_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            object_key: DEFAULT_OBJECT_KEY.to_string(),
        }
    }
}

impl EtlConfig {
    /// Load configuration: `.env` file, then environment overrides
    ///
    /// Environment variables:
    /// - `ATLAS_SOURCE_URL`: source endpoint
    /// - `ATLAS_TIMEOUT_SECS`: HTTP timeout in seconds
    /// - `ATLAS_FETCH_LIMIT`: truncate the fetched list (testing)
    /// - `ATLAS_OUTPUT_PATH`: local Parquet path
    /// - `S3_OBJECT_KEY`: Parquet object key in the bucket
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(url) = env::var("ATLAS_SOURCE_URL") {
            config.source.url = url;
        }

        if let Ok(timeout) = env::var("ATLAS_TIMEOUT_SECS") {
            config.source.timeout_secs = timeout
                .parse()
                .map_err(|_| AtlasError::config(format!("Invalid ATLAS_TIMEOUT_SECS: {timeout}")))?;
        }

        if let Ok(limit) = env::var("ATLAS_FETCH_LIMIT") {
            config.source.limit = Some(
                limit
                    .parse()
                    .map_err(|_| AtlasError::config(format!("Invalid ATLAS_FETCH_LIMIT: {limit}")))?,
            );
        }

        if let Ok(path) = env::var("ATLAS_OUTPUT_PATH") {
            config.local_path = PathBuf::from(path);
        }

        if let Ok(key) = env::var("S3_OBJECT_KEY") {
            config.object_key = key;
        }

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.source.validate()?;

        if self.object_key.is_empty() {
            return Err(AtlasError::config("Object key cannot be empty"));
        }

        if self.local_path.as_os_str().is_empty() {
            return Err(AtlasError::config("Local output path cannot be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EtlConfig::default();
        assert_eq!(config.source.url, DEFAULT_SOURCE_URL);
        assert_eq!(config.source.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.source.limit, None);
        assert_eq!(config.local_path, PathBuf::from("data/raw_data.parquet"));
        assert_eq!(config.object_key, "raw_data.parquet");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_url() {
        let mut config = EtlConfig::default();
        config.source.url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = EtlConfig::default();
        config.source.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_limit() {
        let mut config = EtlConfig::default();
        config.source.limit = Some(0);
        assert!(config.validate().is_err());
    }
}
