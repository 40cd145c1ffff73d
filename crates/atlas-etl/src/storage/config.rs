//! S3 object storage configuration

use crate::config::DEFAULT_BUCKET;
use atlas_common::{AtlasError, Result};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub endpoint: Option<String>,
    pub region: String,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
    pub path_style: bool,
}

impl StorageConfig {
    /// Load from environment. Missing credentials are a fatal configuration
    /// error, never defaulted.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            endpoint: env::var("S3_ENDPOINT").ok(),
            region: env::var("S3_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            bucket: env::var("S3_BUCKET").unwrap_or_else(|_| DEFAULT_BUCKET.to_string()),
            access_key: env::var("S3_ACCESS_KEY")
                .or_else(|_| env::var("AWS_ACCESS_KEY_ID"))
                .map_err(|_| {
                    AtlasError::config("S3 credentials not set: S3_ACCESS_KEY or AWS_ACCESS_KEY_ID is required")
                })?,
            secret_key: env::var("S3_SECRET_KEY")
                .or_else(|_| env::var("AWS_SECRET_ACCESS_KEY"))
                .map_err(|_| {
                    AtlasError::config("S3 credentials not set: S3_SECRET_KEY or AWS_SECRET_ACCESS_KEY is required")
                })?,
            path_style: env::var("S3_PATH_STYLE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        })
    }

    /// Config for an S3-compatible endpoint in tests (MinIO)
    pub fn for_minio(endpoint: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            endpoint: Some(endpoint.into()),
            region: "us-east-1".to_string(),
            bucket: bucket.into(),
            access_key: "minioadmin".to_string(),
            secret_key: "minioadmin".to_string(),
            path_style: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_minio() {
        let config = StorageConfig::for_minio("http://localhost:9000", "test-bucket");
        assert_eq!(config.endpoint, Some("http://localhost:9000".to_string()));
        assert_eq!(config.bucket, "test-bucket");
        assert!(config.path_style);
        assert_eq!(config.access_key, "minioadmin");
    }

    #[test]
    fn test_from_env_fails_without_credentials() {
        env::remove_var("S3_ACCESS_KEY");
        env::remove_var("S3_SECRET_KEY");
        env::remove_var("AWS_ACCESS_KEY_ID");
        env::remove_var("AWS_SECRET_ACCESS_KEY");

        let err = StorageConfig::from_env().unwrap_err();
        assert!(matches!(err, AtlasError::Config(_)));
        assert!(err.to_string().contains("S3_ACCESS_KEY"));
    }
}
