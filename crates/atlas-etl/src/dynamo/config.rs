//! DynamoDB table configuration

use crate::config::DEFAULT_TABLE;
use atlas_common::{AtlasError, Result};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    pub endpoint: Option<String>,
    pub region: String,
    pub table: String,
    pub access_key: String,
    pub secret_key: String,
}

impl TableConfig {
    /// Load from environment. Missing credentials are a fatal configuration
    /// error, never defaulted.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            endpoint: env::var("DYNAMO_ENDPOINT").ok(),
            region: env::var("DYNAMO_REGION")
                .or_else(|_| env::var("AWS_REGION"))
                .unwrap_or_else(|_| "us-east-1".to_string()),
            table: env::var("DYNAMO_TABLE").unwrap_or_else(|_| DEFAULT_TABLE.to_string()),
            access_key: env::var("DYNAMO_ACCESS_KEY")
                .or_else(|_| env::var("AWS_ACCESS_KEY_ID"))
                .map_err(|_| {
                    AtlasError::config("DynamoDB credentials not set: DYNAMO_ACCESS_KEY or AWS_ACCESS_KEY_ID is required")
                })?,
            secret_key: env::var("DYNAMO_SECRET_KEY")
                .or_else(|_| env::var("AWS_SECRET_ACCESS_KEY"))
                .map_err(|_| {
                    AtlasError::config("DynamoDB credentials not set: DYNAMO_SECRET_KEY or AWS_SECRET_ACCESS_KEY is required")
                })?,
        })
    }

    /// Config for a local DynamoDB endpoint in tests
    pub fn for_local(endpoint: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            endpoint: Some(endpoint.into()),
            region: "us-east-1".to_string(),
            table: table.into(),
            access_key: "local".to_string(),
            secret_key: "local".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_local() {
        let config = TableConfig::for_local("http://localhost:8000", "test-table");
        assert_eq!(config.endpoint, Some("http://localhost:8000".to_string()));
        assert_eq!(config.table, "test-table");
        assert_eq!(config.region, "us-east-1");
    }

    #[test]
    fn test_from_env_fails_without_credentials() {
        env::remove_var("DYNAMO_ACCESS_KEY");
        env::remove_var("DYNAMO_SECRET_KEY");
        env::remove_var("AWS_ACCESS_KEY_ID");
        env::remove_var("AWS_SECRET_ACCESS_KEY");

        let err = TableConfig::from_env().unwrap_err();
        assert!(matches!(err, AtlasError::Config(_)));
        assert!(err.to_string().contains("DYNAMO_ACCESS_KEY"));
    }
}
