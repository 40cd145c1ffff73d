//! Extract and load pipelines
//!
//! Two independent, run-to-completion jobs with no shared state:
//!
//! - [`ExtractPipeline`]: fetch -> encode Parquet -> local disk -> S3
//! - [`LoadPipeline`]: S3 -> decode Parquet -> normalize -> DynamoDB
//!
//! All collaborators are constructor-injected so tests can substitute a mock
//! HTTP server or an S3-compatible endpoint.

use crate::countries::client::CountriesClient;
use crate::countries::models::{AnalyticsRecord, RawCountry};
use crate::countries::transform::normalize;
use crate::dynamo::AnalyticsTable;
use crate::parquet;
use crate::storage::{Storage, UploadResult};
use atlas_common::{AtlasError, Result};
use std::path::PathBuf;
use tracing::info;

/// Fetch the source API and persist the raw Parquet file
pub struct ExtractPipeline {
    client: CountriesClient,
    storage: Option<Storage>,
    local_path: PathBuf,
    object_key: String,
}

/// Outcome of an extract run
#[derive(Debug, Clone)]
pub struct ExtractStats {
    pub records: usize,
    pub bytes: usize,
    pub uploaded: Option<UploadResult>,
}

impl ExtractPipeline {
    /// `storage: None` skips the upload and only writes the local file
    pub fn new(
        client: CountriesClient,
        storage: Option<Storage>,
        local_path: PathBuf,
        object_key: String,
    ) -> Self {
        Self {
            client,
            storage,
            local_path,
            object_key,
        }
    }

    pub async fn run(&self) -> Result<ExtractStats> {
        info!("starting extract: fetch -> parquet -> store");

        let rows = self.client.fetch_all().await?;
        if rows.is_empty() {
            return Err(AtlasError::EmptyPayload(
                "source returned zero country documents".to_string(),
            ));
        }

        let bytes = parquet::encode(&rows)?;

        if let Some(parent) = self.local_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(&self.local_path, &bytes).await?;
        info!(
            path = %self.local_path.display(),
            size = bytes.len(),
            "wrote raw parquet file"
        );

        let uploaded = match &self.storage {
            Some(storage) => Some(
                storage
                    .upload(
                        &self.object_key,
                        bytes.clone(),
                        Some("application/vnd.apache.parquet".to_string()),
                    )
                    .await?,
            ),
            None => None,
        };

        Ok(ExtractStats {
            records: rows.len(),
            bytes: bytes.len(),
            uploaded,
        })
    }
}

/// Read the raw Parquet object back, normalize, and load into the table
pub struct LoadPipeline {
    storage: Storage,
    table: AnalyticsTable,
    object_key: String,
}

/// Outcome of a load run
#[derive(Debug, Clone)]
pub struct LoadStats {
    pub records: usize,
    pub batches: usize,
}

impl LoadPipeline {
    pub fn new(storage: Storage, table: AnalyticsTable, object_key: String) -> Self {
        Self {
            storage,
            table,
            object_key,
        }
    }

    pub async fn run(&self) -> Result<LoadStats> {
        info!("starting load: parquet -> normalize -> table");

        let bytes = self.storage.download(&self.object_key).await?;
        let rows: Vec<RawCountry> = parquet::decode(bytes)?;
        info!(rows = rows.len(), key = %self.object_key, "decoded raw parquet object");

        let records: Vec<AnalyticsRecord> = rows.iter().map(normalize).collect();

        let stats = self.table.write_batch(&records).await?;

        Ok(LoadStats {
            records: stats.records,
            batches: stats.batches,
        })
    }
}
