//! DynamoDB batch writer for analytics records

use crate::countries::models::AnalyticsRecord;
use atlas_common::{AtlasError, Result};
use aws_sdk_dynamodb::{
    config::{Credentials, Region},
    error::DisplayErrorContext,
    types::{PutRequest, WriteRequest},
    Client,
};
use tracing::{debug, info, instrument};

pub mod config;
pub mod item;

pub use config::TableConfig;

/// BatchWriteItem accepts at most 25 requests per call
const MAX_BATCH_ITEMS: usize = 25;

/// Writer putting analytics records into the DynamoDB table
#[derive(Clone)]
pub struct AnalyticsTable {
    client: Client,
    table: String,
}

impl AnalyticsTable {
    pub async fn new(config: TableConfig) -> Result<Self> {
        debug!(table = %config.table, endpoint = ?config.endpoint, "initializing table client");

        let credentials = Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            "atlas-dynamo",
        );

        let mut dynamo_config_builder = aws_sdk_dynamodb::Config::builder()
            .credentials_provider(credentials)
            .region(Region::new(config.region.clone()));

        if let Some(endpoint) = &config.endpoint {
            dynamo_config_builder = dynamo_config_builder.endpoint_url(endpoint);
        }

        let client = Client::from_conf(dynamo_config_builder.build());

        info!(table = %config.table, "table client initialized");

        Ok(Self {
            client,
            table: config.table,
        })
    }

    /// Write every record via batched puts, one item per record, chunked to
    /// the service's batch limit.
    ///
    /// Records overwrite by partition key. Any items the service leaves
    /// unprocessed are a fatal error; there is no resubmission.
    #[instrument(skip(self, records))]
    pub async fn write_batch(&self, records: &[AnalyticsRecord]) -> Result<WriteStats> {
        let mut batches = 0;

        for chunk in records.chunks(MAX_BATCH_ITEMS) {
            let mut requests = Vec::with_capacity(chunk.len());
            for record in chunk {
                let put = PutRequest::builder()
                    .set_item(Some(item::to_item(record)?))
                    .build()
                    .map_err(AtlasError::table)?;
                requests.push(WriteRequest::builder().put_request(put).build());
            }

            let response = self
                .client
                .batch_write_item()
                .request_items(self.table.clone(), requests)
                .send()
                .await
                .map_err(|e| {
                    AtlasError::Table(format!(
                        "batch write to {} failed: {}",
                        self.table,
                        DisplayErrorContext(&e)
                    ))
                })?;

            let unprocessed = response
                .unprocessed_items()
                .map(|items| items.values().map(Vec::len).sum::<usize>())
                .unwrap_or(0);
            if unprocessed > 0 {
                return Err(AtlasError::UnprocessedWrites { count: unprocessed });
            }

            batches += 1;
            debug!(batch = batches, items = chunk.len(), "batch written");
        }

        info!(
            records = records.len(),
            batches,
            table = %self.table,
            "batch write complete"
        );

        Ok(WriteStats {
            records: records.len(),
            batches,
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

/// Outcome of a batch write run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteStats {
    pub records: usize,
    pub batches: usize,
}
