//! S3 object storage wrapper
//!
//! Single-object put/get for the raw Parquet file. SDK errors are surfaced
//! with their full error context so service-side causes appear in the log.

use atlas_common::{AtlasError, Result};
use aws_sdk_s3::{
    config::{Credentials, Region},
    error::DisplayErrorContext,
    primitives::ByteStream,
    Client,
};
use tracing::{debug, info, instrument};

pub mod config;

pub use config::StorageConfig;

#[derive(Clone)]
pub struct Storage {
    client: Client,
    bucket: String,
}

impl Storage {
    pub async fn new(config: StorageConfig) -> Result<Self> {
        debug!(bucket = %config.bucket, endpoint = ?config.endpoint, "initializing storage client");

        let credentials = Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            "atlas-storage",
        );

        let mut s3_config_builder = aws_sdk_s3::Config::builder()
            .credentials_provider(credentials)
            .region(Region::new(config.region.clone()))
            .force_path_style(config.path_style);

        if let Some(endpoint) = &config.endpoint {
            s3_config_builder = s3_config_builder.endpoint_url(endpoint);
        }

        let client = Client::from_conf(s3_config_builder.build());

        info!(bucket = %config.bucket, "storage client initialized");

        Ok(Self {
            client,
            bucket: config.bucket,
        })
    }

    #[instrument(skip(self, data))]
    pub async fn upload(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<UploadResult> {
        let checksum = calculate_sha256(&data);
        let size = data.len() as i64;

        debug!("Uploading {} bytes to s3://{}/{}", size, self.bucket, key);

        let mut request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data));

        if let Some(ct) = content_type {
            request = request.content_type(ct);
        }

        request.send().await.map_err(|e| {
            AtlasError::Storage(format!(
                "failed to upload s3://{}/{}: {}",
                self.bucket,
                key,
                DisplayErrorContext(&e)
            ))
        })?;

        info!("Successfully uploaded to s3://{}/{}", self.bucket, key);

        Ok(UploadResult {
            key: key.to_string(),
            checksum,
            size,
        })
    }

    #[instrument(skip(self))]
    pub async fn download(&self, key: &str) -> Result<Vec<u8>> {
        debug!("Downloading from s3://{}/{}", self.bucket, key);

        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                AtlasError::Storage(format!(
                    "failed to download s3://{}/{}: {}",
                    self.bucket,
                    key,
                    DisplayErrorContext(&e)
                ))
            })?;

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| AtlasError::Storage(format!("failed to read S3 response body: {e}")))?
            .into_bytes()
            .to_vec();

        debug!(
            "Downloaded {} bytes from s3://{}/{}",
            data.len(),
            self.bucket,
            key
        );

        Ok(data)
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[derive(Debug, Clone)]
pub struct UploadResult {
    pub key: String,
    pub checksum: String,
    pub size: i64,
}

fn calculate_sha256(data: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_sha256() {
        let data = b"Hello, World!";
        let checksum = calculate_sha256(data);
        assert_eq!(
            checksum,
            "dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f"
        );
    }
}
