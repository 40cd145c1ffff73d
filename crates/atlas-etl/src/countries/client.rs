//! HTTP client for the REST Countries API

use crate::config::SourceConfig;
use crate::countries::models::RawCountry;
use atlas_common::{AtlasError, Result};
use std::time::Duration;
use tracing::{debug, info};

/// Client fetching the full country list from the source API
pub struct CountriesClient {
    client: reqwest::Client,
    config: SourceConfig,
}

impl CountriesClient {
    /// Create a new client with the configured timeout and user-agent
    pub fn new(config: SourceConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("atlas-etl/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AtlasError::Http(e.to_string()))?;

        Ok(CountriesClient { client, config })
    }

    /// Fetch the country list with a single GET; any non-2xx status is fatal
    pub async fn fetch_all(&self) -> Result<Vec<RawCountry>> {
        debug!(url = %self.config.url, "fetching country documents");

        let response = self
            .client
            .get(&self.config.url)
            .send()
            .await
            .map_err(|e| AtlasError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AtlasError::UnexpectedStatus {
                url: self.config.url.clone(),
                status: status.as_u16(),
            });
        }

        let mut countries: Vec<RawCountry> = response
            .json()
            .await
            .map_err(|e| AtlasError::Http(format!("invalid response body: {e}")))?;

        if let Some(limit) = self.config.limit {
            countries.truncate(limit);
        }

        info!(count = countries.len(), "fetched country documents");

        Ok(countries)
    }
}
