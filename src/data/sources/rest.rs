//! REST Countries API source.
//!
//! One GET, no retries and no client timeout: a hung request leaves the
//! UI on its last good data.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde_json::Value;

use crate::data::source::{CountrySource, SourceError, parse_records};

/// The API caps `fields` at ten entries; `tld` is left out.
pub const DEFAULT_API_URL: &str = "https://restcountries.com/v3.1/all?fields=name,population,region,subregion,capital,flags,borders,cca3,languages,currencies";

pub struct RestCountriesSource {
    url: String,
    client: reqwest::Client,
}

impl RestCountriesSource {
    pub fn new(url: Option<String>) -> Self {
        Self {
            url: url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CountrySource for RestCountriesSource {
    fn name(&self) -> &str {
        "rest"
    }

    async fn fetch(&self) -> Result<Vec<Value>, SourceError> {
        info!("Requesting countries from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        debug!("Countries API response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Countries API error: {} - {}", status, err_body);
            return Err(SourceError::Api {
                status,
                message: err_body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;
        let records = parse_records(&body)?;
        info!("Countries API returned {} records", records.len());
        Ok(records)
    }
}
