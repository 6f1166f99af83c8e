//! Fetching the initial record collection from the third-party data source.

use std::{fmt::Debug, time::Duration};

use async_trait::async_trait;

use serde_json::Value;

use crate::{
    Error,
    record::{Record, records_from_values},
};

/// Where the product transaction seed data is published.
pub const DEFAULT_SEED_URL: &str = "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

/// Provides the records used to (re)initialize the record store.
#[async_trait]
pub trait SeedProvider: Debug + Send + Sync {
    /// Fetch the full seed collection.
    async fn fetch(&self) -> Result<Vec<Record>, Error>;
}

/// Downloads the seed collection as a JSON array over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSeedProvider {
    client: reqwest::Client,
    url: String,
}

impl HttpSeedProvider {
    /// Create a provider that fetches from `url`, giving up after `timeout`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| Error::SeedFetch(error.to_string()))?;

        Ok(Self {
            client,
            url: url.to_owned(),
        })
    }
}

#[async_trait]
impl SeedProvider for HttpSeedProvider {
    async fn fetch(&self) -> Result<Vec<Record>, Error> {
        tracing::info!("fetching seed data from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|error| Error::SeedFetch(error.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::SeedStatus(response.status().as_u16()));
        }

        let values: Vec<Value> = response
            .json()
            .await
            .map_err(|error| Error::SeedDecode(error.to_string()))?;
        let records = records_from_values(values);

        tracing::info!("fetched {} seed records", records.len());

        Ok(records)
    }
}
