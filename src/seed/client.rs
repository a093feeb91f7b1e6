//! Downloads the seed snapshot over HTTP.

use std::time::Duration;

use crate::{Error, transaction::Transaction};

use super::record::parse_seed_payload;

/// Fetches the transaction snapshot from a fixed URL.
#[derive(Debug, Clone)]
pub struct SeedClient {
    url: String,
    client: reqwest::Client,
}

impl SeedClient {
    /// Create a client that fetches from `url` and gives up after `timeout`.
    ///
    /// # Errors
    /// Returns [Error::SeedFetch] if the HTTP client could not be built, e.g.
    /// the TLS backend failed to initialise.
    pub fn new(url: &str, timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| Error::SeedFetch(format!("could not build HTTP client: {error}")))?;

        Ok(Self {
            url: url.to_owned(),
            client,
        })
    }

    /// The URL the snapshot is fetched from.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Download and parse the snapshot.
    ///
    /// # Errors
    /// Returns [Error::SeedFetch] if the request fails, times out or gets a
    /// non-success status, and [Error::InvalidSeedRecord] if the body is not
    /// a valid list of sale records.
    pub async fn fetch(&self) -> Result<Vec<Transaction>, Error> {
        tracing::debug!("fetching seed data from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|error| Error::SeedFetch(error.to_string()))?;

        let body = response
            .bytes()
            .await
            .map_err(|error| Error::SeedFetch(error.to_string()))?;

        parse_seed_payload(&body)
    }
}
