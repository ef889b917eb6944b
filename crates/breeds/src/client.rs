//! HTTP client for a catalog that serves breeds as a JSON array of
//! `{"name": ...}` objects, such as TheCatAPI `/v1/breeds`.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use spycat_core::cat::BreedValidator;
use spycat_core::error::{CoreError, CoreResult};

/// One entry of the catalog listing. Other fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Breed {
    pub name: String,
}

/// Errors from the breed catalog layer.
#[derive(Debug, thiserror::Error)]
pub enum BreedCatalogError {
    /// The HTTP request failed (network, timeout, TLS) or the body did not
    /// decode.
    #[error("breed catalog request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The catalog answered with a non-200 status.
    #[error("breed catalog returned status {status}")]
    Status { status: u16 },
}

/// Breed catalog client.
///
/// Holds one [`reqwest::Client`] for the life of the process. Every lookup
/// fetches the full listing; nothing is cached.
#[derive(Clone)]
pub struct TheCatApiClient {
    client: reqwest::Client,
    catalog_url: String,
}

impl TheCatApiClient {
    /// Create a client for `catalog_url` with a per-request `timeout`.
    pub fn new(
        catalog_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, BreedCatalogError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, catalog_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, catalog_url: impl Into<String>) -> Self {
        Self {
            client,
            catalog_url: catalog_url.into(),
        }
    }

    /// Fetch the full breed listing.
    pub async fn fetch_breeds(&self) -> Result<Vec<Breed>, BreedCatalogError> {
        let response = self.client.get(&self.catalog_url).send().await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(BreedCatalogError::Status {
                status: status.as_u16(),
            });
        }

        Ok(response.json::<Vec<Breed>>().await?)
    }
}

/// Exact, case-sensitive lookup of `name` in a catalog listing.
pub fn contains_breed(breeds: &[Breed], name: &str) -> bool {
    breeds.iter().any(|breed| breed.name == name)
}

#[async_trait]
impl BreedValidator for TheCatApiClient {
    async fn validate_breed(&self, breed: &str) -> CoreResult<bool> {
        let breeds = self.fetch_breeds().await.map_err(|e| {
            tracing::warn!(error = %e, url = %self.catalog_url, "Breed catalog lookup failed");
            CoreError::Upstream(format!("error validating breed: {e}"))
        })?;
        Ok(contains_breed(&breeds, breed))
    }
}
