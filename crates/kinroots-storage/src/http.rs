//! Remote HTTP storage backend: syncs through the shared lineage API

use crate::error::{StorageError, StorageResult};
use crate::traits::LineageStore;
use async_trait::async_trait;
use kinroots_core::{Lineage, Person};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// Request body for the sync endpoint
#[derive(Serialize)]
struct SaveRequest<'a> {
    people: &'a [Person],
}

/// Remote API storage backend
///
/// Talks to a deployed lineage sync API: GET returns the full person list,
/// POST replaces it. The endpoint owns authentication and the actual
/// database behind it.
pub struct HttpStore {
    client: Client,
    endpoint: String,
}

impl HttpStore {
    /// Create a store for the given sync endpoint (e.g. `https://host/api/lineage`)
    pub fn new(endpoint: impl Into<String>) -> StorageResult<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl LineageStore for HttpStore {
    async fn initialize(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn close(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> StorageResult<bool> {
        match self.client.get(&self.endpoint).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(e) => {
                tracing::warn!(error = %e, "lineage endpoint unreachable");
                Ok(false)
            }
        }
    }

    async fn load_lineage(&self) -> StorageResult<Lineage> {
        let response = self.client.get(&self.endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(StorageError::RemoteApi {
                status: status.as_u16(),
                body,
            });
        }

        let people: Vec<Person> = response.json().await?;
        tracing::debug!(count = people.len(), "loaded lineage from remote API");
        Ok(Lineage::from_people(people))
    }

    async fn save_lineage(&self, lineage: &Lineage) -> StorageResult<()> {
        let request = SaveRequest {
            people: &lineage.people,
        };
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(StorageError::RemoteApi {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(count = lineage.len(), "saved lineage to remote API");
        Ok(())
    }
}
