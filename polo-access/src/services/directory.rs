//! Branch directory - where the full branch list comes from.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::models::Branch;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Branch directory unreachable: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Branch directory returned status {0}")]
    Status(u16),
}

#[async_trait]
pub trait BranchDirectory: Send + Sync {
    async fn list(&self) -> Result<Vec<Branch>, DirectoryError>;
}

/// Directory backed by `GET /polos`.
#[derive(Clone)]
pub struct HttpBranchDirectory {
    client: Client,
    base_url: String,
}

/// The backend answers either with a bare array or a `data` envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum BranchListResponse {
    Bare(Vec<Branch>),
    Envelope { data: Vec<Branch> },
}

impl HttpBranchDirectory {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DirectoryError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl BranchDirectory for HttpBranchDirectory {
    async fn list(&self) -> Result<Vec<Branch>, DirectoryError> {
        let url = format!("{}/polos", self.base_url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::error!("Failed to send GET request to {}: {}", url, e);
            e
        })?;

        if !response.status().is_success() {
            return Err(DirectoryError::Status(response.status().as_u16()));
        }

        let branches = match response.json::<BranchListResponse>().await? {
            BranchListResponse::Bare(branches) => branches,
            BranchListResponse::Envelope { data } => data,
        };
        tracing::debug!(count = branches.len(), "Branch directory loaded");
        Ok(branches)
    }
}

/// Fixed branch list.
#[derive(Debug, Clone, Default)]
pub struct StaticBranchDirectory {
    branches: Vec<Branch>,
}

impl StaticBranchDirectory {
    pub fn new(branches: Vec<Branch>) -> Self {
        Self { branches }
    }
}

#[async_trait]
impl BranchDirectory for StaticBranchDirectory {
    async fn list(&self) -> Result<Vec<Branch>, DirectoryError> {
        Ok(self.branches.clone())
    }
}
