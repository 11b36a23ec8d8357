//! Client for the Islandora Solr endpoint.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SolrConfig;
use crate::query::{QueryBuilder, QueryError, SearchParameters};

const USER_AGENT: &str = concat!("morgan-search/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Solr returned status {0}")]
    Status(u16),

    #[error("Failed to decode Solr response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Solr `wt=json` response with the header omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolrResponse {
    pub response: SolrResultSet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolrResultSet {
    #[serde(rename = "numFound")]
    pub num_found: u64,
    #[serde(default)]
    pub start: u64,
    #[serde(default)]
    pub docs: Vec<serde_json::Value>,
}

/// Issues built queries against the search backend.
#[derive(Clone)]
pub struct IslandoraService {
    client: Client,
    builder: QueryBuilder,
}

impl IslandoraService {
    pub fn new(config: &SolrConfig) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            builder: QueryBuilder::new(config),
        })
    }

    pub fn builder(&self) -> &QueryBuilder {
        &self.builder
    }

    /// Run a search starting at result `start`.
    pub async fn search(
        &self,
        params: &SearchParameters,
        start: usize,
    ) -> Result<SolrResponse, ServiceError> {
        let url = self.builder.build_query(params, start)?;
        self.fetch(&url).await
    }

    /// GET an already encoded query URL and decode the result set.
    pub async fn fetch(&self, url: &str) -> Result<SolrResponse, ServiceError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Solr request failed with {}: {}", status, url);
            return Err(ServiceError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        parse_response(&body)
    }
}

/// Decode a Solr JSON body.
pub fn parse_response(body: &str) -> Result<SolrResponse, ServiceError> {
    Ok(serde_json::from_str(body)?)
}
