//! Prisoner search client - the identity search gateway.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;

use reception_core::error::{Collaborator, ReceptionError};
use reception_core::matching::{IdentityQuery, MatchedIdentity};
use reception_core::ports::IdentitySearchGateway;

use super::{build_http_client, endpoint, read_list};
use crate::config::UpstreamConfig;

pub struct PrisonerSearchClient {
    client: Client,
    base_url: String,
}

impl PrisonerSearchClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        Ok(Self {
            client: build_http_client(config)?,
            base_url: config.base_url.clone(),
        })
    }

    async fn match_prisoners(&self, query: &IdentityQuery) -> Result<Vec<MatchedIdentity>> {
        let url = endpoint(&self.base_url, "/match-prisoners");

        let response = self
            .client
            .post(&url)
            .json(query)
            .send()
            .await
            .context("Failed to send match-prisoners request")?;

        read_list(response).await
    }
}

#[async_trait]
impl IdentitySearchGateway for PrisonerSearchClient {
    async fn search(&self, query: &IdentityQuery) -> reception_core::Result<Vec<MatchedIdentity>> {
        self.match_prisoners(query).await.map_err(|e| {
            tracing::warn!(error = %e, "prisoner search failed");
            ReceptionError::upstream(Collaborator::IdentitySearch, e)
        })
    }
}
