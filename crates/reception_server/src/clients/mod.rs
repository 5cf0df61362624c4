//! HTTP clients for the upstream registries.
//!
//! Neither client retries; timeouts come from the configured
//! `reqwest::Client`. Failures are wrapped as upstream errors naming the
//! collaborator.

pub mod prison_api;
pub mod prisoner_search;

pub use prison_api::PrisonApiScanCountClient;
pub use prisoner_search::PrisonerSearchClient;

use anyhow::{Context, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::UpstreamConfig;

pub(crate) fn build_http_client(config: &UpstreamConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .context("Failed to create HTTP client")
}

pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Read a JSON list body. An empty or `null` body means no results.
pub(crate) async fn read_list<T: DeserializeOwned>(response: Response) -> Result<Vec<T>> {
    let status = response.status();
    let text = response
        .text()
        .await
        .context("Failed to read response body")?;

    if !status.is_success() {
        return Err(anyhow::anyhow!(
            "upstream returned {}: {}",
            status,
            text.chars().take(200).collect::<String>()
        ));
    }

    if text.trim().is_empty() {
        return Ok(vec![]);
    }

    let parsed: Option<Vec<T>> = serde_json::from_str(&text).with_context(|| {
        format!(
            "Failed to parse response. First 500 chars: {}",
            text.chars().take(500).collect::<String>()
        )
    })?;
    Ok(parsed.unwrap_or_default())
}
