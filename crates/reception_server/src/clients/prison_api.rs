//! Prison API client - per-person personal care need counts.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;

use reception_core::error::{Collaborator, ReceptionError};
use reception_core::ports::{RawScanCount, ScanCountSource};

use super::{build_http_client, endpoint, read_list};
use crate::config::UpstreamConfig;

const COUNT_PATH: &str = "/api/bookings/offenderNo/personal-care-needs/count";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersonalCareCount {
    offender_no: String,
    size: u32,
}

pub struct PrisonApiScanCountClient {
    client: Client,
    base_url: String,
}

impl PrisonApiScanCountClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        Ok(Self {
            client: build_http_client(config)?,
            base_url: config.base_url.clone(),
        })
    }

    async fn fetch_counts(
        &self,
        event_type: &str,
        from: NaiveDate,
        to: NaiveDate,
        person_identifiers: &[String],
    ) -> Result<Vec<PersonalCareCount>> {
        let url = endpoint(&self.base_url, COUNT_PATH);
        let from = from.format("%Y-%m-%d").to_string();
        let to = to.format("%Y-%m-%d").to_string();

        let response = self
            .client
            .post(&url)
            .query(&[
                ("type", event_type),
                ("fromStartDate", from.as_str()),
                ("toStartDate", to.as_str()),
            ])
            .json(person_identifiers)
            .send()
            .await
            .context("Failed to send personal care need count request")?;

        read_list(response).await
    }
}

#[async_trait]
impl ScanCountSource for PrisonApiScanCountClient {
    async fn counts(
        &self,
        event_type: &str,
        from: NaiveDate,
        to: NaiveDate,
        person_identifiers: &[String],
    ) -> reception_core::Result<Vec<RawScanCount>> {
        let counts = self
            .fetch_counts(event_type, from, to, person_identifiers)
            .await
            .map_err(|e| {
                tracing::warn!(
                    error = %e,
                    event_type,
                    persons = person_identifiers.len(),
                    "scan count request failed"
                );
                ReceptionError::upstream(Collaborator::ScanCountSource, e)
            })?;

        Ok(counts
            .into_iter()
            .map(|c| RawScanCount {
                person_identifier: c.offender_no,
                count: c.size,
            })
            .collect())
    }
}
