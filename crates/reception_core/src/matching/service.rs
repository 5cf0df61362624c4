//! Match service - validate, search, classify.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::classifier::MatchedIdentity;
use super::rules::{validate, IdentityQuery};
use crate::error::Result;
use crate::ports::IdentitySearchGateway;

/// A registry candidate with its current-prisoner flag resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrisonerMatch {
    pub prisoner_number: Option<String>,
    pub pnc_number: Option<String>,
    pub status: Option<String>,
    pub is_current: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cro_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prison_id: Option<String>,
}

impl From<MatchedIdentity> for PrisonerMatch {
    fn from(m: MatchedIdentity) -> Self {
        let is_current = m.is_current();
        Self {
            prisoner_number: m.prisoner_number,
            pnc_number: m.pnc_number,
            status: m.status,
            is_current,
            first_name: m.first_name,
            last_name: m.last_name,
            date_of_birth: m.date_of_birth,
            cro_number: m.cro_number,
            prison_id: m.prison_id,
        }
    }
}

pub struct MatchService {
    gateway: Arc<dyn IdentitySearchGateway>,
}

impl MatchService {
    pub fn new(gateway: Arc<dyn IdentitySearchGateway>) -> Self {
        Self { gateway }
    }

    /// Validate the query, search the registry and classify each candidate.
    ///
    /// An invalid query never reaches the gateway.
    pub async fn match_identity(&self, query: &IdentityQuery) -> Result<Vec<PrisonerMatch>> {
        validate(query).into_result()?;

        let candidates = self.gateway.search(query).await?;
        tracing::info!(candidates = candidates.len(), "identity search complete");

        Ok(candidates.into_iter().map(PrisonerMatch::from).collect())
    }
}
