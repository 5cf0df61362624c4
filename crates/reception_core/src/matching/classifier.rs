//! Current-prisoner classification.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Registry status of someone who has left custody.
pub const INACTIVE_OUT: &str = "INACTIVE OUT";

/// True iff `status` is present and is not exactly `INACTIVE OUT`.
///
/// Computed on demand from the raw status so it can never go stale.
pub fn is_current(status: Option<&str>) -> bool {
    matches!(status, Some(s) if s != INACTIVE_OUT)
}

/// A candidate record returned by the identity registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedIdentity {
    #[serde(default)]
    pub prisoner_number: Option<String>,
    #[serde(default)]
    pub pnc_number: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub cro_number: Option<String>,
    #[serde(default)]
    pub prison_id: Option<String>,
}

impl MatchedIdentity {
    pub fn is_current(&self) -> bool {
        is_current(self.status.as_deref())
    }
}
