//! Yearly scan-count aggregation.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{FieldError, ReceptionError, Result};
use crate::ports::ScanCountSource;

/// Event-type code for body scans in the prison API.
pub const BODY_SCAN_EVENT_TYPE: &str = "BSCAN";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanCountEntry {
    pub person_identifier: String,
    pub count: u32,
}

/// `[1 Jan, 31 Dec]` of `year`.
pub fn year_range(year: i32) -> Result<(NaiveDate, NaiveDate)> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .zip(NaiveDate::from_ymd_opt(year, 12, 31))
        .ok_or_else(|| {
            ReceptionError::Validation(vec![FieldError::new(
                "year",
                format!("Year {year} is out of range"),
            )])
        })
}

pub struct ScanCountAggregator {
    source: Arc<dyn ScanCountSource>,
    event_type: String,
}

impl ScanCountAggregator {
    pub fn new(source: Arc<dyn ScanCountSource>) -> Self {
        Self::with_event_type(source, BODY_SCAN_EVENT_TYPE)
    }

    pub fn with_event_type(
        source: Arc<dyn ScanCountSource>,
        event_type: impl Into<String>,
    ) -> Self {
        Self {
            source,
            event_type: event_type.into(),
        }
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// One entry per distinct identifier, in first-seen order. Identifiers the
    /// source is silent about get an explicit zero.
    ///
    /// A source failure fails the whole batch; there are no partial results.
    pub async fn aggregate(
        &self,
        year: i32,
        prison_numbers: &[String],
    ) -> Result<Vec<ScanCountEntry>> {
        if prison_numbers.is_empty() {
            return Ok(vec![]);
        }

        let (from, to) = year_range(year)?;
        let requested = distinct_in_order(prison_numbers);

        let raw = self
            .source
            .counts(&self.event_type, from, to, &requested)
            .await
            .map_err(|e| {
                tracing::warn!(
                    error = %e,
                    year,
                    persons = requested.len(),
                    "scan count request failed"
                );
                e
            })?;

        let counts: HashMap<String, u32> = raw
            .into_iter()
            .map(|r| (r.person_identifier, r.count))
            .collect();

        Ok(requested
            .into_iter()
            .map(|person_identifier| {
                let count = counts.get(&person_identifier).copied().unwrap_or(0);
                ScanCountEntry {
                    person_identifier,
                    count,
                }
            })
            .collect())
    }
}

fn distinct_in_order(ids: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    ids.iter()
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect()
}
