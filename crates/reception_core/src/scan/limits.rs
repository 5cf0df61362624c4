//! Scan-limit status
//!
//! Turns yearly counts into a per-person scanning decision against a
//! warning threshold and a hard limit.

use serde::{Deserialize, Serialize};

use super::aggregator::{ScanCountAggregator, ScanCountEntry};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanLimitPolicy {
    pub warning_threshold: u32,
    pub limit: u32,
}

impl Default for ScanLimitPolicy {
    fn default() -> Self {
        Self {
            warning_threshold: 100,
            limit: 116,
        }
    }
}

impl ScanLimitPolicy {
    pub fn status(&self, count: u32) -> ScanStatus {
        if count >= self.limit {
            ScanStatus::DoNotScan
        } else if count >= self.warning_threshold {
            ScanStatus::CloseToLimit
        } else {
            ScanStatus::OkToScan
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanStatus {
    OkToScan,
    CloseToLimit,
    DoNotScan,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanLimitEntry {
    pub person_identifier: String,
    pub count: u32,
    pub status: ScanStatus,
}

pub struct ScanLimitService {
    aggregator: ScanCountAggregator,
    policy: ScanLimitPolicy,
}

impl ScanLimitService {
    pub fn new(aggregator: ScanCountAggregator, policy: ScanLimitPolicy) -> Self {
        Self { aggregator, policy }
    }

    pub fn policy(&self) -> ScanLimitPolicy {
        self.policy
    }

    pub async fn scan_limit_status(
        &self,
        year: i32,
        prison_numbers: &[String],
    ) -> Result<Vec<ScanLimitEntry>> {
        let entries = self.aggregator.aggregate(year, prison_numbers).await?;
        Ok(entries
            .into_iter()
            .map(|ScanCountEntry { person_identifier, count }| ScanLimitEntry {
                status: self.policy.status(count),
                person_identifier,
                count,
            })
            .collect())
    }
}
