//! In-memory record store
//!
//! Backs local runs and tests. Answers window and roll-call queries with the
//! predicates in [`super::dedup`], so it is the reference behaviour the
//! Postgres store is checked against.

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::dedup::{is_same_day, is_within_window};
use super::types::{BookingKey, BookingRecord, DedupWindow};
use crate::error::Result;
use crate::ports::RecordStore;

#[derive(Default)]
pub struct InMemoryRecordStore {
    records: RwLock<Vec<BookingRecord>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn find_within_window(
        &self,
        key: &BookingKey,
        window: &DedupWindow,
    ) -> Result<Vec<BookingRecord>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| is_within_window(r, key, window))
            .cloned()
            .collect())
    }

    async fn find_by_date_and_prison(
        &self,
        date: NaiveDate,
        prison_id: &str,
    ) -> Result<Vec<BookingRecord>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| is_same_day(r, date, prison_id))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<BookingRecord>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id == Some(id)).cloned())
    }

    async fn insert(&self, record: BookingRecord) -> Result<Uuid> {
        let id = Uuid::new_v4();
        self.records.write().await.push(record.with_id(id));
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::types::ArrivalType;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
    }

    fn key() -> BookingKey {
        BookingKey::new("MDI", "mv-1", "A1234AA", "1001")
    }

    #[tokio::test]
    async fn insert_assigns_id() {
        let store = InMemoryRecordStore::new();
        let id = store
            .insert(BookingRecord::new(key(), ArrivalType::NewToPrison, at()))
            .await
            .unwrap();

        let stored = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.id, Some(id));
        assert_eq!(stored.key, key());
    }

    #[tokio::test]
    async fn insert_ignores_caller_id() {
        let store = InMemoryRecordStore::new();
        let preset = Uuid::new_v4();
        let id = store
            .insert(BookingRecord::new(key(), ArrivalType::NewToPrison, at()).with_id(preset))
            .await
            .unwrap();
        assert_ne!(id, preset);
        assert!(store.find_by_id(preset).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn window_query() {
        let store = InMemoryRecordStore::new();
        store
            .insert(BookingRecord::new(key(), ArrivalType::NewToPrison, at()))
            .await
            .unwrap();

        let day_either_side = DedupWindow::around(at(), Duration::days(1)).unwrap();
        let hit = store
            .find_within_window(&key(), &day_either_side)
            .await
            .unwrap();
        assert_eq!(hit.len(), 1);

        let before = DedupWindow::new(at() - Duration::days(2), at() - Duration::days(1)).unwrap();
        let miss = store.find_within_window(&key(), &before).await.unwrap();
        assert!(miss.is_empty());
    }

    #[tokio::test]
    async fn roll_call_query() {
        let store = InMemoryRecordStore::new();
        store
            .insert(BookingRecord::new(key(), ArrivalType::NewToPrison, at()))
            .await
            .unwrap();
        store
            .insert(BookingRecord::new(
                BookingKey::new("LEI", "mv-2", "B2345BB", "1002"),
                ArrivalType::CourtReturn,
                at(),
            ))
            .await
            .unwrap();

        let mdi = store
            .find_by_date_and_prison(at().date_naive(), "MDI")
            .await
            .unwrap();
        assert_eq!(mdi.len(), 1);
        assert_eq!(store.len().await, 2);
    }
}
