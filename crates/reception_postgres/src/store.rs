//! Postgres booking store
//!
//! ```sql
//! CREATE TABLE confirmed_arrival (
//!     id            uuid PRIMARY KEY,
//!     prison_id     text NOT NULL,
//!     movement_id   text NOT NULL,
//!     prisoner_id   text NOT NULL,
//!     booking_id    text NOT NULL,
//!     arrival_type  text NOT NULL,
//!     timestamp     timestamptz NOT NULL,
//!     arrival_date  date NOT NULL
//! );
//! ```

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use reception_core::booking::{ArrivalType, BookingKey, BookingRecord, DedupWindow};
use reception_core::error::{Collaborator, ReceptionError, Result};
use reception_core::ports::RecordStore;

#[derive(sqlx::FromRow)]
struct ConfirmedArrivalRow {
    id: Uuid,
    prison_id: String,
    movement_id: String,
    prisoner_id: String,
    booking_id: String,
    arrival_type: String,
    timestamp: DateTime<Utc>,
}

impl TryFrom<ConfirmedArrivalRow> for BookingRecord {
    type Error = anyhow::Error;

    fn try_from(r: ConfirmedArrivalRow) -> anyhow::Result<Self> {
        let arrival_type: ArrivalType = r
            .arrival_type
            .parse()
            .map_err(|e: String| anyhow!(e))
            .with_context(|| format!("confirmed_arrival row {}", r.id))?;
        Ok(BookingRecord::new(
            BookingKey {
                prison_id: r.prison_id,
                movement_id: r.movement_id,
                prisoner_id: r.prisoner_id,
                booking_id: r.booking_id,
            },
            arrival_type,
            r.timestamp,
        )
        .with_id(r.id))
    }
}

fn store_error(e: impl Into<anyhow::Error>) -> ReceptionError {
    let e = e.into();
    tracing::warn!(error = %format!("{e:#}"), "record store failure");
    ReceptionError::upstream(Collaborator::RecordStore, e)
}

fn into_records(rows: Vec<ConfirmedArrivalRow>) -> Result<Vec<BookingRecord>> {
    rows.into_iter()
        .map(|row| BookingRecord::try_from(row).map_err(store_error))
        .collect()
}

#[derive(Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn find_within_window(
        &self,
        key: &BookingKey,
        window: &DedupWindow,
    ) -> Result<Vec<BookingRecord>> {
        let rows = sqlx::query_as::<_, ConfirmedArrivalRow>(
            r#"
            SELECT id, prison_id, movement_id, prisoner_id, booking_id,
                   arrival_type, timestamp
            FROM confirmed_arrival
            WHERE prison_id = $1
              AND movement_id = $2
              AND prisoner_id = $3
              AND booking_id = $4
              AND timestamp BETWEEN $5 AND $6
            ORDER BY timestamp
            "#,
        )
        .bind(&key.prison_id)
        .bind(&key.movement_id)
        .bind(&key.prisoner_id)
        .bind(&key.booking_id)
        .bind(window.start())
        .bind(window.end())
        .fetch_all(&self.pool)
        .await
        .context("Failed to query bookings within window")
        .map_err(store_error)?;

        into_records(rows)
    }

    async fn find_by_date_and_prison(
        &self,
        date: NaiveDate,
        prison_id: &str,
    ) -> Result<Vec<BookingRecord>> {
        let rows = sqlx::query_as::<_, ConfirmedArrivalRow>(
            r#"
            SELECT id, prison_id, movement_id, prisoner_id, booking_id,
                   arrival_type, timestamp
            FROM confirmed_arrival
            WHERE arrival_date = $1
              AND prison_id = $2
            ORDER BY timestamp
            "#,
        )
        .bind(date)
        .bind(prison_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to query bookings by date and prison")
        .map_err(store_error)?;

        into_records(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<BookingRecord>> {
        let row = sqlx::query_as::<_, ConfirmedArrivalRow>(
            r#"
            SELECT id, prison_id, movement_id, prisoner_id, booking_id,
                   arrival_type, timestamp
            FROM confirmed_arrival
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch booking")
        .map_err(store_error)?;

        row.map(|r| BookingRecord::try_from(r).map_err(store_error))
            .transpose()
    }

    async fn insert(&self, record: BookingRecord) -> Result<Uuid> {
        let id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO confirmed_arrival
                (id, prison_id, movement_id, prisoner_id, booking_id,
                 arrival_type, timestamp, arrival_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(id)
        .bind(&record.key.prison_id)
        .bind(&record.key.movement_id)
        .bind(&record.key.prisoner_id)
        .bind(&record.key.booking_id)
        .bind(record.arrival_type.as_str())
        .bind(record.timestamp)
        .bind(record.date())
        .execute(&self.pool)
        .await
        .context("Failed to insert booking")
        .map_err(store_error)?;

        tracing::debug!(%id, prison_id = %record.key.prison_id, "inserted confirmed arrival");

        Ok(id)
    }
}
