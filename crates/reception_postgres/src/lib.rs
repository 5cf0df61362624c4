//! Postgres record store for prison reception.
//!
//! [`PgRecordStore`] implements `reception_core::ports::RecordStore` over a
//! sqlx pool. SQL is runtime-checked (`sqlx::query`, not `sqlx::query!`), so
//! builds never need a live database. The connection string is always passed
//! in; this crate reads no environment variables.

pub mod store;

use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};

pub use store::PgRecordStore;

/// Table the record store reads and writes.
pub const BOOKING_TABLE: &str = "confirmed_arrival";

/// Pool settings for the booking database.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: 10,
            acquire_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections.max(1);
        self
    }
}

/// Owns the pool and hands out record stores over it.
pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        tracing::info!(
            url = %redact_url(&config.database_url),
            max_connections = config.max_connections,
            "connecting to booking database"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(&config.database_url)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "booking database unreachable"))?;

        Ok(Self { pool })
    }

    pub fn record_store(&self) -> PgRecordStore {
        PgRecordStore::new(self.pool.clone())
    }

    /// Whether [`BOOKING_TABLE`] exists. Creating it is left to the
    /// deployment's migrations.
    pub async fn verify_schema(&self) -> Result<bool, sqlx::Error> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM information_schema.tables WHERE table_name = $1)",
        )
        .bind(BOOKING_TABLE)
        .fetch_one(&self.pool)
        .await?;

        if !exists {
            tracing::warn!(table = BOOKING_TABLE, "booking table not found");
        }
        Ok(exists)
    }
}

/// Connection string safe for logs: any password is replaced, and anything
/// that does not parse as a URL is hidden entirely.
pub fn redact_url(database_url: &str) -> String {
    match url::Url::parse(database_url) {
        Ok(mut parsed) => {
            if parsed.password().is_some() {
                // Only fails for cannot-be-a-base URLs, which carry no password.
                let _ = parsed.set_password(Some("***"));
            }
            parsed.to_string()
        }
        Err(_) => "<unparseable database url>".to_string(),
    }
}
