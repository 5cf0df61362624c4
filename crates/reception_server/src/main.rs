//! reception_server: standalone REST server for prison reception.
//!
//! Configuration comes from YAML (see `config::ServerConfig`) plus env vars:
//!   RECEPTION_CONFIG   - config file path (default: config/reception.yaml)
//!   DATABASE_URL       - Postgres connection string; in-memory store if unset
//!   RECEPTION_BIND_ADDR, IDENTITY_SEARCH_URL, PRISON_API_URL,
//!   DATABASE_POOL_SIZE - overrides

use std::sync::Arc;

use anyhow::{Context, Result};
use reception_core::booking::InMemoryRecordStore;
use reception_core::ports::RecordStore;
use reception_core::scan::{ScanCountAggregator, ScanLimitService};
use reception_postgres::DatabaseManager;
use reception_server::clients::{PrisonApiScanCountClient, PrisonerSearchClient};
use reception_server::config::ServerConfig;
use reception_server::router::build_router;
use reception_server::state::AppState;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,reception_server=debug".into()),
        )
        .init();

    let config = ServerConfig::load()?;

    let store: Arc<dyn RecordStore> = match config.database.database_url() {
        Some(url) => {
            let manager = DatabaseManager::connect(&config.database.pool_config(url))
                .await
                .context("Failed to connect to database")?;
            if !manager.verify_schema().await? {
                tracing::warn!("Booking table missing; bookings will fail until it is created");
            }
            Arc::new(manager.record_store())
        }
        None => {
            tracing::warn!(
                "{} not set, bookings are held in memory only",
                config.database.connection_string_env
            );
            Arc::new(InMemoryRecordStore::new())
        }
    };

    let gateway = Arc::new(PrisonerSearchClient::new(&config.identity_search)?);
    let scan_source = Arc::new(PrisonApiScanCountClient::new(&config.prison_api)?);

    let scan_limits = ScanLimitService::new(
        ScanCountAggregator::with_event_type(scan_source, config.scan_limits.event_type.clone()),
        config.scan_limits.policy(),
    );

    let state = AppState::new(gateway, store, scan_limits)
        .with_arrival_tolerance(config.booking.arrival_tolerance()?);

    let app = build_router(state);

    let bind_addr = &config.server.bind_addr;
    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind to {bind_addr}"))?;
    tracing::info!("reception_server listening on {bind_addr}");

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
