//! Server configuration
//!
//! Loaded from YAML (`RECEPTION_CONFIG`, default `config/reception.yaml`),
//! then selectively overridden from the environment. Every section has
//! defaults so a partial file is enough.

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use reception_core::scan::{ScanLimitPolicy, BODY_SCAN_EVENT_TYPE};
use reception_postgres::DatabaseConfig;

pub const DEFAULT_CONFIG_PATH: &str = "config/reception.yaml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: HttpConfig,
    #[serde(default)]
    pub identity_search: UpstreamConfig,
    #[serde(default)]
    pub prison_api: UpstreamConfig,
    #[serde(default)]
    pub scan_limits: ScanLimitConfig,
    #[serde(default)]
    pub booking: BookingConfig,
    #[serde(default)]
    pub database: DatabaseSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

/// An upstream HTTP service.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8081".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScanLimitConfig {
    #[serde(default = "default_warning_threshold")]
    pub warning_threshold: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default = "default_event_type")]
    pub event_type: String,
}

impl Default for ScanLimitConfig {
    fn default() -> Self {
        Self {
            warning_threshold: default_warning_threshold(),
            limit: default_limit(),
            event_type: default_event_type(),
        }
    }
}

impl ScanLimitConfig {
    pub fn policy(&self) -> ScanLimitPolicy {
        ScanLimitPolicy {
            warning_threshold: self.warning_threshold,
            limit: self.limit,
        }
    }
}

fn default_warning_threshold() -> u32 {
    ScanLimitPolicy::default().warning_threshold
}

fn default_limit() -> u32 {
    ScanLimitPolicy::default().limit
}

fn default_event_type() -> String {
    BODY_SCAN_EVENT_TYPE.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct BookingConfig {
    /// Tolerance either side of an arrival's timestamp when confirming it.
    #[serde(default = "default_window_hours")]
    pub default_window_hours: i64,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            default_window_hours: default_window_hours(),
        }
    }
}

fn default_window_hours() -> i64 {
    24
}

/// Longest arrival-confirmation tolerance accepted, one year either side.
pub const MAX_WINDOW_HOURS: i64 = 24 * 366;

impl BookingConfig {
    pub fn arrival_tolerance(&self) -> Result<chrono::Duration> {
        let hours = self.default_window_hours;
        if !(0..=MAX_WINDOW_HOURS).contains(&hours) {
            bail!(
                "booking.default_window_hours must be between 0 and {MAX_WINDOW_HOURS}, got {hours}"
            );
        }
        chrono::Duration::try_hours(hours)
            .with_context(|| format!("booking.default_window_hours out of range: {hours}"))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSection {
    /// Name of the env var holding the connection string. When that var is
    /// unset the server runs on the in-memory record store.
    #[serde(default = "default_connection_string_env")]
    pub connection_string_env: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            connection_string_env: default_connection_string_env(),
            max_connections: default_max_connections(),
        }
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_connection_string_env() -> String {
    "DATABASE_URL".to_string()
}

impl DatabaseSection {
    pub fn database_url(&self) -> Option<String> {
        std::env::var(&self.connection_string_env)
            .ok()
            .filter(|s| !s.trim().is_empty())
    }

    /// Pool settings for `database_url`, sized from this section.
    pub fn pool_config(&self, database_url: String) -> DatabaseConfig {
        DatabaseConfig::new(database_url).with_max_connections(self.max_connections)
    }
}

impl ServerConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {path}"))?;
        Self::from_yaml(&content).with_context(|| format!("Failed to parse config file {path}"))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that parse but cannot be used at runtime.
    pub fn validate(&self) -> Result<()> {
        self.booking.arrival_tolerance()?;
        Ok(())
    }

    /// Load from `RECEPTION_CONFIG`, falling back to defaults when the
    /// default path does not exist.
    pub fn load() -> Result<Self> {
        let config = match std::env::var("RECEPTION_CONFIG") {
            Ok(path) => Self::from_file(&path)?,
            Err(_) if std::path::Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(DEFAULT_CONFIG_PATH)?
            }
            Err(_) => {
                tracing::warn!("No configuration file found, using defaults");
                Self::default()
            }
        };
        Ok(config.with_env_overrides(|name| std::env::var(name).ok()))
    }

    /// Apply `RECEPTION_BIND_ADDR`, `IDENTITY_SEARCH_URL`, `PRISON_API_URL`
    /// and `DATABASE_POOL_SIZE`.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(addr) = lookup("RECEPTION_BIND_ADDR") {
            self.server.bind_addr = addr;
        }
        if let Some(url) = lookup("IDENTITY_SEARCH_URL") {
            self.identity_search.base_url = url;
        }
        if let Some(url) = lookup("PRISON_API_URL") {
            self.prison_api.base_url = url;
        }
        if let Some(size) = lookup("DATABASE_POOL_SIZE").and_then(|v| v.parse().ok()) {
            self.database.max_connections = size;
        }
        self
    }
}
