//! Configuration module
//!
//! `AppConfig` mirrors the TOML file on disk; `SchedulingConfig` is the
//! runtime view handed to the application services.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::infrastructure::DatabaseConfig;
use crate::support::errors::InfraError;

/// Default location: `<config dir>/center-scheduling/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("center-scheduling")
        .join("config.toml")
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseSection,
    pub logging: LoggingSection,
    pub holds: HoldSection,
    pub scheduling: SchedulingSection,
    pub metrics: MetricsSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        let db = DatabaseConfig::default();
        Self {
            url: db.url,
            max_connections: db.max_connections,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// `EnvFilter` directive, e.g. "info" or "center_scheduling=debug"
    pub level: String,
    /// "text" or "json"
    pub format: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

/// A hold is a short reservation while the customer checks out
pub const MAX_HOLD_TTL_SECONDS: u64 = 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoldSection {
    pub ttl_seconds: u64,
    pub sweep_interval_seconds: u64,
}

impl Default for HoldSection {
    fn default() -> Self {
        Self {
            ttl_seconds: 300,
            sweep_interval_seconds: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingSection {
    pub slot_minutes: u32,
    /// First slot start when seeding the catalog ("HH:MM")
    pub catalog_start: String,
    /// Catalog slots end no later than this ("HH:MM")
    pub catalog_end: String,
}

impl Default for SchedulingSection {
    fn default() -> Self {
        Self {
            slot_minutes: 30,
            catalog_start: "08:00".to_string(),
            catalog_end: "17:00".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsSection {
    pub enabled: bool,
    pub port: u16,
}

impl Default for MetricsSection {
    fn default() -> Self {
        Self {
            enabled: false,
            port: 9464,
        }
    }
}

impl AppConfig {
    /// Read the TOML file at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, InfraError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .map_err(|e| InfraError::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_toml(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, InfraError> {
        toml::from_str(raw).map_err(|e| InfraError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), InfraError> {
        if self.scheduling.slot_minutes == 0 || self.scheduling.slot_minutes > 24 * 60 {
            return Err(InfraError::Config(format!(
                "scheduling.slot_minutes must be within 1..=1440, got {}",
                self.scheduling.slot_minutes
            )));
        }
        if self.holds.ttl_seconds == 0 || self.holds.ttl_seconds > MAX_HOLD_TTL_SECONDS {
            return Err(InfraError::Config(format!(
                "holds.ttl_seconds must be within 1..={}, got {}",
                MAX_HOLD_TTL_SECONDS, self.holds.ttl_seconds
            )));
        }
        if self.holds.sweep_interval_seconds == 0 {
            return Err(InfraError::Config(
                "holds.sweep_interval_seconds must be positive".into(),
            ));
        }
        let (start, end) = self.catalog_bounds()?;
        if start >= end {
            return Err(InfraError::Config(
                "scheduling.catalog_start must be before catalog_end".into(),
            ));
        }
        Ok(())
    }

    pub fn catalog_bounds(&self) -> Result<(NaiveTime, NaiveTime), InfraError> {
        let parse = |field: &str, value: &str| {
            NaiveTime::parse_from_str(value, "%H:%M")
                .map_err(|e| InfraError::Config(format!("scheduling.{}: {}", field, e)))
        };
        Ok((
            parse("catalog_start", &self.scheduling.catalog_start)?,
            parse("catalog_end", &self.scheduling.catalog_end)?,
        ))
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database.url.clone(),
            max_connections: self.database.max_connections,
        }
    }
}

/// Runtime knobs of the scheduling services
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulingConfig {
    pub slot_minutes: u32,
    pub hold_ttl: Duration,
    pub sweep_interval: Duration,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for SchedulingConfig {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            slot_minutes: cfg.scheduling.slot_minutes,
            hold_ttl: Duration::from_secs(cfg.holds.ttl_seconds),
            sweep_interval: Duration::from_secs(cfg.holds.sweep_interval_seconds),
        }
    }
}
