//! Scheduling service entry point
//!
//! Reads configuration from TOML (`$SCHEDULING_CONFIG` or
//! ~/.config/center-scheduling/config.toml), prepares the database and
//! slot catalog, and runs the hold sweeper until shutdown.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use center_scheduling::application::{start_hold_sweeper, CatalogService};
use center_scheduling::config::{AppConfig, LoggingSection};
use center_scheduling::domain::{HoldStore, RepositoryProvider};
use center_scheduling::infrastructure::database::migrator::Migrator;
use center_scheduling::support::errors::{AppError, InfraError};
use center_scheduling::support::shutdown::ShutdownCoordinator;
use center_scheduling::{
    default_config_path, init_database, InMemoryHoldStore, SchedulingConfig,
    SeaOrmRepositoryProvider,
};

const SHUTDOWN_TIMEOUT_SECS: u64 = 30;

fn init_tracing(logging: &LoggingSection) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if logging.format.eq_ignore_ascii_case("json") {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("SCHEDULING_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            init_tracing(&cfg.logging);
            info!(path = %config_path.display(), "Configuration loaded");
            cfg
        }
        Err(e) => {
            init_tracing(&LoggingSection::default());
            error!(error = %e, "Failed to load config, using defaults");
            AppConfig::default()
        }
    };

    info!("Starting center scheduling service...");

    // ── Prometheus metrics (recorder must exist before any counter) ──
    if app_cfg.metrics.enabled {
        let addr = SocketAddr::from(([0, 0, 0, 0], app_cfg.metrics.port));
        match metrics_exporter_prometheus::PrometheusBuilder::new()
            .with_http_listener(addr)
            .install()
        {
            Ok(()) => info!(%addr, "Prometheus exporter listening"),
            Err(e) => warn!(error = %e, "Failed to install Prometheus exporter"),
        }
    }

    let scheduling = SchedulingConfig::from(&app_cfg);

    // ── Database ───────────────────────────────────────────────
    let db = match init_database(&app_cfg.database_config()).await {
        Ok(db) => db,
        Err(e) => {
            error!(error = %e, "Failed to connect to database");
            return Err(InfraError::from(e).into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!(error = %e, "Failed to run migrations");
        return Err(InfraError::from(e).into());
    }
    info!("Migrations completed");

    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

    // ── Slot catalog ───────────────────────────────────────────
    let catalog = CatalogService::new(repos.clone(), scheduling);
    let (catalog_start, catalog_end) = app_cfg.catalog_bounds()?;
    match catalog.seed_default_catalog(catalog_start, catalog_end).await {
        Ok(created) => info!(created, "Slot catalog ready"),
        Err(e) => {
            error!(error = %e, "Failed to seed slot catalog");
            return Err(e.into());
        }
    }

    // ── Holds ──────────────────────────────────────────────────
    let holds: Arc<dyn HoldStore> = Arc::new(InMemoryHoldStore::new());

    let shutdown = ShutdownCoordinator::new(SHUTDOWN_TIMEOUT_SECS);
    shutdown.start_signal_listener();

    let sweeper = start_hold_sweeper(holds, shutdown.signal(), scheduling.sweep_interval);

    info!("Scheduling service running. Press Ctrl+C to shut down.");

    let completed = shutdown
        .shutdown_with_cleanup(move || async move {
            if let Err(e) = sweeper.await {
                warn!(error = %e, "Hold sweeper task failed");
            }
            if let Err(e) = db.close().await {
                warn!(error = %e, "Error closing database connection");
            } else {
                info!("Database connection closed");
            }
        })
        .await;

    if !completed {
        warn!("Shutdown finished before cleanup completed");
    }
    info!("Center scheduling service shutdown complete");
    Ok(())
}
