//! Background task that drops expired holds.
//!
//! Expiry is already enforced on every read; the sweeper only keeps the
//! store from growing with dead entries.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::Duration;
use tracing::{debug, info, warn};

use crate::domain::HoldStore;
use crate::support::shutdown::ShutdownSignal;

pub fn start_hold_sweeper(
    holds: Arc<dyn HoldStore>,
    shutdown: ShutdownSignal,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!(interval_secs = interval.as_secs_f64(), "Hold sweeper started");

        let mut ticker = tokio::time::interval(interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match holds.purge_expired().await {
                        Ok(0) => {}
                        Ok(removed) => {
                            metrics::counter!("scheduling_holds_swept_total").increment(removed as u64);
                            debug!(removed, "Expired holds swept");
                        }
                        Err(e) => warn!(error = %e, "Hold sweep failed"),
                    }
                }
                _ = shutdown.notified().wait() => {
                    info!("Hold sweeper shutting down");
                    break;
                }
            }
        }

        info!("Hold sweeper stopped");
    })
}
