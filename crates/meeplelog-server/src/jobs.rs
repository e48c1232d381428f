//! Background jobs.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::{Duration, MissedTickBehavior, interval};
use tracing::{debug, warn};

use meeplelog_auth::RecoveryService;

/// Spawns the retention sweep, hard-deleting accounts whose soft-delete
/// timestamp is older than `threshold_days`. Runs once at startup and
/// then every `interval_minutes`.
pub fn spawn_retention_sweep(
    recovery: Arc<RecoveryService>,
    threshold_days: u64,
    interval_minutes: u64,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs(interval_minutes * 60));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            match recovery.hard_delete_sweep(threshold_days).await {
                // hard_delete_sweep logs removals itself.
                Ok(removed) => debug!(removed, "Retention sweep finished"),
                Err(e) => warn!(error = %e, "Retention sweep failed"),
            }
        }
    })
}
