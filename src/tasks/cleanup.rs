//! Cache Sweep Task
//!
//! Background task that periodically removes expired details-cache entries.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CacheStore;

/// Spawns a background task that periodically purges expired cache entries.
///
/// Reads already treat expired entries as misses; the sweep only reclaims
/// memory for keys nobody asks for again.
///
/// # Arguments
/// * `cache` - shared reference to the cache
/// * `check_period_secs` - Interval in seconds between sweeps
///
/// # Returns
/// A JoinHandle for the spawned task, aborted during shutdown.
pub fn spawn_cleanup_task(cache: Arc<RwLock<CacheStore>>, check_period_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(check_period_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting cache sweep task with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let (removed, remaining) = {
                let mut cache_guard = cache.write().await;
                let removed = cache_guard.cleanup_expired();
                (removed, cache_guard.len())
            };

            if removed > 0 {
                info!(removed, remaining, "Cache sweep removed expired entries");
            } else {
                debug!(remaining, "Cache sweep found no expired entries");
            }
        }
    })
}
