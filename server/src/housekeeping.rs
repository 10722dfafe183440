//! Periodic sweep of expired sessions and stale page cache entries

use crate::AppState;
use checkin_persistence::sqlite;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Run one sweep, returning the number of sessions removed
pub async fn sweep(state: &AppState) -> u64 {
    state.page_cache.cleanup();

    match sqlite::purge_expired_sessions(state.db.pool(), state.service.now()).await {
        Ok(purged) => {
            if purged > 0 {
                info!("Purged {} expired sessions", purged);
            }
            purged
        }
        Err(e) => {
            error!("Failed to purge expired sessions: {}", e);
            0
        }
    }
}

/// Spawn the sweep loop; it runs until the runtime shuts down
pub fn spawn_housekeeping(state: AppState, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // First tick fires immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            debug!("Running housekeeping sweep");
            sweep(&state).await;
        }
    })
}
