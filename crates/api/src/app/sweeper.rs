use std::sync::Arc;
use std::time::Duration;

use stockdesk_infra::SessionStore;

/// Spawn the background task that drops sessions idle for `max_idle`.
///
/// Sweeps run twice per idle window. The task lives until the runtime shuts
/// down or the handle is aborted.
pub fn spawn_session_sweeper(
    sessions: Arc<dyn SessionStore>,
    max_idle: Duration,
) -> tokio::task::JoinHandle<()> {
    let period = (max_idle / 2).max(Duration::from_millis(10));

    tokio::spawn(async move {
        tracing::info!(?max_idle, "session sweeper started");

        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            let evicted = sessions.evict_idle(max_idle);
            if evicted > 0 {
                tracing::info!(evicted, remaining = sessions.len(), "idle sessions evicted");
            }
        }
    })
}
