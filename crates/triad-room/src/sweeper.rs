//! Background removal of expired rooms.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::{Registry, RoomConfig};

/// Shortest period the sweeper accepts.
const MIN_SWEEP_INTERVAL: Duration = Duration::from_secs(1);

/// Spawns a task that calls [`Registry::sweep_expired`] every
/// `config.sweep_interval` with `config.max_age`.
///
/// The task runs until the returned handle is aborted or the runtime
/// shuts down. The first sweep happens one interval after spawning.
pub fn spawn_sweeper(registry: Arc<Registry>, config: &RoomConfig) -> JoinHandle<()> {
    let max_age = config.max_age;
    let period = if config.sweep_interval < MIN_SWEEP_INTERVAL {
        tracing::warn!(
            requested = ?config.sweep_interval,
            using = ?MIN_SWEEP_INTERVAL,
            "sweep interval too short, clamping"
        );
        MIN_SWEEP_INTERVAL
    } else {
        config.sweep_interval
    };

    tokio::spawn(async move {
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::debug!(?period, ?max_age, "room sweeper started");

        loop {
            ticker.tick().await;
            let swept = registry.sweep_expired(Instant::now(), max_age);
            if !swept.is_empty() {
                tracing::info!(
                    count = swept.len(),
                    remaining = registry.room_count(),
                    "swept expired rooms"
                );
            }
        }
    })
}
