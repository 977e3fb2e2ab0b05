//! Background eviction of idle sessions.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use wordgrid_core::config::GameConfig;

use super::engine::SessionEngine;

/// Idle sweeper settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweeperConfig {
    /// Sessions idle at least this long are evicted.
    pub idle_ttl: Duration,
    /// Time between sweeps.
    pub interval: Duration,
}

impl SweeperConfig {
    /// Sweeper settings from game configuration; `None` when eviction is
    /// disabled.
    pub fn from_game(config: &GameConfig) -> Option<Self> {
        if config.session_idle_ttl_seconds == 0 {
            return None;
        }
        Some(Self {
            idle_ttl: Duration::from_secs(config.session_idle_ttl_seconds),
            interval: Duration::from_secs(config.sweep_interval_seconds.max(1)),
        })
    }
}

/// Spawns the sweeper. It runs until `cancel` fires.
pub fn spawn_sweeper(
    engine: Arc<SessionEngine>,
    config: SweeperConfig,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    info!(
        idle_ttl_secs = config.idle_ttl.as_secs(),
        interval_secs = config.interval.as_secs(),
        "Idle session sweeper started"
    );

    tokio::spawn(async move {
        let mut interval = time::interval(config.interval);
        interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);
        // The first tick completes immediately.
        interval.tick().await;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = interval.tick() => {
                    let evicted = engine.evict_idle(config.idle_ttl);
                    debug!(evicted, "Sweep finished");
                }
            }
        }

        debug!("Idle session sweeper stopped");
    })
}
