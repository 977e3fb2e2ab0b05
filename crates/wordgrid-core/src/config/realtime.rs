//! Broadcast hub configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// Per-session broadcast hub settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Interval between keep-alive events on an otherwise idle hub, in
    /// milliseconds. Should stay below the idle timeout of any proxy in
    /// front of the server.
    #[serde(default = "default_keepalive_interval")]
    pub keepalive_interval_ms: u64,
    /// Outbound queue size per subscriber. A subscriber whose queue is full
    /// is disconnected.
    #[serde(default = "default_subscriber_buffer")]
    pub subscriber_buffer_size: usize,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            keepalive_interval_ms: default_keepalive_interval(),
            subscriber_buffer_size: default_subscriber_buffer(),
        }
    }
}

impl RealtimeConfig {
    /// Keep-alive interval as a [`Duration`].
    pub fn keepalive_interval(&self) -> Duration {
        Duration::from_millis(self.keepalive_interval_ms)
    }

    /// Rejects settings the hubs cannot run with.
    pub fn validate(&self) -> AppResult<()> {
        if self.keepalive_interval_ms == 0 {
            return Err(AppError::configuration(
                "realtime.keepalive_interval_ms must be greater than zero",
            ));
        }
        Ok(())
    }
}

fn default_keepalive_interval() -> u64 {
    20_000
}

fn default_subscriber_buffer() -> usize {
    64
}
