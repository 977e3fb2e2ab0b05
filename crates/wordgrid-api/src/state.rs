//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use wordgrid_core::config::AppConfig;
use wordgrid_engine::SessionEngine;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Session engine
    pub engine: Arc<SessionEngine>,
    /// When the server started
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Creates state with the start time set to now.
    pub fn new(config: Arc<AppConfig>, engine: Arc<SessionEngine>) -> Self {
        Self {
            config,
            engine,
            started_at: Utc::now(),
        }
    }

    /// Whole seconds since start.
    pub fn uptime_seconds(&self) -> u64 {
        (Utc::now() - self.started_at).num_seconds().max(0) as u64
    }
}
