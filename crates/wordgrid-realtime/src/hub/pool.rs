//! Hub pool — owns one broadcast hub per session.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use wordgrid_core::config::RealtimeConfig;
use wordgrid_core::types::SessionId;

use crate::metrics::HubMetrics;

use super::hub::BroadcastHub;

/// Session id → hub. Hubs are created on first use.
#[derive(Debug)]
pub struct HubPool {
    hubs: DashMap<SessionId, Arc<BroadcastHub>>,
    config: RealtimeConfig,
    metrics: Arc<HubMetrics>,
}

impl HubPool {
    /// Creates an empty pool.
    pub fn new(config: RealtimeConfig) -> Self {
        Self {
            hubs: DashMap::new(),
            config,
            metrics: Arc::new(HubMetrics::new()),
        }
    }

    /// Returns the hub for a session, creating an idle one if needed.
    pub fn get_or_create(&self, session_id: &SessionId) -> Arc<BroadcastHub> {
        if let Some(hub) = self.hubs.get(session_id) {
            return Arc::clone(hub.value());
        }

        let entry = self.hubs.entry(session_id.clone()).or_insert_with(|| {
            debug!(session_id = %session_id, "Creating broadcast hub");
            BroadcastHub::new(session_id.clone(), &self.config, Arc::clone(&self.metrics))
        });
        Arc::clone(entry.value())
    }

    /// Returns the hub for a session if one exists.
    pub fn get(&self, session_id: &SessionId) -> Option<Arc<BroadcastHub>> {
        self.hubs.get(session_id).map(|hub| Arc::clone(hub.value()))
    }

    /// Removes and closes a session's hub. Returns whether one existed.
    pub fn remove(&self, session_id: &SessionId) -> bool {
        match self.hubs.remove(session_id) {
            Some((_, hub)) => {
                hub.close();
                true
            }
            None => false,
        }
    }

    /// Subscribers attached to a session's hub; zero if it has none.
    pub fn subscriber_count(&self, session_id: &SessionId) -> usize {
        self.get(session_id).map_or(0, |hub| hub.subscriber_count())
    }

    /// Number of hubs in the pool.
    pub fn hub_count(&self) -> usize {
        self.hubs.len()
    }

    /// Number of hubs that currently have subscribers.
    pub fn active_hub_count(&self) -> usize {
        self.hubs.iter().filter(|hub| hub.is_active()).count()
    }

    /// Closes and removes every hub.
    pub fn close_all(&self) {
        let ids: Vec<SessionId> = self.hubs.iter().map(|entry| entry.key().clone()).collect();
        for id in &ids {
            self.remove(id);
        }
        debug!(hubs = ids.len(), "All broadcast hubs closed");
    }

    /// Shared metrics for every hub in the pool.
    pub fn metrics(&self) -> &Arc<HubMetrics> {
        &self.metrics
    }
}
