//! Session engine — composition root of registry and hubs.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::info;

use wordgrid_core::config::{AppConfig, RealtimeConfig};
use wordgrid_core::result::AppResult;
use wordgrid_core::types::SessionId;
use wordgrid_realtime::{EventKind, HubPool, MetricsSnapshot, Subscription, SubscriptionToken};

use crate::board::{BoardGenerator, BoardRequest, Dictionary};

use super::registry::{Session, SessionRegistry};

/// Engine-wide counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineStats {
    /// Live sessions.
    pub sessions: usize,
    /// Hubs in the pool.
    pub hubs: usize,
    /// Hubs with at least one subscriber.
    pub active_hubs: usize,
    /// Aggregate hub counters.
    pub events: MetricsSnapshot,
}

/// Creates sessions, applies reveals, and fans reveals out to subscribers.
#[derive(Debug)]
pub struct SessionEngine {
    registry: SessionRegistry,
    hubs: HubPool,
}

impl SessionEngine {
    /// Builds an engine from configuration, loading the dictionary.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let dictionary = Arc::new(Dictionary::load(&config.game)?);
        let generator = BoardGenerator::new(dictionary, &config.game)?;
        Self::new(generator, config.realtime.clone())
    }

    /// Builds an engine from its parts. Rejects a realtime configuration
    /// that would make the keep-alive spin.
    pub fn new(generator: BoardGenerator, realtime: RealtimeConfig) -> AppResult<Self> {
        realtime.validate()?;
        Ok(Self {
            registry: SessionRegistry::new(generator),
            hubs: HubPool::new(realtime),
        })
    }

    /// Creates a session.
    pub fn create_session(&self, request: &BoardRequest) -> AppResult<Session> {
        self.registry.create(request)
    }

    /// Returns a session snapshot.
    pub fn get_session(&self, id: &SessionId) -> AppResult<Session> {
        self.registry.get(id)
    }

    /// Fails with not-found for an unknown session; otherwise records
    /// activity on it.
    pub fn touch_session(&self, id: &SessionId) -> AppResult<()> {
        self.registry.touch(id)
    }

    /// Reveals a word. A newly revealed word is broadcast to the session's
    /// subscribers with the full revealed set, after the mutation and before
    /// any later reveal of the same session.
    pub fn reveal_word(&self, id: &SessionId, idx: usize) -> AppResult<Vec<usize>> {
        self.registry.reveal_then(id, idx, |revealed| {
            if let Some(hub) = self.hubs.get(id) {
                hub.emit(EventKind::revealed(revealed));
            }
        })
    }

    /// Subscribes to a session's events.
    pub fn subscribe(&self, id: &SessionId) -> AppResult<Subscription> {
        self.registry
            .touch_then(id, || self.hubs.get_or_create(id).subscribe())?
    }

    /// Detaches a subscription. Returns whether it was still attached.
    pub fn unsubscribe(&self, token: &SubscriptionToken) -> bool {
        self.hubs
            .get(&token.session_id)
            .is_some_and(|hub| hub.unsubscribe(token.subscriber_id))
    }

    /// Subscribers currently attached to a session.
    pub fn subscriber_count(&self, id: &SessionId) -> usize {
        self.hubs.subscriber_count(id)
    }

    /// Removes sessions idle for at least `max_idle` that have no
    /// subscribers, together with their hubs. Returns how many were removed.
    pub fn evict_idle(&self, max_idle: Duration) -> usize {
        let evicted = self
            .registry
            .evict_idle(max_idle, |id| self.hubs.subscriber_count(id) > 0);
        for id in &evicted {
            self.hubs.remove(id);
        }
        if !evicted.is_empty() {
            info!(
                evicted = evicted.len(),
                remaining = self.registry.len(),
                "Idle sessions evicted"
            );
        }
        evicted.len()
    }

    /// Engine counters.
    pub fn stats(&self) -> EngineStats {
        EngineStats {
            sessions: self.registry.len(),
            hubs: self.hubs.hub_count(),
            active_hubs: self.hubs.active_hub_count(),
            events: self.hubs.metrics().snapshot(),
        }
    }

    /// Closes every hub so open event streams end. Sessions stay readable.
    pub fn shutdown(&self) {
        info!(hubs = self.hubs.hub_count(), "Closing broadcast hubs");
        self.hubs.close_all();
    }
}
