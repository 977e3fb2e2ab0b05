//! Hub metrics.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Counters shared by every hub in a pool.
#[derive(Debug, Default)]
pub struct HubMetrics {
    /// Revealed events emitted
    pub events_emitted: AtomicU64,
    /// Keep-alive events emitted
    pub keepalives_emitted: AtomicU64,
    /// Successful per-subscriber deliveries
    pub deliveries: AtomicU64,
    /// Subscribers removed because a delivery failed
    pub subscribers_dropped: AtomicU64,
    /// Subscribe operations
    pub subscribes_total: AtomicU64,
    /// Currently attached subscribers across all hubs
    pub subscribers_active: AtomicU64,
}

impl HubMetrics {
    /// Create new zeroed metrics
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn event_emitted(&self, keepalive: bool) {
        if keepalive {
            self.keepalives_emitted.fetch_add(1, Ordering::Relaxed);
        } else {
            self.events_emitted.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn delivered(&self, count: u64) {
        self.deliveries.fetch_add(count, Ordering::Relaxed);
    }

    pub(crate) fn subscriber_added(&self) {
        self.subscribes_total.fetch_add(1, Ordering::Relaxed);
        self.subscribers_active.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn subscribers_removed(&self, count: u64, failed: bool) {
        if count == 0 {
            return;
        }
        self.subscribers_active.fetch_sub(count, Ordering::Relaxed);
        if failed {
            self.subscribers_dropped.fetch_add(count, Ordering::Relaxed);
        }
    }

    /// Get a snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            events_emitted: self.events_emitted.load(Ordering::Relaxed),
            keepalives_emitted: self.keepalives_emitted.load(Ordering::Relaxed),
            deliveries: self.deliveries.load(Ordering::Relaxed),
            subscribers_dropped: self.subscribers_dropped.load(Ordering::Relaxed),
            subscribes_total: self.subscribes_total.load(Ordering::Relaxed),
            subscribers_active: self.subscribers_active.load(Ordering::Relaxed),
        }
    }
}

/// Serializable metrics snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Revealed events emitted
    pub events_emitted: u64,
    /// Keep-alive events emitted
    pub keepalives_emitted: u64,
    /// Successful per-subscriber deliveries
    pub deliveries: u64,
    /// Subscribers removed because a delivery failed
    pub subscribers_dropped: u64,
    /// Subscribe operations
    pub subscribes_total: u64,
    /// Currently attached subscribers
    pub subscribers_active: u64,
}
