//! Broadcast hub for one session.
//!
//! A hub is `Idle` while it has no subscribers and `Active` otherwise. Only
//! an active hub runs a keep-alive timer. All state lives behind one lock,
//! so emits are serialized and every subscriber sees events in id order.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use wordgrid_core::config::RealtimeConfig;
use wordgrid_core::error::AppError;
use wordgrid_core::result::AppResult;
use wordgrid_core::types::{SessionId, SubscriberId};

use crate::message::types::{DeliveryError, EventKind, HubEvent};
use crate::metrics::HubMetrics;

use super::keepalive::KeepAlive;
use super::subscription::{Subscription, SubscriptionToken};

/// One attached subscriber.
#[derive(Debug)]
struct Subscriber {
    id: SubscriberId,
    sender: mpsc::Sender<HubEvent>,
    /// Id of the last event this subscriber accepted. Zero before the first.
    last_delivered_id: u64,
}

#[derive(Debug, Default)]
struct HubState {
    event_counter: u64,
    subscribers: Vec<Subscriber>,
    keepalive: Option<KeepAlive>,
    /// Bumped on every timer start so a loop from an earlier active period
    /// cannot emit into a later one.
    timer_generation: u64,
    closed: bool,
}

impl HubState {
    fn stop_keepalive(&mut self) {
        if let Some(keepalive) = self.keepalive.take() {
            keepalive.stop();
        }
    }
}

/// Snapshot of one subscriber, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriberInfo {
    /// Subscriber identity.
    pub id: SubscriberId,
    /// Id of the last event delivered to it.
    pub last_delivered_id: u64,
}

/// Per-session subscriber set and event sequence.
#[derive(Debug)]
pub struct BroadcastHub {
    session_id: SessionId,
    keepalive_interval: Duration,
    buffer_size: usize,
    state: Mutex<HubState>,
    metrics: Arc<HubMetrics>,
    self_ref: Weak<BroadcastHub>,
}

impl BroadcastHub {
    /// Creates an idle hub.
    pub fn new(session_id: SessionId, config: &RealtimeConfig, metrics: Arc<HubMetrics>) -> Arc<Self> {
        Arc::new_cyclic(|self_ref| Self {
            session_id,
            keepalive_interval: config.keepalive_interval(),
            buffer_size: config.subscriber_buffer_size.max(1),
            state: Mutex::new(HubState::default()),
            metrics,
            self_ref: self_ref.clone(),
        })
    }

    fn lock(&self) -> MutexGuard<'_, HubState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Attaches a new subscriber. The first subscriber starts the keep-alive
    /// timer.
    pub fn subscribe(&self) -> AppResult<Subscription> {
        let mut state = self.lock();
        if state.closed {
            return Err(AppError::not_found(format!(
                "Session {} is no longer available",
                self.session_id
            )));
        }

        let (sender, receiver) = mpsc::channel(self.buffer_size);
        let id = SubscriberId::new();
        state.subscribers.push(Subscriber {
            id,
            sender,
            last_delivered_id: 0,
        });
        self.metrics.subscriber_added();

        if state.subscribers.len() == 1 {
            self.start_keepalive(&mut state);
            debug!(session_id = %self.session_id, "Hub active, keep-alive started");
        }

        debug!(
            session_id = %self.session_id,
            subscriber_id = %id,
            subscribers = state.subscribers.len(),
            "Subscriber attached"
        );

        let token = SubscriptionToken {
            session_id: self.session_id.clone(),
            subscriber_id: id,
        };
        Ok(Subscription::new(token, receiver, self.self_ref.clone()))
    }

    /// Detaches a subscriber by identity. Returns whether it was attached;
    /// a second call for the same id is a no-op.
    pub fn unsubscribe(&self, subscriber_id: SubscriberId) -> bool {
        let mut state = self.lock();
        let Some(pos) = state.subscribers.iter().position(|s| s.id == subscriber_id) else {
            return false;
        };

        state.subscribers.remove(pos);
        self.metrics.subscribers_removed(1, false);

        debug!(
            session_id = %self.session_id,
            subscriber_id = %subscriber_id,
            subscribers = state.subscribers.len(),
            "Subscriber detached"
        );

        if state.subscribers.is_empty() {
            state.stop_keepalive();
            debug!(session_id = %self.session_id, "Hub idle, keep-alive stopped");
        }
        true
    }

    /// Emits an event to every subscriber and postpones the keep-alive.
    ///
    /// Returns the id assigned to the event.
    pub fn emit(&self, kind: EventKind) -> u64 {
        let mut state = self.lock();
        if let Some(keepalive) = &state.keepalive {
            keepalive.postpone();
        }
        self.deliver(&mut state, kind)
    }

    /// Called by the keep-alive loop. Returns `false` when the loop should end.
    fn emit_keepalive(&self, generation: u64) -> bool {
        let mut state = self.lock();
        if state.closed || state.timer_generation != generation || state.subscribers.is_empty() {
            return false;
        }
        self.deliver(&mut state, EventKind::Keepalive);
        !state.subscribers.is_empty()
    }

    fn deliver(&self, state: &mut HubState, kind: EventKind) -> u64 {
        state.event_counter += 1;
        let keepalive = kind.is_keepalive();
        let event = HubEvent {
            id: state.event_counter,
            kind,
        };

        let before = state.subscribers.len();
        let session_id = &self.session_id;
        state.subscribers.retain_mut(|sub| match sub.sender.try_send(event.clone()) {
            Ok(()) => {
                sub.last_delivered_id = event.id;
                true
            }
            Err(err) => {
                let err = DeliveryError::from(err);
                match err {
                    DeliveryError::Full => warn!(
                        session_id = %session_id,
                        subscriber_id = %sub.id,
                        event_id = event.id,
                        "Subscriber queue full, disconnecting"
                    ),
                    DeliveryError::Closed => debug!(
                        session_id = %session_id,
                        subscriber_id = %sub.id,
                        "Subscriber channel closed, removing"
                    ),
                }
                false
            }
        });

        let delivered = state.subscribers.len();
        let dropped = before - delivered;
        self.metrics.event_emitted(keepalive);
        self.metrics.delivered(delivered as u64);
        self.metrics.subscribers_removed(dropped as u64, true);

        if dropped > 0 && state.subscribers.is_empty() {
            state.stop_keepalive();
            debug!(session_id = %self.session_id, "Hub idle, keep-alive stopped");
        }

        if !keepalive {
            debug!(
                session_id = %self.session_id,
                event_id = event.id,
                delivered,
                dropped,
                "Event emitted"
            );
        }

        event.id
    }

    fn start_keepalive(&self, state: &mut HubState) {
        state.stop_keepalive();
        state.timer_generation += 1;
        let generation = state.timer_generation;
        let hub = self.self_ref.clone();

        state.keepalive = KeepAlive::start(self.keepalive_interval, move || {
            hub.upgrade()
                .is_some_and(|hub| hub.emit_keepalive(generation))
        });

        if state.keepalive.is_none() {
            warn!(session_id = %self.session_id, "No async runtime, keep-alive disabled");
        }
    }

    /// Detaches every subscriber (their streams end) and refuses new ones.
    pub fn close(&self) {
        let mut state = self.lock();
        if state.closed {
            return;
        }
        state.closed = true;
        state.stop_keepalive();
        let count = state.subscribers.len();
        state.subscribers.clear();
        self.metrics.subscribers_removed(count as u64, false);
        debug!(session_id = %self.session_id, subscribers = count, "Hub closed");
    }

    /// Number of attached subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    /// Whether the hub has subscribers (and therefore a running keep-alive).
    pub fn is_active(&self) -> bool {
        !self.lock().subscribers.is_empty()
    }

    /// Whether a keep-alive timer is currently running.
    pub fn keepalive_running(&self) -> bool {
        self.lock()
            .keepalive
            .as_ref()
            .is_some_and(|keepalive| !keepalive.is_stopped())
    }

    /// Id of the most recently emitted event, zero if none.
    pub fn last_event_id(&self) -> u64 {
        self.lock().event_counter
    }

    /// Whether [`BroadcastHub::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Snapshot of attached subscribers in delivery order.
    pub fn subscribers(&self) -> Vec<SubscriberInfo> {
        self.lock()
            .subscribers
            .iter()
            .map(|s| SubscriberInfo {
                id: s.id,
                last_delivered_id: s.last_delivered_id,
            })
            .collect()
    }
}
