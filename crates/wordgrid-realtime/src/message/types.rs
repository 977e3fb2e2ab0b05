//! Events delivered by a hub, and the ways a delivery can fail.

use std::sync::Arc;

use tokio::sync::mpsc;

/// What happened in a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// A word was revealed. Carries the full revealed set, in reveal order,
    /// so a client that missed an earlier event still converges.
    Revealed(Arc<Vec<usize>>),
    /// Nothing happened; sent to keep idle connections open.
    Keepalive,
}

impl EventKind {
    /// Build a `Revealed` event from a revealed-set snapshot.
    pub fn revealed(indices: &[usize]) -> Self {
        Self::Revealed(Arc::new(indices.to_vec()))
    }

    /// Whether this is a keep-alive.
    pub fn is_keepalive(&self) -> bool {
        matches!(self, Self::Keepalive)
    }
}

/// An event with its hub-local sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubEvent {
    /// Strictly increasing per hub, starting at 1.
    pub id: u64,
    /// Event kind and payload.
    pub kind: EventKind,
}

/// A single subscriber could not take an event.
///
/// Never surfaced to the caller of `emit`; the subscriber is dropped instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    /// The subscriber's outbound queue is full.
    #[error("subscriber queue is full")]
    Full,
    /// The subscriber's receiving side is gone.
    #[error("subscriber channel is closed")]
    Closed,
}

impl<T> From<mpsc::error::TrySendError<T>> for DeliveryError {
    fn from(err: mpsc::error::TrySendError<T>) -> Self {
        match err {
            mpsc::error::TrySendError::Full(_) => Self::Full,
            mpsc::error::TrySendError::Closed(_) => Self::Closed,
        }
    }
}
