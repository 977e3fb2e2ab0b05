//! Subscriber side of a hub.

use std::pin::Pin;
use std::sync::Weak;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;

use wordgrid_core::types::{SessionId, SubscriberId};

use crate::message::types::HubEvent;

use super::hub::BroadcastHub;

/// Identifies one subscription; enough to unsubscribe it later.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionToken {
    /// Session the subscription belongs to.
    pub session_id: SessionId,
    /// Subscriber identity within the session hub.
    pub subscriber_id: SubscriberId,
}

/// A live feed of one session's events.
///
/// Dropping the subscription detaches it from its hub. The stream ends
/// when the hub drops this subscriber or is closed.
#[derive(Debug)]
pub struct Subscription {
    token: SubscriptionToken,
    receiver: mpsc::Receiver<HubEvent>,
    hub: Weak<BroadcastHub>,
}

impl Subscription {
    pub(crate) fn new(
        token: SubscriptionToken,
        receiver: mpsc::Receiver<HubEvent>,
        hub: Weak<BroadcastHub>,
    ) -> Self {
        Self {
            token,
            receiver,
            hub,
        }
    }

    /// Token for this subscription.
    pub fn token(&self) -> &SubscriptionToken {
        &self.token
    }

    /// Waits for the next event. `None` once the subscription has ended.
    pub async fn recv(&mut self) -> Option<HubEvent> {
        self.receiver.recv().await
    }

    /// Returns the next buffered event without waiting.
    pub fn try_recv(&mut self) -> Option<HubEvent> {
        self.receiver.try_recv().ok()
    }
}

impl Stream for Subscription {
    type Item = HubEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<HubEvent>> {
        self.receiver.poll_recv(cx)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.unsubscribe(self.token.subscriber_id);
        }
    }
}
