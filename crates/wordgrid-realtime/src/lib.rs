//! # wordgrid-realtime
//!
//! Live update fan-out for WordGrid sessions. Provides:
//!
//! - One [`BroadcastHub`] per session, assigning gap-free increasing event ids
//! - Ordered, non-blocking delivery to every subscriber of a session
//! - A keep-alive timer that runs only while a hub has subscribers
//! - [`HubPool`], which creates hubs lazily and owns them by session id

pub mod hub;
pub mod message;
pub mod metrics;

pub use hub::hub::BroadcastHub;
pub use hub::pool::HubPool;
pub use hub::subscription::{Subscription, SubscriptionToken};
pub use message::types::{DeliveryError, EventKind, HubEvent};
pub use metrics::{HubMetrics, MetricsSnapshot};
