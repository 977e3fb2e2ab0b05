//! Per-session broadcast hubs.

pub mod hub;
pub mod keepalive;
pub mod pool;
pub mod subscription;

pub use hub::BroadcastHub;
pub use pool::HubPool;
pub use subscription::{Subscription, SubscriptionToken};
