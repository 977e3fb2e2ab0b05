//! Hub event types.

pub mod types;

pub use types::{DeliveryError, EventKind, HubEvent};
