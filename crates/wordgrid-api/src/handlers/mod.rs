//! Route handlers organized by domain.

pub mod events;
pub mod game;
pub mod health;
