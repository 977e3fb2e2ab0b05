//! Sessions: registry, engine, and idle sweeper.

pub mod engine;
pub mod registry;
pub mod sweeper;

pub use engine::{EngineStats, SessionEngine};
pub use registry::{Session, SessionRegistry};
pub use sweeper::{SweeperConfig, spawn_sweeper};
