//! # wordgrid-engine
//!
//! Game logic for WordGrid: board generation from a dictionary, the
//! in-memory session registry, and the [`SessionEngine`] that ties
//! reveals to the realtime hubs.
//!
//! The engine is constructed once at startup and shared via `Arc`.

pub mod board;
pub mod session;

pub use board::{Board, BoardGenerator, BoardRequest, Dictionary};
pub use session::{
    EngineStats, Session, SessionEngine, SessionRegistry, SweeperConfig, spawn_sweeper,
};
