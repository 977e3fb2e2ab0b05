//! Board generation: dictionary, sampling, and team assignment.

pub mod dictionary;
pub mod generator;
pub mod sampler;

pub use dictionary::Dictionary;
pub use generator::{Board, BoardGenerator, BoardRequest, active_count};
