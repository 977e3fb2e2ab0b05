//! # wordgrid-api
//!
//! HTTP API layer for WordGrid built on Axum.
//!
//! Provides the game endpoints, the Server-Sent Events stream of reveals,
//! health checks, middleware (CORS, logging), DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
