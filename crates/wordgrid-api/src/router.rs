//! Route definitions for the WordGrid HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState` and
//! passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the API router with request logging.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new().merge(game_routes()).merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Game sessions and their event stream
fn game_routes() -> Router<AppState> {
    Router::new()
        .route("/game", post(handlers::game::create_game))
        .route("/game/{id}", get(handlers::game::get_game))
        .route("/game/{id}/open", post(handlers::game::open_word))
        .route("/game/{id}/subscribe", get(handlers::events::subscribe))
}

/// Health checks
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}
