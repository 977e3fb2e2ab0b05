//! Game session handlers.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use tracing::debug;

use wordgrid_core::error::AppError;
use wordgrid_core::types::SessionId;

use crate::dto::request::{CreateGameQuery, OpenWordRequest};
use crate::dto::response::{OpenedResponse, SessionView};
use crate::error::ApiResult;
use crate::state::AppState;

/// POST /api/game
pub async fn create_game(
    State(state): State<AppState>,
    query: Result<Query<CreateGameQuery>, QueryRejection>,
) -> ApiResult<Json<SessionView>> {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            debug!(error = %rejection, "Unreadable create query, using defaults");
            CreateGameQuery::default()
        }
    };

    let session = state.engine.create_session(&query.to_board_request())?;
    Ok(Json(SessionView::from(session)))
}

/// GET /api/game/{id}
pub async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SessionView>> {
    let session = state.engine.get_session(&SessionId::from(id))?;
    Ok(Json(SessionView::from(session)))
}

/// POST /api/game/{id}/open
pub async fn open_word(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<OpenWordRequest>, JsonRejection>,
) -> ApiResult<Json<OpenedResponse>> {
    let id = SessionId::from(id);
    // Unknown games are reported before a bad body.
    state.engine.touch_session(&id)?;

    let Json(request) = body.map_err(|rejection| {
        AppError::invalid_argument(format!("Invalid request body: {}", rejection.body_text()))
    })?;
    let idx = usize::try_from(request.idx).map_err(|_| {
        AppError::invalid_argument(format!("Word index {} is out of range", request.idx))
    })?;

    let opened = state.engine.reveal_word(&id, idx)?;
    Ok(Json(OpenedResponse { opened }))
}
