//! Server-Sent Events stream of a game's reveals.

use axum::extract::{Path, State};
use axum::response::sse::{Event, Sse};
use futures::{Stream, StreamExt};
use tracing::info;

use wordgrid_core::types::SessionId;
use wordgrid_realtime::{EventKind, HubEvent};

use crate::error::ApiResult;
use crate::state::AppState;

/// SSE event name for a reveal.
pub const OPENED_EVENT: &str = "opened";
/// SSE event name for a keep-alive.
pub const PING_EVENT: &str = "ping";

/// GET /api/game/{id}/subscribe
///
/// The stream ends when the client disconnects, when the subscriber falls
/// too far behind, or on server shutdown.
pub async fn subscribe(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Sse<impl Stream<Item = Result<Event, axum::Error>>>> {
    let subscription = state.engine.subscribe(&SessionId::from(id))?;

    let token = subscription.token();
    info!(
        session_id = %token.session_id,
        subscriber_id = %token.subscriber_id,
        "Event stream opened"
    );

    Ok(Sse::new(subscription.map(|event| to_sse_event(&event))))
}

/// Frames a hub event: `opened` with the revealed array, or `ping` with
/// `null`.
pub fn to_sse_event(event: &HubEvent) -> Result<Event, axum::Error> {
    let frame = Event::default().id(event.id.to_string());
    match &event.kind {
        EventKind::Revealed(opened) => frame.event(OPENED_EVENT).json_data(opened.as_slice()),
        EventKind::Keepalive => Ok(frame.event(PING_EVENT).data("null")),
    }
}
