//! Response DTOs.

use serde::{Deserialize, Serialize};

use wordgrid_engine::{EngineStats, Session};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// A session as clients see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    /// Session id.
    pub id: String,
    /// Board words.
    pub words: Vec<String>,
    /// Word indices per team.
    pub team_words: Vec<Vec<usize>>,
    /// The fail word.
    pub fail: usize,
    /// Revealed word indices, in reveal order.
    pub opened: Vec<usize>,
}

impl From<Session> for SessionView {
    fn from(session: Session) -> Self {
        Self {
            id: session.id.to_string(),
            words: session.board.words.clone(),
            team_words: session.board.team_words.clone(),
            fail: session.board.fail,
            opened: session.revealed,
        }
    }
}

/// Result of revealing a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenedResponse {
    /// Revealed word indices after the reveal.
    pub opened: Vec<usize>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_seconds: u64,
}

/// Detailed health response.
#[derive(Debug, Clone, Serialize)]
pub struct DetailedHealthResponse {
    /// Status.
    pub status: String,
    /// Uptime in seconds.
    pub uptime_seconds: u64,
    /// Session and event counters.
    pub engine: EngineStats,
}
