//! Request DTOs.

use serde::{Deserialize, Serialize};

use wordgrid_engine::BoardRequest;

/// Query string of `POST /api/game`.
///
/// Values are kept as raw strings so a malformed value degrades to the
/// default instead of rejecting the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameQuery {
    /// Requested number of words.
    #[serde(default, alias = "size")]
    pub word_count: Option<String>,
    /// Requested number of teams.
    #[serde(default, alias = "teams")]
    pub team_count: Option<String>,
}

impl CreateGameQuery {
    /// Board request with unparsable values dropped.
    pub fn to_board_request(&self) -> BoardRequest {
        BoardRequest {
            word_count: parse_count(self.word_count.as_deref()),
            team_count: parse_count(self.team_count.as_deref()),
        }
    }
}

fn parse_count(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|value| value.trim().parse().ok())
}

/// Body of `POST /api/game/{id}/open`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenWordRequest {
    /// Index of the word to reveal.
    pub idx: i64,
}
