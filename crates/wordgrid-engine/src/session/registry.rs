//! In-memory session registry.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rand::Rng;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use wordgrid_core::error::AppError;
use wordgrid_core::result::AppResult;
use wordgrid_core::types::SessionId;

use crate::board::{Board, BoardGenerator, BoardRequest};

/// Attempts at drawing an unused session id before giving up.
const MAX_ID_ATTEMPTS: usize = 16;

/// Snapshot of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Session id.
    pub id: SessionId,
    /// The session's board.
    pub board: Arc<Board>,
    /// Revealed word indices, in reveal order.
    pub revealed: Vec<usize>,
}

#[derive(Debug)]
struct SessionEntry {
    board: Arc<Board>,
    revealed: Vec<usize>,
    last_activity: Instant,
}

impl SessionEntry {
    fn snapshot(&self, id: &SessionId) -> Session {
        Session {
            id: id.clone(),
            board: Arc::clone(&self.board),
            revealed: self.revealed.clone(),
        }
    }
}

fn session_not_found(id: &SessionId) -> AppError {
    AppError::not_found(format!("Game {id} not found"))
}

/// Session id → session state.
///
/// Each entry is guarded by its map shard, so a reveal is atomic per session
/// while different sessions proceed independently.
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: DashMap<SessionId, SessionEntry>,
    generator: BoardGenerator,
}

impl SessionRegistry {
    /// Creates an empty registry.
    pub fn new(generator: BoardGenerator) -> Self {
        Self {
            sessions: DashMap::new(),
            generator,
        }
    }

    /// Creates a session with a fresh board.
    pub fn create(&self, request: &BoardRequest) -> AppResult<Session> {
        self.create_with_rng(request, &mut rand::thread_rng())
    }

    /// Creates a session drawing all randomness from `rng`.
    pub fn create_with_rng<R>(&self, request: &BoardRequest, rng: &mut R) -> AppResult<Session>
    where
        R: Rng + ?Sized,
    {
        let board = Arc::new(self.generator.generate(request, rng)?);

        for _ in 0..MAX_ID_ATTEMPTS {
            let id = SessionId::random(rng);
            match self.sessions.entry(id.clone()) {
                Entry::Occupied(_) => {
                    debug!(session_id = %id, "Session id collision, retrying");
                }
                Entry::Vacant(slot) => {
                    let entry = slot.insert(SessionEntry {
                        board,
                        revealed: Vec::new(),
                        last_activity: Instant::now(),
                    });
                    info!(
                        session_id = %id,
                        words = entry.board.word_count(),
                        teams = entry.board.team_count(),
                        "Session created"
                    );
                    return Ok(entry.snapshot(&id));
                }
            }
        }

        warn!(attempts = MAX_ID_ATTEMPTS, "Could not allocate a session id");
        Err(AppError::internal("Could not allocate a session id"))
    }

    /// Returns a snapshot of a session.
    pub fn get(&self, id: &SessionId) -> AppResult<Session> {
        self.sessions
            .get(id)
            .map(|entry| entry.snapshot(id))
            .ok_or_else(|| session_not_found(id))
    }

    /// Whether a session exists.
    pub fn contains(&self, id: &SessionId) -> bool {
        self.sessions.contains_key(id)
    }

    /// Reveals a word and returns the revealed set. Revealing an already
    /// revealed word changes nothing.
    pub fn reveal(&self, id: &SessionId, idx: usize) -> AppResult<Vec<usize>> {
        self.reveal_then(id, idx, |_| {})
    }

    /// Like [`SessionRegistry::reveal`], and when `idx` was newly revealed
    /// runs `notify` with the updated set while the session is still
    /// locked. Concurrent reveals on one session therefore notify in the
    /// order they mutate.
    pub fn reveal_then<F>(&self, id: &SessionId, idx: usize, notify: F) -> AppResult<Vec<usize>>
    where
        F: FnOnce(&[usize]),
    {
        let mut entry = self.sessions.get_mut(id).ok_or_else(|| session_not_found(id))?;

        if !entry.board.contains_index(idx) {
            return Err(AppError::invalid_argument(format!(
                "Word index {idx} is outside the board of {} words",
                entry.board.word_count()
            )));
        }

        entry.last_activity = Instant::now();
        if entry.revealed.contains(&idx) {
            debug!(session_id = %id, idx, "Word already revealed");
        } else {
            entry.revealed.push(idx);
            debug!(session_id = %id, idx, revealed = entry.revealed.len(), "Word revealed");
            notify(&entry.revealed);
        }

        Ok(entry.revealed.clone())
    }

    /// Marks a session active and runs `f` while it is locked.
    pub fn touch_then<T, F>(&self, id: &SessionId, f: F) -> AppResult<T>
    where
        F: FnOnce() -> T,
    {
        let mut entry = self.sessions.get_mut(id).ok_or_else(|| session_not_found(id))?;
        entry.last_activity = Instant::now();
        Ok(f())
    }

    /// Marks a session active.
    pub fn touch(&self, id: &SessionId) -> AppResult<()> {
        self.touch_then(id, || ())
    }

    /// Removes sessions idle for at least `max_idle`, except those `keep`
    /// vetoes. Returns the removed ids.
    pub fn evict_idle<F>(&self, max_idle: Duration, keep: F) -> Vec<SessionId>
    where
        F: Fn(&SessionId) -> bool,
    {
        let now = Instant::now();
        let mut evicted = Vec::new();
        self.sessions.retain(|id, entry| {
            let idle = now.saturating_duration_since(entry.last_activity) >= max_idle;
            if idle && !keep(id) {
                evicted.push(id.clone());
                false
            } else {
                true
            }
        });
        evicted
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether there are no sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
