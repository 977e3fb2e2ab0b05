//! Board generation.

use std::ops::RangeInclusive;
use std::sync::Arc;

use rand::Rng;
use tracing::debug;

use wordgrid_core::config::GameConfig;
use wordgrid_core::error::AppError;
use wordgrid_core::result::AppResult;

use super::dictionary::Dictionary;
use super::sampler;

/// A session's immutable word layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Words on the board; a word's position is its identifier.
    pub words: Vec<String>,
    /// Word indices owned by each team. Pairwise disjoint.
    pub team_words: Vec<Vec<usize>>,
    /// The word that loses the game. In no team.
    pub fail: usize,
}

impl Board {
    /// Number of words on the board.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Number of teams.
    pub fn team_count(&self) -> usize {
        self.team_words.len()
    }

    /// Number of words owned by some team.
    pub fn active_count(&self) -> usize {
        self.team_words.iter().map(Vec::len).sum()
    }

    /// Team owning `idx`, if any.
    pub fn team_of(&self, idx: usize) -> Option<usize> {
        self.team_words.iter().position(|team| team.contains(&idx))
    }

    /// Indices that belong to no team and are not the fail word.
    pub fn neutral_indices(&self) -> Vec<usize> {
        (0..self.word_count())
            .filter(|&i| i != self.fail && self.team_of(i).is_none())
            .collect()
    }

    /// Whether `idx` names a word on this board.
    pub fn contains_index(&self, idx: usize) -> bool {
        idx < self.words.len()
    }
}

/// Requested board shape. Missing or out-of-range values fall back to the
/// configured minimum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardRequest {
    /// Requested number of words.
    pub word_count: Option<usize>,
    /// Requested number of teams.
    pub team_count: Option<usize>,
}

impl BoardRequest {
    /// A request for an explicit shape.
    pub fn new(word_count: usize, team_count: usize) -> Self {
        Self {
            word_count: Some(word_count),
            team_count: Some(team_count),
        }
    }
}

/// Number of team-owned words for a board shape.
///
/// Teams together own about `team_count / (team_count + 1)` of the board,
/// leaving room for the fail word and at least one neutral word on any
/// board of two or more words. An empty board has none.
pub fn active_count(word_count: usize, team_count: usize) -> usize {
    match word_count.checked_sub(1) {
        Some(rest) => rest * team_count / (team_count + 1) + 1,
        None => 0,
    }
}

/// Builds boards from a dictionary within configured size limits.
#[derive(Debug, Clone)]
pub struct BoardGenerator {
    dictionary: Arc<Dictionary>,
    word_counts: RangeInclusive<usize>,
    team_counts: RangeInclusive<usize>,
}

impl BoardGenerator {
    /// Validates the configured ranges against the dictionary.
    pub fn new(dictionary: Arc<Dictionary>, config: &GameConfig) -> AppResult<Self> {
        let word_counts = config.word_count_range();
        let team_counts = config.team_count_range();

        if word_counts.is_empty() {
            return Err(AppError::configuration(format!(
                "Word count range {word_counts:?} is empty"
            )));
        }
        if team_counts.is_empty() {
            return Err(AppError::configuration(format!(
                "Team count range {team_counts:?} is empty"
            )));
        }
        if *word_counts.start() < 2 {
            return Err(AppError::configuration("Boards need at least 2 words"));
        }
        if *team_counts.start() < 1 {
            return Err(AppError::configuration("Boards need at least 1 team"));
        }
        if *word_counts.end() > dictionary.len() {
            return Err(AppError::configuration(format!(
                "Maximum board size {} exceeds dictionary size {}",
                word_counts.end(),
                dictionary.len()
            )));
        }

        Ok(Self {
            dictionary,
            word_counts,
            team_counts,
        })
    }

    /// Effective `(word_count, team_count)` for a request.
    pub fn resolve(&self, request: &BoardRequest) -> (usize, usize) {
        let pick = |value: Option<usize>, range: &RangeInclusive<usize>| {
            value
                .filter(|v| range.contains(v))
                .unwrap_or(*range.start())
        };
        (
            pick(request.word_count, &self.word_counts),
            pick(request.team_count, &self.team_counts),
        )
    }

    /// Generates a board.
    pub fn generate<R>(&self, request: &BoardRequest, rng: &mut R) -> AppResult<Board>
    where
        R: Rng + ?Sized,
    {
        let (word_count, team_count) = self.resolve(request);

        let words = sampler::sample_distinct(rng, word_count, self.dictionary.words())
            .map_err(|e| AppError::configuration(e.message))?;

        let active = active_count(word_count, team_count);
        let drawn = sampler::sample_indices(rng, active + 1, word_count, &[])?;
        let (fail, active_words) = match drawn.split_first() {
            Some((fail, rest)) => (*fail, rest),
            None => return Err(AppError::internal("Empty index draw")),
        };

        let mut team_words: Vec<Vec<usize>> = vec![Vec::new(); team_count];
        for (i, &idx) in active_words.iter().enumerate() {
            team_words[i % team_count].push(idx);
        }
        sampler::shuffle(rng, &mut team_words);

        debug!(word_count, team_count, active, "Board generated");

        Ok(Board {
            words,
            team_words,
            fail,
        })
    }
}
