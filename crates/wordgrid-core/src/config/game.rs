//! Board generation and session lifetime configuration.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Board generation and session lifetime settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Smallest accepted board size; also the fallback size.
    #[serde(default = "default_word_count_min")]
    pub word_count_min: usize,
    /// Largest accepted board size.
    #[serde(default = "default_word_count_max")]
    pub word_count_max: usize,
    /// Smallest accepted team count; also the fallback team count.
    #[serde(default = "default_team_count_min")]
    pub team_count_min: usize,
    /// Largest accepted team count.
    #[serde(default = "default_team_count_max")]
    pub team_count_max: usize,
    /// Optional word list file (comma or newline separated). The built-in
    /// dictionary is used when unset.
    #[serde(default)]
    pub dictionary_path: Option<String>,
    /// Sessions idle for longer than this are evicted. `0` disables eviction.
    #[serde(default)]
    pub session_idle_ttl_seconds: u64,
    /// How often the idle sweeper runs, in seconds.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            word_count_min: default_word_count_min(),
            word_count_max: default_word_count_max(),
            team_count_min: default_team_count_min(),
            team_count_max: default_team_count_max(),
            dictionary_path: None,
            session_idle_ttl_seconds: 0,
            sweep_interval_seconds: default_sweep_interval(),
        }
    }
}

impl GameConfig {
    /// Accepted board sizes.
    pub fn word_count_range(&self) -> RangeInclusive<usize> {
        self.word_count_min..=self.word_count_max
    }

    /// Accepted team counts.
    pub fn team_count_range(&self) -> RangeInclusive<usize> {
        self.team_count_min..=self.team_count_max
    }
}

fn default_word_count_min() -> usize {
    25
}

fn default_word_count_max() -> usize {
    50
}

fn default_team_count_min() -> usize {
    2
}

fn default_team_count_max() -> usize {
    3
}

fn default_sweep_interval() -> u64 {
    300
}
