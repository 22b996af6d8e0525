//! Game configuration.
//!
//! `TempleConfig` describes the card pool and table size. It is validated
//! once when an engine component is constructed; after that, deck building
//! and round resolution cannot fail for configuration reasons.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::player::MAX_PLAYERS;

/// Standard treasure face values, one card each.
pub const DEFAULT_TREASURE_VALUES: [u32; 15] = [1, 2, 3, 4, 5, 5, 7, 7, 9, 11, 11, 13, 14, 15, 17];

/// Standard artifact values, one per round.
pub const DEFAULT_ARTIFACT_VALUES: [u32; 5] = [5, 7, 8, 10, 12];

/// Configuration rejected at startup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("at least one treasure value is required")]
    NoTreasureValues,

    #[error("{0} values must be positive")]
    ZeroValue(&'static str),

    #[error("{rounds} rounds need {rounds} artifact values, only {available} configured")]
    NotEnoughArtifacts { rounds: u32, available: usize },

    #[error("at least one round is required")]
    NoRounds,

    #[error("player count must be between {min} and {max}, got {count}")]
    PlayerCount { count: usize, min: usize, max: usize },
}

/// Card pool and table configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TempleConfig {
    /// Treasure face values. Cycled to fill `treasure_card_count` cards.
    pub treasure_values: Vec<u32>,

    /// Number of treasure cards in every deck.
    pub treasure_card_count: usize,

    /// Copies of each hazard label in a fresh deck.
    pub hazard_copies: u8,

    /// Artifact values; shuffled once per game into the round schedule.
    /// Empty disables artifacts.
    pub artifact_values: Vec<u32>,

    /// Rounds in a full expedition.
    pub rounds: u32,

    /// Players at the table.
    pub player_count: usize,
}

impl Default for TempleConfig {
    fn default() -> Self {
        Self {
            treasure_values: DEFAULT_TREASURE_VALUES.to_vec(),
            treasure_card_count: DEFAULT_TREASURE_VALUES.len(),
            hazard_copies: 3,
            artifact_values: DEFAULT_ARTIFACT_VALUES.to_vec(),
            rounds: 5,
            player_count: 4,
        }
    }
}

impl TempleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// The 35-card single-player deck used for reveal-count estimates:
    /// 20 treasures, 5 hazards x 3, no artifacts.
    pub fn monte_carlo() -> Self {
        Self {
            treasure_card_count: 20,
            artifact_values: Vec::new(),
            rounds: 1,
            player_count: 1,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_player_count(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    /// Replace the treasure pool; `card_count` cards are dealt by cycling `values`.
    #[must_use]
    pub fn with_treasures(mut self, values: Vec<u32>, card_count: usize) -> Self {
        self.treasure_values = values;
        self.treasure_card_count = card_count;
        self
    }

    #[must_use]
    pub fn with_hazard_copies(mut self, copies: u8) -> Self {
        self.hazard_copies = copies;
        self
    }

    #[must_use]
    pub fn with_artifact_values(mut self, values: Vec<u32>) -> Self {
        self.artifact_values = values;
        self
    }

    #[must_use]
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    /// Whether rounds get an artifact card at all.
    #[must_use]
    pub fn artifacts_enabled(&self) -> bool {
        !self.artifact_values.is_empty()
    }

    /// Check the configuration can produce every round's deck.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.treasure_values.is_empty() && self.treasure_card_count > 0 {
            return Err(ConfigError::NoTreasureValues);
        }
        if self.treasure_values.contains(&0) {
            return Err(ConfigError::ZeroValue("treasure"));
        }
        if self.artifact_values.contains(&0) {
            return Err(ConfigError::ZeroValue("artifact"));
        }
        if self.rounds == 0 {
            return Err(ConfigError::NoRounds);
        }
        if self.artifacts_enabled() && self.artifact_values.len() < self.rounds as usize {
            return Err(ConfigError::NotEnoughArtifacts {
                rounds: self.rounds,
                available: self.artifact_values.len(),
            });
        }
        if self.player_count == 0 || self.player_count > MAX_PLAYERS {
            return Err(ConfigError::PlayerCount {
                count: self.player_count,
                min: 1,
                max: MAX_PLAYERS,
            });
        }
        Ok(())
    }
}
