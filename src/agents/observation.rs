//! Observation encoding.
//!
//! Feature layout (11 values):
//!
//! | index | feature |
//! |---|---|
//! | 0 | round number |
//! | 1 | the player's pocket |
//! | 2 | unclaimed gems on the path |
//! | 3 | unclaimed artifacts on the path |
//! | 4..9 | revealed count per hazard: snake, spider, mummy, fire, rocks |
//! | 9 | cards left in the deck |
//! | 10 | players still inside |

use serde::{Deserialize, Serialize};

use crate::cards::Hazard;
use crate::core::PlayerId;
use crate::round::RoundState;

/// Length of `Observation::to_features`.
pub const OBSERVATION_SIZE: usize = 4 + Hazard::COUNT + 2;

/// Read-only projection of a round from one player's seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub round_number: u32,
    pub pocket: u32,
    pub path_gems: u32,
    pub path_artifacts: u32,
    pub hazard_counts: [u8; Hazard::COUNT],
    pub deck_remaining: u32,
    pub active_players: u32,
}

impl Observation {
    /// Observe `state` as seen by `player`.
    #[must_use]
    pub fn of(state: &RoundState, player: PlayerId) -> Self {
        Self {
            round_number: state.round_number(),
            pocket: state.pocket(player),
            path_gems: state.path_gems(),
            path_artifacts: state.path_artifacts(),
            hazard_counts: state.hazard_counts().as_array(),
            deck_remaining: state.deck().remaining() as u32,
            active_players: state.active().len() as u32,
        }
    }

    /// Hazards revealed so far, over all labels.
    #[must_use]
    pub fn total_hazards(&self) -> u32 {
        self.hazard_counts.iter().map(|&c| u32::from(c)).sum()
    }

    /// Flat feature vector in the documented order.
    #[must_use]
    pub fn to_features(&self) -> [f32; OBSERVATION_SIZE] {
        let mut features = [0.0; OBSERVATION_SIZE];
        features[0] = self.round_number as f32;
        features[1] = self.pocket as f32;
        features[2] = self.path_gems as f32;
        features[3] = self.path_artifacts as f32;
        for (slot, &count) in features[4..4 + Hazard::COUNT].iter_mut().zip(&self.hazard_counts) {
            *slot = f32::from(count);
        }
        features[4 + Hazard::COUNT] = self.deck_remaining as f32;
        features[5 + Hazard::COUNT] = self.active_players as f32;
        features
    }
}
