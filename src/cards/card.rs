//! Card values.

use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Hazard labels, in canonical observation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Hazard {
    Snake,
    Spider,
    Mummy,
    Fire,
    Rocks,
}

impl Hazard {
    pub const COUNT: usize = 5;

    pub const ALL: [Hazard; Hazard::COUNT] = [
        Hazard::Snake,
        Hazard::Spider,
        Hazard::Mummy,
        Hazard::Fire,
        Hazard::Rocks,
    ];

    /// Position in `Hazard::ALL`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Hazard::Snake => "snake",
            Hazard::Spider => "spider",
            Hazard::Mummy => "mummy",
            Hazard::Fire => "fire",
            Hazard::Rocks => "rocks",
        }
    }
}

impl std::fmt::Display for Hazard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single card. Immutable once drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Card {
    /// Gems split among the players still exploring.
    Treasure(u32),
    /// Ends the round for everyone inside on its second appearance.
    Hazard(Hazard),
    /// Claimable only by a player leaving alone.
    Artifact(u32),
}

impl Card {
    #[must_use]
    pub fn hazard(self) -> Option<Hazard> {
        match self {
            Card::Hazard(h) => Some(h),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_hazard(self) -> bool {
        matches!(self, Card::Hazard(_))
    }

    #[must_use]
    pub fn is_artifact(self) -> bool {
        matches!(self, Card::Artifact(_))
    }

    /// Face value of treasure cards.
    #[must_use]
    pub fn treasure_value(self) -> Option<u32> {
        match self {
            Card::Treasure(v) => Some(v),
            _ => None,
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Card::Treasure(v) => write!(f, "treasure:{v}"),
            Card::Hazard(h) => write!(f, "hazard:{h}"),
            Card::Artifact(v) => write!(f, "artifact:{v}"),
        }
    }
}

/// How many times each hazard label has been revealed this round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HazardCounts([u8; Hazard::COUNT]);

impl HazardCounts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more reveal of `hazard`, returning the new count.
    pub fn record(&mut self, hazard: Hazard) -> u8 {
        let slot = &mut self.0[hazard.index()];
        *slot += 1;
        *slot
    }

    #[must_use]
    pub fn get(&self, hazard: Hazard) -> u8 {
        self.0[hazard.index()]
    }

    /// Total hazards revealed, over all labels.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.0.iter().map(|&c| u32::from(c)).sum()
    }

    /// Counts in canonical label order.
    #[must_use]
    pub fn as_array(&self) -> [u8; Hazard::COUNT] {
        self.0
    }
}

impl Index<Hazard> for HazardCounts {
    type Output = u8;

    fn index(&self, hazard: Hazard) -> &u8 {
        &self.0[hazard.index()]
    }
}
