//! Cards and decks.
//!
//! - `Card`: treasure, hazard or artifact
//! - `HazardCounts`: per-label tally of revealed hazards
//! - `Deck`: shuffled card sequence consumed from the front
//! - `DeckBuilder`: builds a round's deck from `TempleConfig`

pub mod card;
pub mod deck;

pub use card::{Card, Hazard, HazardCounts};
pub use deck::{ArtifactSchedule, Deck, DeckBuilder};
