//! Full multi-round game.
//!
//! An expedition plays `TempleConfig::rounds` rounds in a row. Gems a
//! player walks out with are banked in their chest for good. Each hazard
//! repeat permanently removes one card of that hazard from later decks. The
//! richest chest after the last round wins.

mod game;

pub use game::{Expedition, GameResult, RoundSummary};
