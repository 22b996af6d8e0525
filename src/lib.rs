//! # temple-engine
//!
//! Rules engine for a push-your-luck temple exploration card game, built
//! for Monte Carlo analysis and reinforcement-learning training.
//!
//! Explorers walk into a temple one card at a time. Treasure is split
//! evenly among everyone still inside, with indivisible remainders left on
//! the path. Before every reveal each explorer secretly decides to stay or
//! leave. Leavers share the path remainders, and a lone leaver also claims
//! every artifact on the path. The second copy of any hazard sends everyone
//! still inside home empty-handed.
//!
//! ## Modules
//!
//! - `core`: Players, RNG, configuration, errors
//! - `cards`: Cards, artifact schedules and the per-round deck builder
//! - `path`: Single-explorer walk and the batch Monte Carlo runner
//! - `round`: Multi-player round state and the simultaneous-decision resolver
//! - `agents`: Observations and player policies
//! - `env`: `reset`/`step`/`observe` environment for one focal player
//! - `expedition`: Full multi-round game with banking and hazard removal

pub mod core;
pub mod cards;
pub mod path;
pub mod round;
pub mod agents;
pub mod env;
pub mod expedition;

#[cfg(feature = "python")]
mod python;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, PlayerMap, MAX_PLAYERS,
    TempleRng,
    TempleConfig, ConfigError,
    EngineError, EngineResult,
};

pub use crate::cards::{ArtifactSchedule, Card, Deck, DeckBuilder, Hazard, HazardCounts};

pub use crate::path::{
    run_to_termination, simulate_batch,
    PathAction, PathEnd, PathOutcome, PathState, PathStep,
};

pub use crate::round::{Decision, LeaveResolution, PlayerFate, RoundEvent, RoundState, RoundStatus};

pub use crate::agents::{
    AlwaysLeave, AlwaysStay, FnPolicy, Observation, PlayerPolicy, RiskThreshold, OBSERVATION_SIZE,
};

pub use crate::env::{TempleEnv, Transition};

pub use crate::expedition::{Expedition, GameResult, RoundSummary};
