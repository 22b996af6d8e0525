//! Core engine types: players, RNG, configuration, errors.
//!
//! Everything above this module (deck building, the path simulator, the
//! round resolver) is expressed in terms of these primitives.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;

pub use player::{PlayerId, PlayerMap, MAX_PLAYERS};
pub use rng::TempleRng;
pub use config::{ConfigError, TempleConfig};
pub use error::{EngineError, EngineResult};
