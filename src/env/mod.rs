//! Reinforcement-learning environment.
//!
//! Wraps a single round in a gym-style `reset`/`step` interface from the
//! focal player's seat, with opponents driven by a `PlayerPolicy`.

mod temple_env;

pub use temple_env::{TempleEnv, Transition};
