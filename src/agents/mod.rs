//! Decision sources and the observations they consume.
//!
//! - `Observation`: fixed-order numeric view of a round for one player
//! - `PlayerPolicy`: anything that turns an observation into a decision

pub mod observation;
pub mod policy;

pub use observation::{Observation, OBSERVATION_SIZE};
pub use policy::{AlwaysLeave, AlwaysStay, FnPolicy, PlayerPolicy, RiskThreshold};
