//! Multi-player round resolution.
//!
//! Players share one path. Each cycle every explorer still inside decides to
//! stay or leave; leavers split the gems left on the path, then the next
//! card is revealed for whoever remains.

mod resolver;
mod state;

pub use resolver::{LeaveResolution, RoundEvent};
pub use state::{Decision, PlayerFate, RoundState, RoundStatus};
