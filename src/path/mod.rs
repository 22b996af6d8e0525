//! Single-player path simulation.
//!
//! One explorer walks the temple alone, credited with every treasure the
//! moment it is revealed. The walk ends on retreat, deck exhaustion, or the
//! second appearance of any hazard label. `simulate_batch` runs many
//! independent walks for reveal-count estimates.

mod batch;
mod simulator;

pub use batch::simulate_batch;
pub use simulator::{run_to_termination, PathAction, PathEnd, PathOutcome, PathState, PathStep};
