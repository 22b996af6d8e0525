//! Python bindings for the temple engine.
//!
//! # Quick Start
//!
//! ```python
//! import temple_engine as te
//!
//! env = te.TempleEnv(seed=7, player_count=4)
//! obs = env.reset()
//! obs, reward, done = env.step(0)  # 0 = stay, 1 = leave
//!
//! lengths = te.simulate_batch(100_000, seed=1, workers=8)
//! ```

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::core::EngineError;

mod py_env;
mod py_sim;

pub use py_env::*;
pub use py_sim::*;

impl From<EngineError> for PyErr {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidState(_) | EngineError::Snapshot(_) => {
                PyRuntimeError::new_err(err.to_string())
            }
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

/// temple_engine: push-your-luck temple exploration for RL training.
#[pymodule]
fn temple_engine(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTempleEnv>()?;
    m.add_class::<PyExpedition>()?;
    m.add_function(wrap_pyfunction!(simulate_batch, m)?)?;
    m.add("OBSERVATION_SIZE", crate::agents::OBSERVATION_SIZE)?;
    Ok(())
}
