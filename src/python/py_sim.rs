//! Monte Carlo bindings for Python.

use numpy::PyArray1;
use pyo3::prelude::*;

use crate::core::TempleConfig;
use crate::path;

/// Run always-continue path walks and return their lengths.
///
/// The GIL is released while the workers run.
#[pyfunction]
#[pyo3(signature = (simulations, seed = 0, workers = 1, treasure_cards = 20))]
pub fn simulate_batch<'py>(
    py: Python<'py>,
    simulations: usize,
    seed: u64,
    workers: usize,
    treasure_cards: usize,
) -> PyResult<Bound<'py, PyArray1<u32>>> {
    let mut config = TempleConfig::monte_carlo();
    config.treasure_card_count = treasure_cards;
    let lengths = py.allow_threads(|| path::simulate_batch(&config, simulations, seed, workers))?;
    Ok(PyArray1::from_vec_bound(py, lengths))
}
