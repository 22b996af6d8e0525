//! Environment and game bindings for Python.

use numpy::PyArray1;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use tracing::warn;

use crate::agents::{Observation, PlayerPolicy, RiskThreshold};
use crate::core::{PlayerId, TempleConfig, TempleRng};
use crate::env::TempleEnv;
use crate::expedition::{Expedition, GameResult};
use crate::round::Decision;

fn decision(action: u8) -> PyResult<Decision> {
    Decision::from_index(action).ok_or_else(|| {
        PyValueError::new_err(format!("action must be 0 (stay) or 1 (leave), got {action}"))
    })
}

fn seat(index: usize, player_count: usize) -> PyResult<PlayerId> {
    if index >= player_count {
        return Err(PyValueError::new_err(format!(
            "player {index} out of range for {player_count} players"
        )));
    }
    // index < player_count <= MAX_PLAYERS
    Ok(PlayerId::new(index as u8))
}

fn features<'py>(py: Python<'py>, observation: &Observation) -> Bound<'py, PyArray1<f32>> {
    PyArray1::from_slice_bound(py, &observation.to_features())
}

/// Python callable used as a player policy.
///
/// The callable receives the observation as a float32 numpy array and
/// returns 0 (stay) or 1 (leave). Failures fall back to staying.
pub struct PyPolicy {
    callback: PyObject,
}

impl PyPolicy {
    pub fn new(callback: PyObject) -> Self {
        Self { callback }
    }
}

impl PlayerPolicy for PyPolicy {
    fn decide(&self, observation: &Observation, _rng: &mut TempleRng) -> Decision {
        Python::with_gil(|py| {
            let obs = features(py, observation);
            match self.callback.call1(py, (obs,)) {
                Ok(result) => match result.extract::<u8>(py).ok().and_then(Decision::from_index) {
                    Some(decision) => decision,
                    None => {
                        warn!("policy callback returned a non-action value; staying");
                        Decision::Stay
                    }
                },
                Err(e) => {
                    warn!(error = %e, "policy callback failed; staying");
                    Decision::Stay
                }
            }
        })
    }
}

// SAFETY: the callback is only touched inside Python::with_gil().
unsafe impl Send for PyPolicy {}
unsafe impl Sync for PyPolicy {}

fn opponent_policy(opponent: Option<PyObject>) -> Box<dyn PlayerPolicy> {
    match opponent {
        Some(callback) => Box::new(PyPolicy::new(callback)),
        None => Box::new(RiskThreshold::default()),
    }
}

/// Single-round environment seen from player 0.
#[pyclass(name = "TempleEnv")]
pub struct PyTempleEnv {
    env: TempleEnv,
}

#[pymethods]
impl PyTempleEnv {
    /// Create an environment.
    ///
    /// # Arguments
    /// - seed: RNG seed
    /// - player_count: seats including the focal player
    /// - opponent: optional callable driving every other seat; the built-in
    ///   risk-threshold bot is used when omitted
    #[new]
    #[pyo3(signature = (seed = 0, player_count = 4, opponent = None))]
    fn new(seed: u64, player_count: usize, opponent: Option<PyObject>) -> PyResult<Self> {
        let config = TempleConfig::default().with_player_count(player_count);
        let env = TempleEnv::new(config, opponent_policy(opponent), seed)?;
        Ok(Self { env })
    }

    /// Start a new episode and return the focal observation.
    #[pyo3(signature = (round_number = None))]
    fn reset<'py>(
        &mut self,
        py: Python<'py>,
        round_number: Option<u32>,
    ) -> Bound<'py, PyArray1<f32>> {
        let obs = self.env.reset(round_number);
        features(py, &obs)
    }

    /// Apply 0 (stay) or 1 (leave). Returns `(observation, reward, done)`.
    fn step<'py>(
        &mut self,
        py: Python<'py>,
        action: u8,
    ) -> PyResult<(Bound<'py, PyArray1<f32>>, u32, bool)> {
        let t = self.env.step(decision(action)?)?;
        Ok((features(py, &t.observation), t.reward, t.done))
    }

    /// Observation for any seat.
    #[pyo3(signature = (player = 0))]
    fn observe<'py>(&self, py: Python<'py>, player: usize) -> PyResult<Bound<'py, PyArray1<f32>>> {
        let id = seat(player, self.env.config().player_count)?;
        Ok(features(py, &self.env.observe(id)))
    }

    #[getter]
    fn done(&self) -> bool {
        self.env.is_done()
    }

    #[getter]
    fn round_number(&self) -> u32 {
        self.env.round().round_number()
    }

    fn __repr__(&self) -> String {
        format!("{:?}", self.env)
    }
}

/// Full multi-round game between Python callables.
#[pyclass(name = "Expedition")]
pub struct PyExpedition {
    game: Expedition,
}

#[pymethods]
impl PyExpedition {
    #[new]
    #[pyo3(signature = (seed = 0, player_count = 4, rounds = 5))]
    fn new(seed: u64, player_count: usize, rounds: u32) -> PyResult<Self> {
        let config = TempleConfig::default()
            .with_player_count(player_count)
            .with_rounds(rounds);
        Ok(Self {
            game: Expedition::new(config, seed)?,
        })
    }

    /// Play every remaining round. `policies` holds one callable per seat;
    /// `None` seats use the risk-threshold bot.
    ///
    /// Returns the winning seats (more than one on a tie).
    fn play(&mut self, policies: Vec<Option<PyObject>>) -> PyResult<Vec<u8>> {
        let policies: Vec<Box<dyn PlayerPolicy>> =
            policies.into_iter().map(opponent_policy).collect();
        let refs: Vec<&dyn PlayerPolicy> = policies.iter().map(|p| p.as_ref()).collect();
        let winners = match self.game.play(&refs)? {
            GameResult::Winner(p) => vec![p.0],
            GameResult::Tied(ps) => ps.into_iter().map(|p| p.0).collect(),
        };
        Ok(winners)
    }

    /// Banked gems per seat.
    fn chests(&self) -> Vec<u32> {
        self.game.chests().values().copied().collect()
    }

    #[getter]
    fn finished(&self) -> bool {
        self.game.is_finished()
    }
}
