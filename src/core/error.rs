//! Engine error types.
//!
//! The engine has no recoverable failures under correct usage. Everything
//! here is a precondition violation by the caller: a decision for a player
//! who already left, a step on a finished round, or a bad configuration.

use thiserror::Error;

use super::config::ConfigError;
use super::player::PlayerId;

/// Errors returned by engine operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A decision was malformed for the given player.
    #[error("invalid input for {player}: {reason}")]
    InvalidInput {
        player: PlayerId,
        reason: &'static str,
    },

    /// The operation is not allowed in the current state.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// Wrong number of policies supplied for the players in a game.
    #[error("expected {expected} policies, got {got}")]
    PolicyCount { expected: usize, got: usize },

    /// Configuration rejected at startup.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A state snapshot could not be encoded or decoded.
    #[error("snapshot error: {0}")]
    Snapshot(String),
}

impl From<bincode::Error> for EngineError {
    fn from(err: bincode::Error) -> Self {
        EngineError::Snapshot(err.to_string())
    }
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
