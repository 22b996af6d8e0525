//! Focal-player environment over one round.

use smallvec::SmallVec;
use tracing::debug;

use crate::agents::{Observation, PlayerPolicy};
use crate::cards::{ArtifactSchedule, DeckBuilder};
use crate::core::{EngineError, EngineResult, PlayerId, TempleConfig, TempleRng};
use crate::round::{Decision, RoundEvent, RoundState};

/// Result of one environment step.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    /// The focal player's view after the step.
    pub observation: Observation,
    /// Gems the focal player walked out with this step; 0 otherwise.
    pub reward: u32,
    /// The focal player is out of the temple or the round is over.
    pub done: bool,
    pub event: RoundEvent,
}

/// One-round episode seen from `PlayerId::FOCAL`.
///
/// Every `reset` draws a fresh artifact schedule and deck; the other seats
/// are played by `opponent`.
pub struct TempleEnv {
    config: TempleConfig,
    opponent: Box<dyn PlayerPolicy>,
    rng: TempleRng,
    builder: DeckBuilder,
    round: RoundState,
    done: bool,
}

impl TempleEnv {
    /// Validate `config` and start at round 1.
    pub fn new(
        config: TempleConfig,
        opponent: Box<dyn PlayerPolicy>,
        seed: u64,
    ) -> EngineResult<Self> {
        let mut rng = TempleRng::new(seed);
        let builder = DeckBuilder::for_game(&config, &mut rng)?;
        let round = RoundState::deal(&builder, 1, config.player_count, &[], &mut rng);

        Ok(Self {
            config,
            opponent,
            rng,
            builder,
            round,
            done: false,
        })
    }

    /// Start a new episode at `round_number` (round 1 by default).
    pub fn reset(&mut self, round_number: Option<u32>) -> Observation {
        let round_number = round_number.unwrap_or(1);
        let schedule = ArtifactSchedule::shuffled(&self.config.artifact_values, &mut self.rng);
        self.builder = DeckBuilder::new(&self.config, schedule);
        self.round = RoundState::deal(
            &self.builder,
            round_number,
            self.config.player_count,
            &[],
            &mut self.rng,
        );
        self.done = false;
        self.observe(PlayerId::FOCAL)
    }

    /// Play one cycle with `action` as the focal player's decision.
    pub fn step(&mut self, action: Decision) -> EngineResult<Transition> {
        if self.done {
            return Err(EngineError::InvalidState("episode is over; call reset"));
        }

        let mut decisions: SmallVec<[(PlayerId, Decision); 8]> = SmallVec::new();
        for &player in self.round.active() {
            let decision = if player == PlayerId::FOCAL {
                action
            } else {
                let observation = Observation::of(&self.round, player);
                self.opponent.decide(&observation, &mut self.rng)
            };
            decisions.push((player, decision));
        }

        let event = self.round.resolve(&decisions)?;

        let focal = PlayerId::FOCAL;
        // A focal payout can only be set by the step that ends the episode.
        let reward = self.round.payout(focal).unwrap_or(0);
        self.done = !self.round.is_active(focal) || event.is_terminal();
        if self.done {
            debug!(reward, status = ?event.status, "episode finished");
        }

        Ok(Transition {
            observation: self.observe(focal),
            reward,
            done: self.done,
            event,
        })
    }

    /// Observation for any seat.
    #[must_use]
    pub fn observe(&self, player: PlayerId) -> Observation {
        Observation::of(&self.round, player)
    }

    #[must_use]
    pub fn round(&self) -> &RoundState {
        &self.round
    }

    #[must_use]
    pub fn config(&self) -> &TempleConfig {
        &self.config
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.done
    }
}

impl std::fmt::Debug for TempleEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TempleEnv")
            .field("round", &self.round.round_number())
            .field("active", &self.round.active())
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}
