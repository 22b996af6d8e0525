//! Sequential reveal with immediate accumulation.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::cards::{Card, Deck, Hazard};
use crate::core::{EngineError, EngineResult};

/// Choice offered before each reveal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathAction {
    Continue,
    Retreat,
}

/// Why a walk ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathEnd {
    /// The explorer chose to leave.
    Retreated,
    /// No cards left; a safe exit.
    Exhausted,
    /// A hazard label appeared for the second time.
    Bust(Hazard),
}

/// Result of a single `step`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStep {
    /// Card revealed by this step, if any.
    pub card: Option<Card>,
    /// Gems banked by this step. Non-zero only on a safe exit.
    pub reward: u32,
    pub done: bool,
}

/// Final tally of a finished walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathOutcome {
    pub cards_revealed: u32,
    /// Gems held when the walk ended, banked or not.
    pub gems_held: u32,
    pub end: PathEnd,
}

impl PathOutcome {
    /// Gems taken home: everything on a safe exit, nothing on a bust.
    #[must_use]
    pub fn banked(&self) -> u32 {
        match self.end {
            PathEnd::Bust(_) => 0,
            PathEnd::Retreated | PathEnd::Exhausted => self.gems_held,
        }
    }

    /// Gems forfeited to a hazard repeat.
    #[must_use]
    pub fn gems_lost(&self) -> u32 {
        self.gems_held - self.banked()
    }
}

/// Single explorer state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PathState {
    deck: Deck,
    cards_revealed: u32,
    hazards_seen: FxHashSet<Hazard>,
    gems_held: u32,
    end: Option<PathEnd>,
}

impl PathState {
    pub fn new(deck: Deck) -> Self {
        Self {
            deck,
            cards_revealed: 0,
            hazards_seen: FxHashSet::default(),
            gems_held: 0,
            end: None,
        }
    }

    #[must_use]
    pub fn cards_revealed(&self) -> u32 {
        self.cards_revealed
    }

    #[must_use]
    pub fn gems_held(&self) -> u32 {
        self.gems_held
    }

    #[must_use]
    pub fn has_seen(&self, hazard: Hazard) -> bool {
        self.hazards_seen.contains(&hazard)
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.end.is_some()
    }

    /// The finished walk, once terminal.
    #[must_use]
    pub fn outcome(&self) -> Option<PathOutcome> {
        self.end.map(|end| PathOutcome {
            cards_revealed: self.cards_revealed,
            gems_held: self.gems_held,
            end,
        })
    }

    /// Apply one decision.
    ///
    /// A bust pays nothing: the reward is 0 rather than a negative of the
    /// gems held. `PathOutcome::gems_lost` reports what was forfeited.
    pub fn step(&mut self, action: PathAction) -> EngineResult<PathStep> {
        if self.end.is_some() {
            return Err(EngineError::InvalidState("path walk already finished"));
        }

        if action == PathAction::Retreat {
            return Ok(self.finish(PathEnd::Retreated, None));
        }

        let Some(card) = self.deck.pop() else {
            return Ok(self.finish(PathEnd::Exhausted, None));
        };
        self.cards_revealed += 1;
        trace!(%card, revealed = self.cards_revealed, "path reveal");

        match card {
            Card::Treasure(value) | Card::Artifact(value) => self.gems_held += value,
            Card::Hazard(hazard) => {
                if !self.hazards_seen.insert(hazard) {
                    return Ok(self.finish(PathEnd::Bust(hazard), Some(card)));
                }
            }
        }

        Ok(PathStep {
            card: Some(card),
            reward: 0,
            done: false,
        })
    }

    fn finish(&mut self, end: PathEnd, card: Option<Card>) -> PathStep {
        self.end = Some(end);
        let reward = match end {
            PathEnd::Bust(_) => 0,
            PathEnd::Retreated | PathEnd::Exhausted => self.gems_held,
        };
        debug!(?end, cards = self.cards_revealed, gems = self.gems_held, "path finished");

        PathStep {
            card,
            reward,
            done: true,
        }
    }
}

/// Always continue until the walk ends.
pub fn run_to_termination(deck: Deck) -> PathOutcome {
    let mut state = PathState::new(deck);
    while !state.is_done() {
        // Continue is always accepted on a live walk.
        if state.step(PathAction::Continue).is_err() {
            break;
        }
    }

    PathOutcome {
        cards_revealed: state.cards_revealed,
        gems_held: state.gems_held,
        end: state.end.unwrap_or(PathEnd::Exhausted),
    }
}
