//! One decision cycle of a multi-player round.
//!
//! `resolve` runs Deciding -> Resolving -> (Revealing | Terminal) as a
//! single transition:
//!
//! 1. Validate one decision per player still inside.
//! 2. Split the path among the leavers. Each remainder entry gives every
//!    leaver `entry / leavers` and keeps `entry % leavers` on the path. A
//!    lone leaver also claims every artifact on the path; simultaneous
//!    leavers leave them where they are.
//! 3. End the round if nobody is left, or if the deck is empty (everyone
//!    inside walks out with their pocket).
//! 4. Reveal one card. Treasure is split evenly among those inside with the
//!    remainder left on the path; a second copy of any hazard ends the round
//!    for everyone inside.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, trace};

use super::state::{Decision, PlayerFate, RoundState, RoundStatus};
use crate::cards::Card;
use crate::core::{EngineError, EngineResult, PlayerId, PlayerMap};

/// Players who walked out together in one cycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveResolution {
    /// Leavers in seat order.
    pub leavers: SmallVec<[PlayerId; 4]>,
    /// Path gems each leaver collected.
    pub share_per_leaver: u32,
    /// Artifact bonus collected; non-zero only for a lone leaver.
    pub artifact_bonus: u32,
}

/// Everything one `resolve` call did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundEvent {
    pub leave: Option<LeaveResolution>,
    /// The card revealed this cycle, if the round got that far.
    pub revealed: Option<Card>,
    pub status: RoundStatus,
}

impl RoundEvent {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Whether `player` walked out during the leave phase of this cycle.
    #[must_use]
    pub fn left(&self, player: PlayerId) -> bool {
        self.leave
            .as_ref()
            .is_some_and(|l| l.leavers.contains(&player))
    }
}

impl RoundState {
    /// Apply one decision from every player still in the temple.
    ///
    /// Fails with `InvalidInput` if a decision names a player who is not
    /// inside, names a player twice, or if an active player has no
    /// decision. Fails with `InvalidState` once the round is over. The state
    /// is untouched on error.
    pub fn resolve(&mut self, decisions: &[(PlayerId, Decision)]) -> EngineResult<RoundEvent> {
        if self.status.is_terminal() {
            return Err(EngineError::InvalidState("round is already over"));
        }

        let leavers = self.collect_leavers(decisions)?;
        let leave = (!leavers.is_empty()).then(|| self.resolve_leavers(leavers));

        if self.active.is_empty() {
            self.status = RoundStatus::AllLeft;
            debug!(round = self.round_number, "everyone left the temple");
            return Ok(self.event(leave, None));
        }

        let Some(card) = self.deck.pop() else {
            self.exhaust();
            return Ok(self.event(leave, None));
        };
        self.reveal(card);

        Ok(self.event(leave, Some(card)))
    }

    fn collect_leavers(
        &self,
        decisions: &[(PlayerId, Decision)],
    ) -> EngineResult<SmallVec<[PlayerId; 4]>> {
        let mut decided: PlayerMap<bool> = PlayerMap::with_value(self.player_count(), false);
        let mut leavers = SmallVec::new();

        for &(player, decision) in decisions {
            if !self.is_active(player) {
                return Err(EngineError::InvalidInput {
                    player,
                    reason: "player is not in the temple",
                });
            }
            if decided[player] {
                return Err(EngineError::InvalidInput {
                    player,
                    reason: "duplicate decision",
                });
            }
            decided[player] = true;
            if decision == Decision::Leave {
                leavers.push(player);
            }
        }

        if let Some(&player) = self.active.iter().find(|&&p| !decided[p]) {
            return Err(EngineError::InvalidInput {
                player,
                reason: "missing decision",
            });
        }

        leavers.sort_unstable();
        Ok(leavers)
    }

    fn resolve_leavers(&mut self, leavers: SmallVec<[PlayerId; 4]>) -> LeaveResolution {
        let count = leavers.len() as u32;

        let mut share_per_leaver = 0;
        for entry in self.path_remainders.iter_mut() {
            share_per_leaver += *entry / count;
            *entry %= count;
        }

        // Ties forfeit the artifacts; they stay on the path.
        let artifact_bonus = if count == 1 && self.path_artifacts > 0 {
            let bonus = self.path_artifacts * self.artifact_value.unwrap_or(0);
            self.path_artifacts = 0;
            bonus
        } else {
            0
        };

        for &player in &leavers {
            let payout = self.pockets[player] + share_per_leaver + artifact_bonus;
            self.pockets[player] = payout;
            self.fates[player] = PlayerFate::Left { payout };
        }
        self.active.retain(|p| !leavers.contains(p));
        self.artifact_bonus_paid += artifact_bonus;

        debug!(
            round = self.round_number,
            leavers = ?leavers,
            share_per_leaver,
            artifact_bonus,
            "players left the temple"
        );

        LeaveResolution {
            leavers,
            share_per_leaver,
            artifact_bonus,
        }
    }

    fn exhaust(&mut self) {
        for &player in &self.active {
            self.fates[player] = PlayerFate::Left {
                payout: self.pockets[player],
            };
        }
        self.active.clear();
        self.status = RoundStatus::DeckExhausted;
        debug!(round = self.round_number, "deck exhausted");
    }

    fn reveal(&mut self, card: Card) {
        trace!(round = self.round_number, %card, remaining = self.deck.remaining(), "reveal");

        match card {
            Card::Treasure(value) => {
                debug_assert!(!self.active.is_empty(), "reveal with nobody inside");
                let inside = self.active.len() as u32;
                let share = value / inside;
                for &player in &self.active {
                    self.pockets[player] += share;
                }
                self.path_remainders.push_back(value % inside);
                self.treasure_revealed += value;
            }
            Card::Artifact(value) => {
                self.path_artifacts += 1;
                self.artifact_value.get_or_insert(value);
            }
            Card::Hazard(hazard) => {
                if self.hazard_counts.record(hazard) >= 2 {
                    for &player in &self.active {
                        self.fates[player] = PlayerFate::Caught {
                            lost: self.pockets[player],
                        };
                    }
                    debug!(
                        round = self.round_number,
                        %hazard,
                        caught = self.active.len(),
                        "hazard repeated"
                    );
                    self.active.clear();
                    self.status = RoundStatus::HazardRepeat(hazard);
                }
            }
        }
    }

    fn event(&self, leave: Option<LeaveResolution>, revealed: Option<Card>) -> RoundEvent {
        RoundEvent {
            leave,
            revealed,
            status: self.status,
        }
    }
}
