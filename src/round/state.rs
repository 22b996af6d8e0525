//! Round state for the multi-player game.
//!
//! A `RoundState` is created fresh for every round and mutated only by
//! `RoundState::resolve`. It owns its deck, so concurrent rounds never share
//! anything.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Deck, DeckBuilder, Hazard, HazardCounts};
use crate::core::{EngineResult, PlayerId, PlayerMap, TempleRng};

/// A player's choice before each reveal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    Stay,
    Leave,
}

impl Decision {
    /// Decode a discrete action index: 0 = stay, 1 = leave.
    #[must_use]
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Decision::Stay),
            1 => Some(Decision::Leave),
            _ => None,
        }
    }

    #[must_use]
    pub fn index(self) -> u8 {
        match self {
            Decision::Stay => 0,
            Decision::Leave => 1,
        }
    }
}

/// Where a round stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundStatus {
    InProgress,
    /// Every explorer walked out.
    AllLeft,
    /// A hazard label appeared twice; everyone still inside lost their gems.
    HazardRepeat(Hazard),
    /// The deck ran out; everyone still inside walked out with their pocket.
    DeckExhausted,
}

impl RoundStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self != RoundStatus::InProgress
    }
}

/// What happened to a player this round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerFate {
    #[default]
    Exploring,
    /// Walked out safely with `payout` gems.
    Left { payout: u32 },
    /// Still inside on a hazard repeat; `lost` gems were forfeited.
    Caught { lost: u32 },
}

impl PlayerFate {
    #[must_use]
    pub fn payout(self) -> Option<u32> {
        match self {
            PlayerFate::Left { payout } => Some(payout),
            _ => None,
        }
    }
}

/// Shared state of one round of the multi-player game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    pub(super) round_number: u32,
    pub(super) active: Vec<PlayerId>,
    pub(super) pockets: PlayerMap<u32>,
    pub(super) fates: PlayerMap<PlayerFate>,
    pub(super) path_remainders: Vector<u32>,
    pub(super) path_artifacts: u32,
    pub(super) artifact_value: Option<u32>,
    pub(super) hazard_counts: HazardCounts,
    pub(super) deck: Deck,
    pub(super) status: RoundStatus,
    pub(super) treasure_revealed: u32,
    pub(super) artifact_bonus_paid: u32,
}

impl RoundState {
    /// A round with every player inside and empty pockets.
    ///
    /// `artifact_value` is what each claimed artifact pays this round.
    ///
    /// # Panics
    ///
    /// Panics if `player_count` is 0 or greater than `MAX_PLAYERS`. Use
    /// `TempleConfig::validate` (or `Expedition`/`TempleEnv`, which call it)
    /// to check a table size first.
    pub fn new(
        round_number: u32,
        player_count: usize,
        deck: Deck,
        artifact_value: Option<u32>,
    ) -> Self {
        Self {
            round_number,
            active: PlayerId::all(player_count).collect(),
            pockets: PlayerMap::with_value(player_count, 0),
            fates: PlayerMap::with_default(player_count),
            path_remainders: Vector::new(),
            path_artifacts: 0,
            artifact_value,
            hazard_counts: HazardCounts::new(),
            deck,
            status: RoundStatus::InProgress,
            treasure_revealed: 0,
            artifact_bonus_paid: 0,
        }
    }

    /// Deal a fresh round from `builder`, minus previously removed hazards.
    pub fn deal(
        builder: &DeckBuilder,
        round_number: u32,
        player_count: usize,
        removed: &[Hazard],
        rng: &mut TempleRng,
    ) -> Self {
        let deck = builder.build_without(round_number, removed, rng);
        Self::new(round_number, player_count, deck, builder.artifact_value(round_number))
    }

    /// Start every player with the given pocket totals.
    #[must_use]
    pub fn with_pockets(mut self, pockets: PlayerMap<u32>) -> Self {
        assert_eq!(
            pockets.player_count(),
            self.pockets.player_count(),
            "pocket map must cover every player"
        );
        self.pockets = pockets;
        self
    }

    #[must_use]
    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.pockets.player_count()
    }

    /// Players still in the temple, in seat order.
    #[must_use]
    pub fn active(&self) -> &[PlayerId] {
        &self.active
    }

    #[must_use]
    pub fn is_active(&self, player: PlayerId) -> bool {
        self.active.contains(&player)
    }

    #[must_use]
    pub fn pocket(&self, player: PlayerId) -> u32 {
        self.pockets[player]
    }

    #[must_use]
    pub fn fate(&self, player: PlayerId) -> PlayerFate {
        self.fates[player]
    }

    #[must_use]
    pub fn fates(&self) -> &PlayerMap<PlayerFate> {
        &self.fates
    }

    /// Amount a player walked out with, if they left safely.
    #[must_use]
    pub fn payout(&self, player: PlayerId) -> Option<u32> {
        self.fates[player].payout()
    }

    /// Indivisible treasure remainders still on the path, in reveal order.
    #[must_use]
    pub fn path_remainders(&self) -> &Vector<u32> {
        &self.path_remainders
    }

    /// Total unclaimed gems on the path.
    #[must_use]
    pub fn path_gems(&self) -> u32 {
        self.path_remainders.iter().sum()
    }

    #[must_use]
    pub fn path_artifacts(&self) -> u32 {
        self.path_artifacts
    }

    #[must_use]
    pub fn artifact_value(&self) -> Option<u32> {
        self.artifact_value
    }

    #[must_use]
    pub fn hazard_counts(&self) -> &HazardCounts {
        &self.hazard_counts
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn status(&self) -> RoundStatus {
        self.status
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Face value of all treasure revealed this round.
    #[must_use]
    pub fn treasure_revealed(&self) -> u32 {
        self.treasure_revealed
    }

    /// Artifact bonuses paid to lone leavers this round.
    #[must_use]
    pub fn artifact_bonus_paid(&self) -> u32 {
        self.artifact_bonus_paid
    }

    /// Sum of every safe payout so far.
    #[must_use]
    pub fn total_payouts(&self) -> u32 {
        self.fates.values().filter_map(|f| f.payout()).sum()
    }

    /// Encode a compact binary snapshot of this round.
    pub fn snapshot(&self) -> EngineResult<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Restore a round from `snapshot` bytes.
    pub fn restore(bytes: &[u8]) -> EngineResult<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{ArtifactSchedule, Card};
    use crate::core::TempleConfig;

    #[test]
    fn test_new_round() {
        let deck = Deck::from_cards([Card::Treasure(4)]);
        let state = RoundState::new(2, 4, deck, Some(8));

        assert_eq!(state.round_number(), 2);
        assert_eq!(state.active().len(), 4);
        assert!(state.is_active(PlayerId::new(3)));
        assert_eq!(state.pocket(PlayerId::new(1)), 0);
        assert_eq!(state.fate(PlayerId::new(1)), PlayerFate::Exploring);
        assert_eq!(state.path_gems(), 0);
        assert_eq!(state.artifact_value(), Some(8));
        assert_eq!(state.status(), RoundStatus::InProgress);
    }

    #[test]
    fn test_deal_uses_schedule() {
        let config = TempleConfig::default();
        let builder = DeckBuilder::new(&config, ArtifactSchedule::new(vec![12, 10, 8, 7, 5]));
        let mut rng = TempleRng::new(5);

        let state = RoundState::deal(&builder, 2, 4, &[Hazard::Snake], &mut rng);
        assert_eq!(state.artifact_value(), Some(10));
        assert_eq!(state.deck().total(), 15 + 14 + 1);
    }

    #[test]
    fn test_carried_pockets() {
        let deck = Deck::from_cards(Vec::new());
        let pockets = PlayerMap::new(2, |p| p.index() as u32 * 3);
        let state = RoundState::new(1, 2, deck, None).with_pockets(pockets);
        assert_eq!(state.pocket(PlayerId::new(1)), 3);
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 player")]
    fn test_empty_table_panics() {
        let _ = RoundState::new(1, 0, Deck::from_cards(Vec::new()), None);
    }

    #[test]
    #[should_panic(expected = "At most 8 players supported")]
    fn test_oversized_table_panics() {
        let _ = RoundState::new(1, 9, Deck::from_cards(Vec::new()), None);
    }

    #[test]
    fn test_decision_index() {
        assert_eq!(Decision::from_index(0), Some(Decision::Stay));
        assert_eq!(Decision::from_index(1), Some(Decision::Leave));
        assert_eq!(Decision::from_index(2), None);
        assert_eq!(Decision::Leave.index(), 1);
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let deck = Deck::from_cards([Card::Treasure(4), Card::Hazard(Hazard::Fire)]);
        let state = RoundState::new(3, 3, deck, Some(7));

        let bytes = state.snapshot().unwrap();
        let restored = RoundState::restore(&bytes).unwrap();
        assert_eq!(state, restored);

        assert!(RoundState::restore(&bytes[..3]).is_err());
    }
}
