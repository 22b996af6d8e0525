//! Expedition game loop.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::agents::{Observation, PlayerPolicy};
use crate::cards::{Deck, DeckBuilder, Hazard};
use crate::core::{
    ConfigError, EngineError, EngineResult, PlayerId, PlayerMap, TempleConfig, TempleRng,
    MAX_PLAYERS,
};
use crate::round::{Decision, PlayerFate, RoundState, RoundStatus};

/// Result of a finished expedition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single richest player.
    Winner(PlayerId),
    /// Several players share the richest chest.
    Tied(Vec<PlayerId>),
}

impl GameResult {
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Tied(ps) => ps.contains(&player),
        }
    }
}

/// How one round of an expedition went.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round_number: u32,
    pub fates: PlayerMap<PlayerFate>,
    pub status: RoundStatus,
    /// Cards revealed before the round ended.
    pub cards_revealed: usize,
}

/// A multi-round game between 2 or more players.
#[derive(Clone, Debug)]
pub struct Expedition {
    config: TempleConfig,
    rng: TempleRng,
    builder: DeckBuilder,
    removed_hazards: Vec<Hazard>,
    chests: PlayerMap<u32>,
    next_round: u32,
    history: Vec<RoundSummary>,
    /// Deck of the round handed out by `deal_round`, until it is banked.
    dealt: Option<Deck>,
}

impl Expedition {
    /// Validate `config` and shuffle this game's artifact schedule.
    pub fn new(config: TempleConfig, seed: u64) -> EngineResult<Self> {
        if config.player_count < 2 {
            return Err(ConfigError::PlayerCount {
                count: config.player_count,
                min: 2,
                max: MAX_PLAYERS,
            }
            .into());
        }

        let mut rng = TempleRng::new(seed);
        let builder = DeckBuilder::for_game(&config, &mut rng)?;
        let chests = PlayerMap::with_value(config.player_count, 0);

        Ok(Self {
            config,
            rng,
            builder,
            removed_hazards: Vec::new(),
            chests,
            next_round: 1,
            history: Vec::new(),
            dealt: None,
        })
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.config.player_count
    }

    /// The round `play_round` will play next.
    #[must_use]
    pub fn next_round(&self) -> u32 {
        self.next_round
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.next_round > self.config.rounds
    }

    /// Gems banked by `player` so far.
    #[must_use]
    pub fn chest(&self, player: PlayerId) -> u32 {
        self.chests[player]
    }

    #[must_use]
    pub fn chests(&self) -> &PlayerMap<u32> {
        &self.chests
    }

    /// Hazard cards taken out of later decks, in removal order.
    #[must_use]
    pub fn removed_hazards(&self) -> &[Hazard] {
        &self.removed_hazards
    }

    #[must_use]
    pub fn history(&self) -> &[RoundSummary] {
        &self.history
    }

    #[must_use]
    pub fn builder(&self) -> &DeckBuilder {
        &self.builder
    }

    /// Deal the next round without playing it.
    ///
    /// Callers driving decisions themselves resolve the returned state and
    /// hand it back through `finish_round`. Dealing again before banking
    /// replaces the outstanding round.
    pub fn deal_round(&mut self) -> EngineResult<RoundState> {
        if self.is_finished() {
            return Err(EngineError::InvalidState("expedition is over"));
        }
        let round = RoundState::deal(
            &self.builder,
            self.next_round,
            self.config.player_count,
            &self.removed_hazards,
            &mut self.rng,
        );
        self.dealt = Some(round.deck().clone());
        Ok(round)
    }

    /// Bank a terminal round dealt by `deal_round`.
    ///
    /// Fails with `InvalidState` for a round still in progress, or for any
    /// round other than the one most recently dealt.
    pub fn finish_round(&mut self, round: &RoundState) -> EngineResult<RoundSummary> {
        if !round.is_terminal() {
            return Err(EngineError::InvalidState("round is still in progress"));
        }
        let Some(dealt) = &self.dealt else {
            return Err(EngineError::InvalidState("no round has been dealt"));
        };
        if round.round_number() != self.next_round
            || round.player_count() != self.config.player_count
            || !dealt.cards().eq(round.deck().cards())
        {
            return Err(EngineError::InvalidState("round does not belong to this expedition"));
        }

        for (player, fate) in round.fates().iter() {
            if let Some(payout) = fate.payout() {
                self.chests[player] += payout;
            }
        }
        if let RoundStatus::HazardRepeat(hazard) = round.status() {
            self.removed_hazards.push(hazard);
        }

        let summary = RoundSummary {
            round_number: round.round_number(),
            fates: round.fates().clone(),
            status: round.status(),
            cards_revealed: round.deck().revealed(),
        };
        debug!(round = summary.round_number, status = ?summary.status, "round banked");

        self.history.push(summary.clone());
        self.next_round += 1;
        self.dealt = None;
        Ok(summary)
    }

    /// Play the next round with one policy per seat.
    pub fn play_round(&mut self, policies: &[&dyn PlayerPolicy]) -> EngineResult<RoundSummary> {
        if policies.len() != self.config.player_count {
            return Err(EngineError::PolicyCount {
                expected: self.config.player_count,
                got: policies.len(),
            });
        }

        let mut round = self.deal_round()?;
        while !round.is_terminal() {
            let decisions: SmallVec<[(PlayerId, Decision); 8]> = round
                .active()
                .iter()
                .map(|&player| {
                    let observation = Observation::of(&round, player);
                    (player, policies[player.index()].decide(&observation, &mut self.rng))
                })
                .collect();
            round.resolve(&decisions)?;
        }

        self.finish_round(&round)
    }

    /// Play every remaining round and report the winner.
    pub fn play(&mut self, policies: &[&dyn PlayerPolicy]) -> EngineResult<GameResult> {
        while !self.is_finished() {
            self.play_round(policies)?;
        }
        let result = self.result();
        info!(?result, chests = ?self.chests, "expedition finished");
        Ok(result)
    }

    /// Standing by chest size; meaningful once the expedition is finished.
    #[must_use]
    pub fn result(&self) -> GameResult {
        let best = self.chests.values().copied().max().unwrap_or(0);
        let mut leaders: Vec<PlayerId> = self
            .chests
            .iter()
            .filter(|(_, &gems)| gems == best)
            .map(|(player, _)| player)
            .collect();

        if leaders.len() == 1 {
            GameResult::Winner(leaders.remove(0))
        } else {
            GameResult::Tied(leaders)
        }
    }
}
