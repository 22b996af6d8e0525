//! Deck construction and consumption.
//!
//! A `Deck` is an immutable shuffled sequence plus a cursor. Revealing a card
//! advances the cursor; the underlying cards are never mutated, so cloning a
//! deck for a snapshot is O(1) and two clones never share a cursor.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::card::{Card, Hazard};
use crate::core::{EngineResult, TempleConfig, TempleRng};

/// Cards for one round, revealed front to back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vector<Card>,
    cursor: usize,
}

impl Deck {
    /// A deck that reveals `cards` in the given order.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
            cursor: 0,
        }
    }

    /// Shuffle `cards` uniformly and wrap them as a deck.
    pub fn shuffled(mut cards: Vec<Card>, rng: &mut TempleRng) -> Self {
        rng.shuffle(&mut cards);
        Self::from_cards(cards)
    }

    /// Reveal the next card. `None` once the deck is exhausted.
    pub fn pop(&mut self) -> Option<Card> {
        let card = self.cards.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(card)
    }

    /// Next card without revealing it.
    #[must_use]
    pub fn peek(&self) -> Option<Card> {
        self.cards.get(self.cursor).copied()
    }

    /// Cards not yet revealed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.cursor
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Cards revealed so far.
    #[must_use]
    pub fn revealed(&self) -> usize {
        self.cursor
    }

    /// Size of the deck when it was built.
    #[must_use]
    pub fn total(&self) -> usize {
        self.cards.len()
    }

    /// Every card, revealed or not, in deck order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Unrevealed cards in reveal order.
    pub fn upcoming(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().skip(self.cursor)
    }
}

/// Per-game artifact values, indexed by round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactSchedule {
    values: Vec<u32>,
}

impl ArtifactSchedule {
    /// Round `n` gets `values[n - 1]`.
    pub fn new(values: Vec<u32>) -> Self {
        Self { values }
    }

    /// A uniformly random permutation of `values`.
    pub fn shuffled(values: &[u32], rng: &mut TempleRng) -> Self {
        let mut values = values.to_vec();
        rng.shuffle(&mut values);
        Self { values }
    }

    /// Artifact value for a 1-based round, if the round has one.
    #[must_use]
    pub fn value_for_round(&self, round_number: u32) -> Option<u32> {
        let index = usize::try_from(round_number.checked_sub(1)?).ok()?;
        self.values.get(index).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn values(&self) -> &[u32] {
        &self.values
    }
}

/// Builds the card multiset for each round of a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckBuilder {
    treasures: Vec<u32>,
    hazard_copies: u8,
    schedule: ArtifactSchedule,
}

impl DeckBuilder {
    /// Builder with an explicit artifact schedule.
    ///
    /// Treasure values are cycled to `config.treasure_card_count` cards.
    /// The config is assumed valid; use `for_game` to validate it.
    pub fn new(config: &TempleConfig, schedule: ArtifactSchedule) -> Self {
        let treasures = config
            .treasure_values
            .iter()
            .copied()
            .cycle()
            .take(config.treasure_card_count)
            .collect();

        Self {
            treasures,
            hazard_copies: config.hazard_copies,
            schedule,
        }
    }

    /// Validate `config` and draw a fresh artifact schedule for a new game.
    pub fn for_game(config: &TempleConfig, rng: &mut TempleRng) -> EngineResult<Self> {
        config.validate()?;
        let schedule = ArtifactSchedule::shuffled(&config.artifact_values, rng);
        Ok(Self::new(config, schedule))
    }

    #[must_use]
    pub fn schedule(&self) -> &ArtifactSchedule {
        &self.schedule
    }

    /// Artifact value in play for a round.
    #[must_use]
    pub fn artifact_value(&self, round_number: u32) -> Option<u32> {
        self.schedule.value_for_round(round_number)
    }

    /// The unshuffled card multiset for a round.
    ///
    /// One copy of a hazard is dropped for each occurrence in `removed`.
    #[must_use]
    pub fn composition(&self, round_number: u32, removed: &[Hazard]) -> Vec<Card> {
        let mut cards: Vec<Card> = self.treasures.iter().map(|&v| Card::Treasure(v)).collect();

        for hazard in Hazard::ALL {
            let dropped = removed.iter().filter(|&&h| h == hazard).count();
            let copies = usize::from(self.hazard_copies).saturating_sub(dropped);
            cards.extend(std::iter::repeat(Card::Hazard(hazard)).take(copies));
        }

        if let Some(value) = self.artifact_value(round_number) {
            cards.push(Card::Artifact(value));
        }

        cards
    }

    /// Shuffled deck for a round with the full hazard set.
    pub fn build(&self, round_number: u32, rng: &mut TempleRng) -> Deck {
        self.build_without(round_number, &[], rng)
    }

    /// Shuffled deck for a round, minus hazards removed in earlier rounds.
    pub fn build_without(
        &self,
        round_number: u32,
        removed: &[Hazard],
        rng: &mut TempleRng,
    ) -> Deck {
        Deck::shuffled(self.composition(round_number, removed), rng)
    }
}
