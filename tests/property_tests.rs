//! Property-based tests for round and path invariants.

use proptest::prelude::*;
use temple_engine::core::config::DEFAULT_TREASURE_VALUES;
use temple_engine::{
    run_to_termination, ArtifactSchedule, Card, Deck, DeckBuilder, Decision, Hazard, PathEnd,
    PlayerId, RoundState, TempleConfig, TempleRng,
};

fn arb_hazard() -> impl Strategy<Value = Hazard> {
    (0..Hazard::COUNT).prop_map(|i| Hazard::ALL[i])
}

fn arb_card() -> impl Strategy<Value = Card> {
    prop_oneof![
        4 => (1..20u32).prop_map(Card::Treasure),
        3 => arb_hazard().prop_map(Card::Hazard),
        1 => (5..13u32).prop_map(Card::Artifact),
    ]
}

/// Total order over cards for multiset comparison.
fn card_key(card: Card) -> (u8, u32) {
    match card {
        Card::Treasure(value) => (0, value),
        Card::Hazard(hazard) => (1, hazard.index() as u32),
        Card::Artifact(value) => (2, value),
    }
}

/// Index of the first card whose hazard label was already seen.
fn first_repeat(cards: &[Card]) -> Option<usize> {
    let mut seen = Vec::new();
    for (i, card) in cards.iter().enumerate() {
        if let Some(hazard) = card.hazard() {
            if seen.contains(&hazard) {
                return Some(i);
            }
            seen.push(hazard);
        }
    }
    None
}

/// Random decisions for everyone inside; `leave_chance` per player.
fn random_decisions(
    state: &RoundState,
    rng: &mut TempleRng,
    leave_chance: f64,
) -> Vec<(PlayerId, Decision)> {
    state
        .active()
        .iter()
        .map(|&p| {
            let decision = if rng.gen_bool(leave_chance) {
                Decision::Leave
            } else {
                Decision::Stay
            };
            (p, decision)
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// A built deck holds exactly the configured multiset: every treasure
    /// value once, three of each hazard minus removals, and the round's
    /// artifact while the schedule lasts.
    #[test]
    fn prop_deck_composition(
        seed in any::<u64>(),
        round in 1..8u32,
        removed in prop::collection::vec(arb_hazard(), 0..6),
    ) {
        let mut rng = TempleRng::new(seed);
        let builder = DeckBuilder::for_game(&TempleConfig::default(), &mut rng).unwrap();
        let deck = builder.build_without(round, &removed, &mut rng);
        prop_assert_eq!(deck.remaining(), deck.total());

        let mut dealt: Vec<Card> = deck.cards().copied().collect();
        let mut expected = builder.composition(round, &removed);
        dealt.sort_unstable_by_key(|&c| card_key(c));
        expected.sort_unstable_by_key(|&c| card_key(c));
        prop_assert_eq!(&dealt, &expected);

        let mut treasures: Vec<u32> = dealt.iter().filter_map(|c| c.treasure_value()).collect();
        treasures.sort_unstable();
        prop_assert_eq!(treasures, DEFAULT_TREASURE_VALUES.to_vec());

        for hazard in Hazard::ALL {
            let copies = dealt.iter().filter(|c| c.hazard() == Some(hazard)).count();
            let dropped = removed.iter().filter(|&&r| r == hazard).count();
            prop_assert_eq!(copies, 3usize.saturating_sub(dropped));
        }

        let artifacts: Vec<Card> = dealt.iter().copied().filter(|c| c.is_artifact()).collect();
        match builder.artifact_value(round) {
            Some(value) => {
                prop_assert_eq!(artifacts, vec![Card::Artifact(value)]);
            }
            None => {
                prop_assert!(artifacts.is_empty());
            }
        }
        prop_assert_eq!(builder.artifact_value(round).is_some(), round <= 5);
    }

    /// An always-continue walk stops exactly on the first repeated hazard.
    #[test]
    fn prop_walk_stops_on_first_repeat(cards in prop::collection::vec(arb_card(), 0..40)) {
        let outcome = run_to_termination(Deck::from_cards(cards.clone()));

        match first_repeat(&cards) {
            Some(i) => {
                prop_assert_eq!(outcome.cards_revealed as usize, i + 1);
                prop_assert_eq!(outcome.end, PathEnd::Bust(cards[i].hazard().unwrap()));
                prop_assert_eq!(outcome.banked(), 0);
            }
            None => {
                prop_assert_eq!(outcome.cards_revealed as usize, cards.len());
                prop_assert_eq!(outcome.end, PathEnd::Exhausted);
                prop_assert_eq!(outcome.banked(), outcome.gems_held);
            }
        }
    }

    /// Every gem revealed or paid as a bonus is either in a pocket or on
    /// the path; the deck and the set of explorers only ever shrink.
    #[test]
    fn prop_round_conserves_gems(
        seed in any::<u64>(),
        players in 2..7usize,
        leave_chance in 0.0..0.5f64,
    ) {
        let mut rng = TempleRng::new(seed);
        let schedule = ArtifactSchedule::new(vec![9]);
        let builder = DeckBuilder::new(&TempleConfig::default(), schedule);
        let mut state = RoundState::deal(&builder, 1, players, &[], &mut rng);

        while !state.is_terminal() {
            let remaining = state.deck().remaining();
            let inside = state.active().len();

            let decisions = random_decisions(&state, &mut rng, leave_chance);
            let event = state.resolve(&decisions).unwrap();

            let pockets: u32 = PlayerId::all(players).map(|p| state.pocket(p)).sum();
            prop_assert_eq!(
                pockets + state.path_gems(),
                state.treasure_revealed() + state.artifact_bonus_paid()
            );
            prop_assert!(state.active().len() <= inside);
            let revealed = usize::from(event.revealed.is_some());
            prop_assert_eq!(state.deck().remaining(), remaining - revealed);
        }
        prop_assert!(state.active().is_empty());
    }

    /// Simultaneous leavers never take artifacts off the path.
    #[test]
    fn prop_tied_leavers_forfeit_artifacts(artifacts in 1..4usize, leavers in 2..5usize) {
        let mut cards: Vec<Card> = std::iter::repeat(Card::Artifact(7)).take(artifacts).collect();
        cards.push(Card::Treasure(3));
        let players = leavers + 1;
        let mut state = RoundState::new(1, players, Deck::from_cards(cards), Some(7));

        for _ in 0..artifacts {
            let stay: Vec<_> = state.active().iter().map(|&p| (p, Decision::Stay)).collect();
            state.resolve(&stay).unwrap();
        }

        let decisions: Vec<_> = state
            .active()
            .iter()
            .map(|&p| (p, if p.index() < leavers { Decision::Leave } else { Decision::Stay }))
            .collect();
        let event = state.resolve(&decisions).unwrap();

        prop_assert_eq!(event.leave.unwrap().artifact_bonus, 0);
        prop_assert_eq!(state.path_artifacts(), artifacts as u32);
        prop_assert_eq!(state.artifact_bonus_paid(), 0);
    }
}
