//! Multi-round expedition tests.
//!
//! These tests verify banking across rounds, permanent hazard removal, and
//! that winners follow the chests for every supported table size.

use temple_engine::{
    AlwaysLeave, AlwaysStay, Card, Deck, Decision, EngineError, Expedition, GameResult, PlayerId,
    PlayerPolicy, RiskThreshold, RoundState, RoundStatus, TempleConfig,
};

/// Chests equal the sum of every safe payout in the history.
#[test]
fn test_chests_match_history() {
    let config = TempleConfig::default().with_player_count(4);
    let mut game = Expedition::new(config, 77).unwrap();
    let bot = RiskThreshold::default();
    let policies: [&dyn PlayerPolicy; 4] = [&bot, &bot, &bot, &AlwaysStay];

    let result = game.play(&policies).unwrap();
    assert!(game.is_finished());
    assert_eq!(game.history().len(), 5);

    for player in PlayerId::all(4) {
        let banked: u32 = game
            .history()
            .iter()
            .filter_map(|round| round.fates[player].payout())
            .sum();
        assert_eq!(game.chest(player), banked);
    }

    let best = game.chests().values().copied().max().unwrap();
    for player in PlayerId::all(4) {
        assert_eq!(result.is_winner(player), game.chest(player) == best);
    }
}

/// One hazard is removed per hazard-repeat round, in order.
#[test]
fn test_removed_hazards_follow_history() {
    let mut game = Expedition::new(TempleConfig::default().with_player_count(3), 12).unwrap();
    let policies: [&dyn PlayerPolicy; 3] = [&AlwaysStay, &AlwaysStay, &AlwaysStay];
    game.play(&policies).unwrap();

    let repeats: Vec<_> = game
        .history()
        .iter()
        .filter_map(|round| match round.status {
            RoundStatus::HazardRepeat(h) => Some(h),
            _ => None,
        })
        .collect();
    assert_eq!(game.removed_hazards(), repeats.as_slice());
    // Staying forever always ends on a repeat while two copies remain.
    assert_eq!(repeats.len(), 5);
}

/// An immediate leaver banks nothing; a lone stayer rides to the repeat.
#[test]
fn test_leaver_against_stayers() {
    let config = TempleConfig::default().with_player_count(2);
    let mut game = Expedition::new(config, 3).unwrap();
    let policies: [&dyn PlayerPolicy; 2] = [&AlwaysLeave, &AlwaysStay];

    let summary = game.play_round(&policies).unwrap();
    assert_eq!(summary.fates[PlayerId::new(0)].payout(), Some(0));
    assert!(matches!(summary.status, RoundStatus::HazardRepeat(_)));
    assert_eq!(game.next_round(), 2);
}

/// Rounds can be driven by hand through deal and finish.
#[test]
fn test_manual_round() {
    let config = TempleConfig::default().with_player_count(2).with_rounds(2);
    let mut game = Expedition::new(config, 9).unwrap();

    let mut round = game.deal_round().unwrap();
    assert_eq!(round.round_number(), 1);
    round
        .resolve(&[(PlayerId::new(0), Decision::Stay), (PlayerId::new(1), Decision::Stay)])
        .unwrap();
    if !round.is_terminal() {
        let decisions: Vec<_> = round.active().iter().map(|&p| (p, Decision::Leave)).collect();
        round.resolve(&decisions).unwrap();
    }

    let summary = game.finish_round(&round).unwrap();
    assert_eq!(summary.round_number, 1);
    for player in PlayerId::all(2) {
        assert_eq!(game.chest(player), round.payout(player).unwrap_or(0));
    }
    assert_eq!(game.next_round(), 2);

    // A round from the wrong position is refused.
    assert!(game.finish_round(&round).is_err());
}

/// Every table size from 2 to 8 plays through.
#[test]
fn test_table_sizes() {
    let bot = RiskThreshold::default();
    for players in 2..=8 {
        let config = TempleConfig::default().with_player_count(players);
        let mut game = Expedition::new(config, players as u64).unwrap();
        let policies: Vec<&dyn PlayerPolicy> =
            (0..players).map(|_| &bot as &dyn PlayerPolicy).collect();

        match game.play(&policies).unwrap() {
            GameResult::Winner(p) => assert!(p.index() < players),
            GameResult::Tied(ps) => assert!(ps.len() >= 2),
        }
    }
}

/// Same seed, same game.
#[test]
fn test_expedition_is_deterministic() {
    let bot = RiskThreshold::default();
    let run = || {
        let mut game = Expedition::new(TempleConfig::default(), 2024).unwrap();
        let policies: [&dyn PlayerPolicy; 4] = [&bot, &bot, &bot, &bot];
        game.play(&policies).unwrap();
        game.history().to_vec()
    };
    assert_eq!(run(), run());
}

/// Rounds that were not dealt by the expedition are refused, whatever their size.
#[test]
fn test_foreign_rounds_are_refused() {
    let config = TempleConfig::default().with_player_count(2);
    let mut game = Expedition::new(config, 31).unwrap();
    let _dealt = game.deal_round().unwrap();

    let refused = EngineError::InvalidState("round does not belong to this expedition");
    for seats in [4, 2] {
        let mut foreign = RoundState::new(1, seats, Deck::from_cards([Card::Treasure(40)]), None);
        while !foreign.is_terminal() {
            let stay: Vec<_> = foreign.active().iter().map(|&p| (p, Decision::Stay)).collect();
            foreign.resolve(&stay).unwrap();
        }
        assert_eq!(foreign.status(), RoundStatus::DeckExhausted);
        assert_eq!(game.finish_round(&foreign).unwrap_err(), refused);
    }

    assert!(game.chests().values().all(|&gems| gems == 0));
    assert_eq!(game.next_round(), 1);
}
