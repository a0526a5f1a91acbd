//! Блэкджек: подсчёт очков, фазы раунда, дабл, выплаты.

use casino_engine::config::EngineConfig;
use casino_engine::domain::{Card, Chips, Shoe};
use casino_engine::engine::blackjack::{
    classify_hand, hand_score, BlackjackHandKind, BlackjackResolution,
};
use casino_engine::engine::{BlackjackPhase, BlackjackRound, EngineError, InvalidBetReason};
use casino_engine::infra::SequenceRng;

fn cards(s: &str) -> Vec<Card> {
    s.split_whitespace().map(|c| c.parse().unwrap()).collect()
}

fn config() -> EngineConfig {
    EngineConfig {
        // Стопка карт без пересборки; validate() такой порог не пропускает.
        reshuffle_threshold: 0,
        ..EngineConfig::default()
    }
}

/// Раунд над шузом, где карты выходят ровно в указанном порядке (P, D, P, D, ...).
fn stacked_round(order: &str) -> BlackjackRound {
    BlackjackRound::new(Shoe::stacked(6, cards(order)))
}

fn rng() -> SequenceRng {
    SequenceRng::new(vec![0.5])
}

//
// TEST 1 — aces are reduced one at a time
//
#[test]
fn ace_ace_nine_is_21() {
    assert_eq!(hand_score(&cards("Ah Ad 9c")), 21);
    assert_eq!(hand_score(&cards("Ah Ad")), 12);
    assert_eq!(hand_score(&cards("Ah Ad Ac Ks")), 13);
    assert_eq!(classify_hand(&cards("As Kd")), BlackjackHandKind::Blackjack);
    assert_eq!(classify_hand(&cards("As 5d 5c")), BlackjackHandKind::Total(21));
}

//
// TEST 2 — K Q 5 is 15 and busts on anything above six
//
#[test]
fn king_queen_five_busts_on_seven_plus() {
    let base = cards("Kh Qd 5c");
    assert_eq!(hand_score(&base), 15);

    for extra in ["2s", "3s", "4s", "5s", "6s", "As"] {
        let mut hand = base.clone();
        hand.push(extra.parse().unwrap());
        assert!(hand_score(&hand) <= 21, "{extra} should not bust");
    }
    for extra in ["7s", "8s", "9s", "Ts", "Js", "Qs", "Ks"] {
        let mut hand = base.clone();
        hand.push(extra.parse().unwrap());
        assert_eq!(classify_hand(&hand), BlackjackHandKind::Bust, "{extra} should bust");
    }
}

//
// TEST 3 — player natural pays 2.5x at the deal
//
#[test]
fn player_natural_ends_round_at_deal() {
    let mut round = stacked_round("Ah 9c Kd 7s");
    round
        .deal(Chips::whole(10), Chips::whole(100), &mut rng(), &config())
        .unwrap();

    assert_eq!(round.phase(), BlackjackPhase::Finished);
    let result = round.settlement().unwrap();
    assert_eq!(result.outcome.resolution, BlackjackResolution::PlayerBlackjack);
    assert_eq!(result.total_returned, Chips::whole(25));

    // Дальше играть нельзя.
    assert!(matches!(round.hit(&mut rng()), Err(EngineError::InvalidAction(_))));
}

//
// TEST 4 — both naturals push, dealer natural loses
//
#[test]
fn naturals_on_both_sides() {
    let mut both = stacked_round("Ah As Kd Qs");
    both.deal(Chips::whole(10), Chips::whole(100), &mut rng(), &config())
        .unwrap();
    let r = both.settlement().unwrap();
    assert_eq!(r.outcome.resolution, BlackjackResolution::Push);
    assert_eq!(r.total_returned, Chips::whole(10));

    let mut dealer = stacked_round("9h As Kd Qs");
    dealer
        .deal(Chips::whole(10), Chips::whole(100), &mut rng(), &config())
        .unwrap();
    let r = dealer.settlement().unwrap();
    assert_eq!(r.outcome.resolution, BlackjackResolution::DealerWin);
    assert_eq!(r.total_returned, Chips::ZERO);
}

//
// TEST 5 — hit and bust: dealer does not draw
//
#[test]
fn hit_to_bust() {
    let mut round = stacked_round("Kh 9d 6c 8s Qh");
    round
        .deal(Chips::whole(10), Chips::whole(100), &mut rng(), &config())
        .unwrap();
    assert_eq!(round.phase(), BlackjackPhase::Playing);
    assert_eq!(round.player_score(), 16);

    round.hit(&mut rng()).unwrap();
    assert_eq!(round.phase(), BlackjackPhase::Finished);
    assert_eq!(round.dealer_hand().len(), 2);

    let r = round.settlement().unwrap();
    assert_eq!(r.outcome.resolution, BlackjackResolution::PlayerBust);
    assert_eq!(r.total_returned, Chips::ZERO);
}

//
// TEST 6 — stand: dealer draws below 17
//
#[test]
fn stand_dealer_draws_to_17() {
    // P: Th 8h (18). D: 6d 5c (11) -> +3s (14) -> +4d (18)
    let mut round = stacked_round("Th 6d 8h 5c 3s 4d");
    round
        .deal(Chips::whole(20), Chips::whole(100), &mut rng(), &config())
        .unwrap();
    round.stand(&mut rng()).unwrap();

    assert_eq!(round.dealer_score(), 18);
    assert_eq!(round.dealer_hand().len(), 4);
    let r = round.settlement().unwrap();
    assert_eq!(r.outcome.resolution, BlackjackResolution::Push);
    assert_eq!(r.total_returned, Chips::whole(20));
}

//
// TEST 7 — double: one card, doubled stake, forced stand
//
#[test]
fn double_down_wins_double() {
    // P: 5h 6c (11) -> +Th (21). D: 9d 7s (16) -> +2c (18).
    let mut round = stacked_round("5h 9d 6c 7s Th 2c");
    round
        .deal(Chips::whole(10), Chips::whole(100), &mut rng(), &config())
        .unwrap();
    round.double(Chips::whole(100), &mut rng()).unwrap();

    assert_eq!(round.player_hand().len(), 3);
    assert_eq!(round.stake(), Chips::whole(20));
    let r = round.settlement().unwrap();
    assert!(r.outcome.doubled);
    assert_eq!(r.outcome.resolution, BlackjackResolution::PlayerWin);
    assert_eq!(r.total_wagered, Chips::whole(20));
    assert_eq!(r.total_returned, Chips::whole(40));
}

//
// TEST 8 — double is only allowed as the first action and within balance
//
#[test]
fn double_restrictions() {
    let mut round = stacked_round("2h 9d 3c 7s 4h 5c 6d");
    round
        .deal(Chips::whole(10), Chips::whole(15), &mut rng(), &config())
        .unwrap();

    // 2 × 10 > 15
    let err = round.double(Chips::whole(15), &mut rng()).unwrap_err();
    assert_eq!(err, EngineError::InvalidBet(InvalidBetReason::InsufficientBalance));
    assert_eq!(round.stake(), Chips::whole(10));
    assert_eq!(round.player_hand().len(), 2);

    round.hit(&mut rng()).unwrap();
    assert_eq!(round.phase(), BlackjackPhase::Playing);
    let err = round.double(Chips::whole(100), &mut rng()).unwrap_err();
    assert!(matches!(err, EngineError::InvalidAction(_)));
}

//
// TEST 9 — hitting to exactly 21 stands automatically
//
#[test]
fn hit_to_21_auto_stands() {
    // P: 5h 6c (11) -> +Th (21). D: Td 7s (17) — не добирает.
    let mut round = stacked_round("5h Td 6c 7s Th");
    round
        .deal(Chips::whole(10), Chips::whole(100), &mut rng(), &config())
        .unwrap();
    round.hit(&mut rng()).unwrap();

    assert!(round.is_finished());
    let r = round.settlement().unwrap();
    assert_eq!(r.outcome.resolution, BlackjackResolution::PlayerWin);
    assert_eq!(r.total_returned, Chips::whole(20));
}

//
// TEST 10 — rejected deal leaves round and shoe untouched
//
#[test]
fn rejected_deal_changes_nothing() {
    let mut round = BlackjackRound::new(Shoe::build(6));
    let err = round
        .deal(Chips::whole(5), Chips::whole(100), &mut rng(), &config())
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::InvalidBet(InvalidBetReason::BelowMinimum { .. })
    ));
    assert_eq!(round.phase(), BlackjackPhase::Betting);
    assert!(round.history().is_empty());
    assert_eq!(round.into_shoe().len(), 52 * 6);
}

//
// TEST 11 — actions outside the playing phase
//
#[test]
fn actions_require_playing_phase() {
    let mut round = BlackjackRound::new(Shoe::build(6));
    assert!(matches!(round.stand(&mut rng()), Err(EngineError::InvalidAction(_))));
    assert!(matches!(round.hit(&mut rng()), Err(EngineError::InvalidAction(_))));
    assert!(round.settlement().is_none());
}

//
// TEST 12 — history records every card in order
//
#[test]
fn history_records_cards() {
    use casino_engine::engine::history::Seat;

    let mut round = stacked_round("Th 6d 8h 5c 3s 4d");
    round
        .deal(Chips::whole(20), Chips::whole(100), &mut rng(), &config())
        .unwrap();
    round.stand(&mut rng()).unwrap();

    let history = round.history();
    assert_eq!(history.cards_for(Seat::Player), cards("Th 8h"));
    assert_eq!(history.cards_for(Seat::Dealer), cards("6d 5c 3s 4d"));
}

//
// TEST 13 — a reshuffle in the middle of the round is recorded before the card it feeds
//
#[test]
fn mid_round_reshuffle_is_recorded() {
    use casino_engine::engine::history::RoundEventKind;

    let config = EngineConfig {
        reshuffle_threshold: 4,
        ..EngineConfig::default()
    };
    // Четыре карты: раздача проходит без пересборки, hit уже из нового шуза.
    let mut round = stacked_round("Th 6d 8h 5c");
    round
        .deal(Chips::whole(10), Chips::whole(100), &mut rng(), &config)
        .unwrap();
    assert!(!round
        .history()
        .events
        .iter()
        .any(|e| matches!(e.kind, RoundEventKind::ShoeReshuffled { .. })));

    round.hit(&mut rng()).unwrap();

    let kinds: Vec<&RoundEventKind> = round.history().events.iter().map(|e| &e.kind).collect();
    let reshuffles: Vec<usize> = kinds
        .iter()
        .enumerate()
        .filter(|(_, k)| matches!(k, RoundEventKind::ShoeReshuffled { .. }))
        .map(|(i, _)| i)
        .collect();
    assert_eq!(reshuffles.len(), 1);
    assert_eq!(kinds[reshuffles[0]], &RoundEventKind::ShoeReshuffled { decks: 6 });

    let dealt_before = kinds[..reshuffles[0]]
        .iter()
        .filter(|k| matches!(k, RoundEventKind::CardDealt { .. }))
        .count();
    assert_eq!(dealt_before, 4);
    assert!(matches!(kinds[reshuffles[0] + 1], RoundEventKind::CardDealt { .. }));
    assert_eq!(round.player_hand().len(), 3);
}
