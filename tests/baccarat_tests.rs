//! Баккара: подсчёт очков, таблица добора, выплаты.

use casino_engine::config::EngineConfig;
use casino_engine::domain::{Bet, Card, Chips, Shoe};
use casino_engine::engine::baccarat::{
    banker_draws, hand_score, play_out_baccarat, player_draws, BaccaratWinner,
};
use casino_engine::engine::{resolve_baccarat, settle_baccarat, BaccaratBet, BaccaratOutcome, EngineError};
use casino_engine::infra::SequenceRng;

fn cards(s: &str) -> Vec<Card> {
    s.split_whitespace().map(|c| c.parse().unwrap()).collect()
}

fn no_reshuffle() -> EngineConfig {
    EngineConfig {
        // Стопка карт без пересборки; validate() такой порог не пропускает.
        reshuffle_threshold: 0,
        ..EngineConfig::default()
    }
}

//
// TEST 1 — scores are sums mod 10, tens count zero
//
#[test]
fn hand_scores() {
    assert_eq!(hand_score(&cards("Kh Qd")), 0);
    assert_eq!(hand_score(&cards("Ah 7d")), 8);
    assert_eq!(hand_score(&cards("9h 9d")), 8);
    assert_eq!(hand_score(&cards("5h 5d Ts")), 0);
    assert_eq!(hand_score(&cards("Ac 2d 3s")), 6);
}

//
// TEST 2 — natural 8 beats natural 7? (7 is not a natural: 8 wins with no draws)
//
#[test]
fn natural_eight_beats_seven_without_third_cards() {
    // Порядок раздачи: P, B, P, B.
    let mut shoe = Shoe::stacked(8, cards("5h 4c 3d 3s 2c 2d"));
    let mut rng = SequenceRng::new(vec![0.0]);
    let outcome = play_out_baccarat(&mut shoe, &mut rng, 0).unwrap();

    assert_eq!(outcome.player_score, 8);
    assert_eq!(outcome.banker_score, 7);
    assert_eq!(outcome.player_hand.len(), 2);
    assert_eq!(outcome.banker_hand.len(), 2);
    assert_eq!(outcome.winner, BaccaratWinner::Player);
    // Лишние карты остались в шузе.
    assert_eq!(shoe.len(), 2);
}

//
// TEST 3 — drawing table
//
#[test]
fn drawing_rules() {
    for s in 0..=5 {
        assert!(player_draws(s));
    }
    assert!(!player_draws(6));
    assert!(!player_draws(7));

    // Игрок стоял: банкир добирает на 0..=5.
    assert!(banker_draws(5, None));
    assert!(!banker_draws(6, None));

    assert!(banker_draws(2, Some(8)));
    assert!(banker_draws(3, Some(9)));
    assert!(!banker_draws(3, Some(8)));
    assert!(banker_draws(4, Some(2)));
    assert!(!banker_draws(4, Some(1)));
    assert!(!banker_draws(4, Some(8)));
    assert!(banker_draws(5, Some(4)));
    assert!(!banker_draws(5, Some(3)));
    assert!(banker_draws(6, Some(6)));
    assert!(!banker_draws(6, Some(5)));
    assert!(!banker_draws(7, Some(6)));
}

//
// TEST 4 — full draw: player draws on 5, banker 4 draws on third card 7
//
#[test]
fn third_cards_follow_table() {
    // P: 2,3 (5) B: 4,Kd (4). P третья: 7 -> 2. B третья по таблице: 4 vs 7 -> добор, 9 -> 3.
    let mut shoe = Shoe::stacked(8, cards("2h 4c 3d Kd 7s 9h"));
    let mut rng = SequenceRng::new(vec![0.0]);
    let outcome = play_out_baccarat(&mut shoe, &mut rng, 0).unwrap();

    assert_eq!(outcome.player_hand.len(), 3);
    assert_eq!(outcome.banker_hand.len(), 3);
    assert_eq!(outcome.player_score, 2);
    assert_eq!(outcome.banker_score, 3);
    assert_eq!(outcome.winner, BaccaratWinner::Banker);
}

//
// TEST 5 — payouts: player 2x, banker minus 5% commission, tie 9x, tie pushes sides
//
#[test]
fn payouts_and_tie_push() {
    let bets = vec![
        Bet::new(BaccaratBet::Player, Chips::whole(100)),
        Bet::new(BaccaratBet::Banker, Chips::whole(100)),
        Bet::new(BaccaratBet::Tie, Chips::whole(10)),
    ];

    let banker_win = BaccaratOutcome::from_hands(cards("Kh 2d"), cards("Qh 7d"));
    let r = settle_baccarat(&bets, banker_win, 500);
    assert_eq!(r.settlements[0].payout, Chips::ZERO);
    assert_eq!(r.settlements[1].payout, Chips::whole(195));
    assert_eq!(r.settlements[2].payout, Chips::ZERO);

    let player_win = BaccaratOutcome::from_hands(cards("Kh 9d"), cards("Qh 7d"));
    let r = settle_baccarat(&bets, player_win, 500);
    assert_eq!(r.settlements[0].payout, Chips::whole(200));
    assert_eq!(r.settlements[1].payout, Chips::ZERO);

    let tie = BaccaratOutcome::from_hands(cards("Kh 6d"), cards("Qh 6c"));
    let r = settle_baccarat(&bets, tie, 500);
    assert!(r.settlements[0].is_push());
    assert!(r.settlements[1].is_push());
    assert_eq!(r.settlements[2].payout, Chips::whole(90));
    assert_eq!(r.total_returned, Chips::whole(290));
}

//
// TEST 6 — commission floors on odd minor units
//
#[test]
fn banker_commission_is_floored() {
    let bets = vec![Bet::new(BaccaratBet::Banker, Chips(1_001))];
    let banker_win = BaccaratOutcome::from_hands(cards("Kh 2d"), cards("Qh 7d"));
    let r = settle_baccarat(&bets, banker_win, 500);
    // 1001 + floor(1001 * 0.95) = 1001 + 950
    assert_eq!(r.total_returned, Chips(1_951));
}

//
// TEST 7 — validation failure leaves the shoe untouched
//
#[test]
fn invalid_bet_does_not_touch_shoe() {
    let config = no_reshuffle();
    let mut shoe = Shoe::build(8);
    let before = shoe.clone();
    let mut rng = SequenceRng::new(vec![0.3]);

    let bets = vec![Bet::new(BaccaratBet::Player, Chips::whole(5))];
    let err = resolve_baccarat(&bets, Chips::whole(100), &mut shoe, &mut rng, &config).unwrap_err();
    assert!(matches!(err, EngineError::InvalidBet(_)));
    assert_eq!(shoe, before);
    assert_eq!(rng.consumed(), 0);
}

//
// TEST 8 — a short shoe is rebuilt before dealing
//
#[test]
fn short_shoe_is_rebuilt() {
    let config = EngineConfig::default();
    let mut shoe = Shoe::stacked(8, cards("2h 3h 4h"));
    let mut rng = SequenceRng::new(vec![0.42, 0.17, 0.9]);
    let bets = vec![Bet::new(BaccaratBet::Tie, Chips::whole(10))];

    let result = resolve_baccarat(&bets, Chips::whole(100), &mut shoe, &mut rng, &config).unwrap();
    let dealt = result.outcome.player_hand.len() + result.outcome.banker_hand.len();
    assert_eq!(shoe.len(), 52 * 8 - dealt);
}
