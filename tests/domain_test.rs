//! Интеграционные тесты для доменной модели (crate::domain).

use std::collections::HashSet;

use casino_engine::domain::*;
use casino_engine::engine::{draw, EngineError};

/// Парсинг и форматирование карт.
#[test]
fn card_parse_and_display() {
    let c: Card = "Ah".parse().unwrap();
    assert_eq!(c, Card::new(Rank::Ace, Suit::Hearts));
    assert_eq!(c.to_string(), "Ah");
    assert_eq!(c.symbol(), "A♥");

    let ten: Card = "td".parse().unwrap();
    assert_eq!(ten.to_string(), "Td");
    assert_eq!(ten.symbol(), "10♦");

    assert!("A".parse::<Card>().is_err());
    assert!("1h".parse::<Card>().is_err());
    assert!("Ax".parse::<Card>().is_err());
    assert!("Ahh".parse::<Card>().is_err());
}

/// Значения карт по играм.
#[test]
fn card_values_per_game() {
    let ace = Card::new(Rank::Ace, Suit::Spades);
    let king = Card::new(Rank::King, Suit::Clubs);
    let seven = Card::new(Rank::Seven, Suit::Diamonds);

    assert_eq!(ace.blackjack_value(), 11);
    assert_eq!(king.blackjack_value(), 10);
    assert_eq!(seven.blackjack_value(), 7);

    assert_eq!(ace.baccarat_value(), 1);
    assert_eq!(king.baccarat_value(), 0);
    assert_eq!(seven.baccarat_value(), 7);

    assert_eq!(ace.poker_value(), 14);
    assert_eq!(king.poker_value(), 13);
    assert!(Suit::Hearts.is_red());
    assert!(!Suit::Spades.is_red());
}

/// Шуз из N колод: 52·N карт, каждая карта ровно N раз.
#[test]
fn shoe_build_counts() {
    let shoe = Shoe::build(6);
    assert_eq!(shoe.len(), 312);
    assert_eq!(shoe.deck_count, 6);

    let unique: HashSet<Card> = shoe.cards.iter().copied().collect();
    assert_eq!(unique.len(), 52);
    let aces_of_spades = shoe
        .cards
        .iter()
        .filter(|c| **c == Card::new(Rank::Ace, Suit::Spades))
        .count();
    assert_eq!(aces_of_spades, 6);
}

/// Stacked-шуз отдаёт карты в заданном порядке, пустой шуз — ошибка.
#[test]
fn stacked_shoe_draw_order() {
    let order: Vec<Card> = ["2c", "Kd", "9h"].iter().map(|s| s.parse().unwrap()).collect();
    let mut shoe = Shoe::stacked(1, order.clone());

    assert_eq!(draw(&mut shoe).unwrap(), order[0]);
    assert_eq!(draw(&mut shoe).unwrap(), order[1]);
    assert_eq!(draw(&mut shoe).unwrap(), order[2]);
    assert_eq!(draw(&mut shoe), Err(EngineError::EmptyShoe));
    assert!(shoe.is_empty());
}

/// Порог пересборки и пересборка.
#[test]
fn shoe_reshuffle_threshold_and_rebuild() {
    let mut shoe = Shoe::stacked(2, vec!["2c".parse().unwrap()]);
    assert!(shoe.needs_reshuffle(20));
    assert!(!shoe.needs_reshuffle(1));
    assert!(!shoe.needs_reshuffle(0));

    shoe.rebuild();
    assert_eq!(shoe.len(), 104);
    assert!(!shoe.needs_reshuffle(20));
}

/// Арифметика фишек: насыщение, доли в bps, 2.5×.
#[test]
fn chips_math() {
    assert_eq!(Chips::whole(12), Chips(1_200));
    assert_eq!(Chips(1_234).to_string(), "12.34");
    assert_eq!(Chips(5).to_string(), "0.05");

    assert_eq!(Chips(10) - Chips(20), Chips::ZERO);
    assert_eq!(Chips(u64::MAX) + Chips(1), Chips(u64::MAX));
    assert_eq!(Chips(1_001).fraction_bps(9_500), Chips(950));
    assert_eq!(Chips(1_001).times_two_and_half(), Chips(2_502));
    assert_eq!(Chips(300).times(36), Chips(10_800));

    let total: Chips = vec![Chips(1), Chips(2), Chips(3)].into_iter().sum();
    assert_eq!(total, Chips(6));
}

/// Расчёты: win / lose / push и итоги раунда.
#[test]
fn settlements_and_round_totals() {
    let win = Settlement::win(Bet::new("a", Chips(100)), Chips(200));
    let lose = Settlement::lose(Bet::new("b", Chips(50)));
    let push = Settlement::push(Bet::new("c", Chips(30)));

    assert!(win.won && !win.is_push());
    assert!(!lose.won && !lose.is_push());
    assert!(push.is_push());

    let result = RoundResult::from_settlements((), vec![win, lose, push]);
    assert_eq!(result.total_wagered, Chips(180));
    assert_eq!(result.total_returned, Chips(230));
    assert_eq!(result.net(), 50);
    assert!(result.is_win());
}

/// Пересчёт итогов после правки выплат.
#[test]
fn round_result_recompute() {
    let mut result = RoundResult::from_settlements(
        (),
        vec![Settlement::win(Bet::new(1u8, Chips(100)), Chips(200))],
    );
    result.settlements[0].payout = Chips(150);
    result.recompute_totals();
    assert_eq!(result.total_returned, Chips(150));
    assert_eq!(result.net(), 50);
}

/// Ранг руки сравнивается как число, категория в старших битах.
#[test]
fn hand_rank_ordering() {
    assert!(HandRank(2 << 20) > HandRank((1 << 20) | 0xFFFFF));
    assert_eq!(GameKind::ALL.len(), 6);
    assert_eq!(GameKind::Baccarat.to_string(), "baccarat");
}
