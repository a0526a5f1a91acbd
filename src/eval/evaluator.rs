use crate::domain::card::{Card, Rank, Suit};
use crate::domain::hand::HandRank;
use crate::engine::errors::EngineError;

use super::hand_rank::HandCategory;
use super::lookup_tables::{detect_straight, rank_to_bit, RankMask};

/// Главная функция: вычислить лучшую 5-карточную руку из hole + board.
///
/// Обычно `hole.len() == 2` и `board.len() == 5`, но работает для любых 5–7 карт.
pub fn evaluate_best_hand(hole: &[Card], board: &[Card]) -> Result<HandRank, EngineError> {
    let mut all_cards = Vec::with_capacity(hole.len() + board.len());
    all_cards.extend_from_slice(hole);
    all_cards.extend_from_slice(board);
    evaluate_cards(&all_cards)
}

/// Лучшая 5-карточная рука из произвольного набора 5–7 карт.
pub fn evaluate_cards(cards: &[Card]) -> Result<HandRank, EngineError> {
    if !(5..=7).contains(&cards.len()) {
        return Err(EngineError::InvalidHandSize(cards.len()));
    }
    Ok(best_of_all_5card_combinations(cards))
}

/// Категория руки по любому числу карт.
///
/// От пяти карт — полная оценка; на префлопе и при неполном наборе
/// учитываются только совпадения рангов (пара, две пары, сет, каре).
pub fn hand_strength(hole: &[Card], board: &[Card]) -> HandCategory {
    if hole.len() + board.len() >= 5 {
        if let Ok(rank) = evaluate_best_hand(hole, board) {
            return rank.category();
        }
    }
    let mut rank_counts = [0u8; 15];
    for card in hole.iter().chain(board) {
        rank_counts[card.rank as usize] += 1;
    }
    let mut counts: Vec<u8> = rank_counts.into_iter().filter(|&c| c > 1).collect();
    counts.sort_unstable_by(|a, b| b.cmp(a));
    match counts.as_slice() {
        [4, ..] => HandCategory::FourOfAKind,
        [3, ..] => HandCategory::ThreeOfAKind,
        [2, 2, ..] => HandCategory::TwoPair,
        [2] => HandCategory::OnePair,
        _ => HandCategory::HighCard,
    }
}

/// Перебираем все комбинации 5 карт из N (N=5–7) и выбираем лучшую.
fn best_of_all_5card_combinations(cards: &[Card]) -> HandRank {
    let n = cards.len();
    let mut best = HandRank(0);

    for a in 0..(n - 4) {
        for b in (a + 1)..(n - 3) {
            for c in (b + 1)..(n - 2) {
                for d in (c + 1)..(n - 1) {
                    for e in (d + 1)..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        let r = evaluate_5card_hand(&five);
                        if r > best {
                            best = r;
                        }
                    }
                }
            }
        }
    }

    best
}

/// Оценка строго 5-карточной комбинации.
fn evaluate_5card_hand(cards: &[Card; 5]) -> HandRank {
    let mut suit_counts = [0u8; 4];
    let mut rank_counts = [0u8; 15]; // индексы 0..14, используем 2..14
    let mut rank_mask: RankMask = 0;

    for card in cards.iter() {
        let suit_idx = match card.suit {
            Suit::Clubs => 0,
            Suit::Diamonds => 1,
            Suit::Hearts => 2,
            Suit::Spades => 3,
        };
        suit_counts[suit_idx] += 1;
        rank_counts[card.rank as usize] += 1;
        rank_mask |= rank_to_bit(card.rank);
    }

    let is_flush = suit_counts.iter().any(|&c| c == 5);
    let straight_high = detect_straight(rank_mask);

    // (rank, count), отсортировано по количеству, затем по рангу — оба по убыванию.
    let mut groups: Vec<(Rank, u8)> = Rank::ALL
        .iter()
        .rev()
        .filter_map(|&r| {
            let c = rank_counts[r as usize];
            (c > 0).then_some((r, c))
        })
        .collect();
    groups.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));

    // pattern: [4,1], [3,2], [3,1,1], [2,2,1], [2,1,1,1], [1,1,1,1,1]
    let pattern: Vec<u8> = groups.iter().map(|g| g.1).collect();

    // Ранги по группам + добивка двойками (хвост не сравнивается по смыслу).
    let grouped_ranks = || {
        let mut ranks = [Rank::Two; 5];
        for (slot, (rank, _)) in ranks.iter_mut().zip(groups.iter()) {
            *slot = *rank;
        }
        ranks
    };

    if let (true, Some(high)) = (is_flush, straight_high) {
        let category = if high == Rank::Ace {
            HandCategory::RoyalFlush
        } else {
            HandCategory::StraightFlush
        };
        return HandRank::from_category_and_ranks(category, straight_rank_array(high));
    }

    let category = match pattern.as_slice() {
        [4, 1] => HandCategory::FourOfAKind,
        [3, 2] => HandCategory::FullHouse,
        _ if is_flush => HandCategory::Flush,
        _ if straight_high.is_some() => HandCategory::Straight,
        [3, 1, 1] => HandCategory::ThreeOfAKind,
        [2, 2, 1] => HandCategory::TwoPair,
        [2, 1, 1, 1] => HandCategory::OnePair,
        _ => HandCategory::HighCard,
    };

    let ranks = match (category, straight_high) {
        (HandCategory::Straight, Some(high)) => straight_rank_array(high),
        _ => grouped_ranks(),
    };

    HandRank::from_category_and_ranks(category, ranks)
}

/// Массив рангов [r0..r4] для стрита с заданной старшей картой.
fn straight_rank_array(high: Rank) -> [Rank; 5] {
    let top = high as u8;
    let mut ranks = [high; 5];
    for (i, slot) in ranks.iter_mut().enumerate() {
        *slot = Rank::from_value(top - i as u8).unwrap_or(Rank::Two);
    }
    ranks
}
