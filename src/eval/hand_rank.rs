use serde::{Deserialize, Serialize};

use crate::domain::card::Rank;
use crate::domain::hand::HandRank;

/// Категория покерной руки по силе (0 — старшая карта, 9 — роял-флеш).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl HandCategory {
    /// Порядковый номер категории 0..=9.
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    fn from_ordinal(id: u8) -> HandCategory {
        match id {
            1 => HandCategory::OnePair,
            2 => HandCategory::TwoPair,
            3 => HandCategory::ThreeOfAKind,
            4 => HandCategory::Straight,
            5 => HandCategory::Flush,
            6 => HandCategory::FullHouse,
            7 => HandCategory::FourOfAKind,
            8 => HandCategory::StraightFlush,
            9 => HandCategory::RoyalFlush,
            _ => HandCategory::HighCard,
        }
    }
}

impl HandRank {
    /// Собрать HandRank из категории и 5 рангов (от старшего к младшему).
    ///
    /// Схема кодирования (u32):
    ///   [категория:4 бита][r0:4][r1:4][r2:4][r3:4][r4:4]
    /// Rank: 2..14 (2..A) влазит в 4 бита.
    pub fn from_category_and_ranks(category: HandCategory, ranks: [Rank; 5]) -> Self {
        let cat_bits = (category as u32) & 0x0F;
        let value = ranks
            .iter()
            .fold(cat_bits, |acc, r| (acc << 4) | (*r as u32 & 0x0F));
        HandRank(value)
    }

    /// Вытащить категорию из HandRank.
    pub fn category(&self) -> HandCategory {
        HandCategory::from_ordinal(((self.0 >> 20) & 0x0F) as u8)
    }

    /// Достать 5 рангов (от старшего к младшему) из HandRank.
    pub fn ranks(&self) -> [Rank; 5] {
        let nibble = |shift: u32| Rank::from_value(((self.0 >> shift) & 0x0F) as u8).unwrap_or(Rank::Two);
        [nibble(16), nibble(12), nibble(8), nibble(4), nibble(0)]
    }

    /// Старшая значимая карта руки (для тай-брейка и UI).
    pub fn high_card(&self) -> Rank {
        self.ranks()[0]
    }
}

/// Удобная функция – получить категорию из HandRank.
pub fn hand_category(rank: HandRank) -> HandCategory {
    rank.category()
}

/// Человеческое описание руки по категории.
pub fn describe_hand(rank: HandRank) -> &'static str {
    match rank.category() {
        HandCategory::HighCard => "High card",
        HandCategory::OnePair => "One pair",
        HandCategory::TwoPair => "Two pair",
        HandCategory::ThreeOfAKind => "Three of a kind",
        HandCategory::Straight => "Straight",
        HandCategory::Flush => "Flush",
        HandCategory::FullHouse => "Full house",
        HandCategory::FourOfAKind => "Four of a kind",
        HandCategory::StraightFlush => "Straight flush",
        HandCategory::RoyalFlush => "Royal flush",
    }
}
