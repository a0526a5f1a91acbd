use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank, Suit};

/// Шуз: одна или несколько стандартных колод подряд.
/// В домене — просто упорядоченный список карт, верх шуза = конец вектора.
/// Перемешивание делает engine (через RandomSource), НЕ здесь.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Shoe {
    /// Сколько колод было в шузе при сборке (нужно для пересборки).
    pub deck_count: u8,
    pub cards: Vec<Card>,
}

impl Shoe {
    /// Собрать шуз из `deck_count` стандартных 52-карточных колод
    /// в порядке Clubs 2..A, Diamonds 2..A, Hearts 2..A, Spades 2..A.
    pub fn build(deck_count: u8) -> Self {
        let mut cards = Vec::with_capacity(52 * deck_count as usize);
        for _ in 0..deck_count {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    cards.push(Card::new(rank, suit));
                }
            }
        }
        Shoe { deck_count, cards }
    }

    /// Одна колода (покер).
    pub fn standard_52() -> Self {
        Self::build(1)
    }

    /// Шуз с заранее заданным порядком карт. Карта `cards[0]` выйдет первой.
    /// Удобно для тестов и реплея.
    pub fn stacked(deck_count: u8, mut cards: Vec<Card>) -> Self {
        cards.reverse();
        Shoe { deck_count, cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Взять одну карту сверху шуза.
    pub fn draw_one(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Пора ли пересобирать шуз перед следующей картой.
    pub fn needs_reshuffle(&self, threshold: usize) -> bool {
        self.cards.len() < threshold
    }

    /// Вернуть шуз в исходное (неперемешанное) полное состояние.
    pub fn rebuild(&mut self) {
        *self = Shoe::build(self.deck_count);
    }
}
