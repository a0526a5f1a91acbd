use core::fmt;

use serde::{Deserialize, Serialize};

/// Какая игра. Нужна для лимитов, статистики и слоя house edge.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GameKind {
    Roulette,
    Blackjack,
    Slots,
    Dice,
    Poker,
    Baccarat,
}

impl GameKind {
    pub const ALL: [GameKind; 6] = [
        GameKind::Roulette,
        GameKind::Blackjack,
        GameKind::Slots,
        GameKind::Dice,
        GameKind::Poker,
        GameKind::Baccarat,
    ];
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameKind::Roulette => "roulette",
            GameKind::Blackjack => "blackjack",
            GameKind::Slots => "slots",
            GameKind::Dice => "dice",
            GameKind::Poker => "poker",
            GameKind::Baccarat => "baccarat",
        };
        f.write_str(name)
    }
}

/// Улица покерной раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

/// Ранг покерной руки. Кодировку заполняет eval (см. `HandRank::from_category_and_ranks`),
/// сравнение — обычное сравнение u32.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandRank(pub u32);
