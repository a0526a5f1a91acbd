//! Европейская рулетка: 37 лунок, одно зеро.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::domain::bet::{Bet, RoundResult, Settlement};
use crate::domain::chips::Chips;
use crate::domain::hand::GameKind;
use crate::engine::errors::{EngineError, InvalidBetReason};
use crate::engine::validation::validate_bets;
use crate::engine::RandomSource;

pub const POCKETS: usize = 37;

/// Красные номера. Остальные ненулевые — чёрные.
pub const RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

/// Порядок лунок на колесе (для отрисовки).
pub const WHEEL_ORDER: [u8; POCKETS] = [
    0, 32, 15, 19, 4, 21, 2, 25, 17, 34, 6, 27, 13, 36, 11, 30, 8, 23, 10, 5, 24, 16, 33, 1, 20,
    14, 31, 9, 22, 18, 29, 7, 28, 12, 35, 3, 26,
];

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RouletteColor {
    Red,
    Black,
    Green,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Parity {
    Even,
    Odd,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum NumberRange {
    /// 1–18
    Low,
    /// 19–36
    High,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Dozen {
    First,
    Second,
    Third,
}

/// Тип ставки в рулетке.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RouletteBet {
    Number(u8),
    Color(RouletteColor),
    Parity(Parity),
    Range(NumberRange),
    Dozen(Dozen),
}

impl RouletteBet {
    /// Коэффициент выигрыша X:1.
    pub fn odds(&self) -> u64 {
        match self {
            RouletteBet::Number(_) => 35,
            RouletteBet::Dozen(_) => 2,
            RouletteBet::Color(_) | RouletteBet::Parity(_) | RouletteBet::Range(_) => 1,
        }
    }

    /// Выигрывает ли ставка на данном номере. Зеро проходит только
    /// прямую ставку на 0.
    pub fn wins_on(&self, n: u8) -> bool {
        match *self {
            RouletteBet::Number(k) => k == n,
            _ if n == 0 => false,
            RouletteBet::Color(c) => color_of(n) == c,
            RouletteBet::Parity(Parity::Even) => n % 2 == 0,
            RouletteBet::Parity(Parity::Odd) => n % 2 == 1,
            RouletteBet::Range(NumberRange::Low) => n <= 18,
            RouletteBet::Range(NumberRange::High) => n >= 19,
            RouletteBet::Dozen(Dozen::First) => n <= 12,
            RouletteBet::Dozen(Dozen::Second) => (13..=24).contains(&n),
            RouletteBet::Dozen(Dozen::Third) => n >= 25,
        }
    }

    fn check(&self) -> Result<(), EngineError> {
        match *self {
            RouletteBet::Number(n) if n as usize >= POCKETS => {
                Err(InvalidBetReason::UnknownBetValue(format!("номер {n}")).into())
            }
            RouletteBet::Color(RouletteColor::Green) => {
                Err(InvalidBetReason::UnknownBetValue("цвет green".into()).into())
            }
            _ => Ok(()),
        }
    }
}

pub fn color_of(n: u8) -> RouletteColor {
    if n == 0 {
        RouletteColor::Green
    } else if RED_NUMBERS.contains(&n) {
        RouletteColor::Red
    } else {
        RouletteColor::Black
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouletteOutcome {
    pub winning_number: u8,
    pub color: RouletteColor,
}

pub type RouletteResult = RoundResult<RouletteOutcome, RouletteBet>;

/// Расчёт ставок по выпавшему номеру. Без RNG и без проверок баланса.
pub fn settle_roulette(bets: &[Bet<RouletteBet>], winning_number: u8) -> RouletteResult {
    let settlements = bets
        .iter()
        .cloned()
        .map(|bet| {
            if bet.kind.wins_on(winning_number) {
                let payout = bet.amount.times(bet.kind.odds() + 1);
                Settlement::win(bet, payout)
            } else {
                Settlement::lose(bet)
            }
        })
        .collect();

    RoundResult::from_settlements(
        RouletteOutcome {
            winning_number,
            color: color_of(winning_number),
        },
        settlements,
    )
}

/// Проверить ставки, крутануть колесо, рассчитать.
pub fn resolve_roulette<R: RandomSource>(
    bets: &[Bet<RouletteBet>],
    balance: Chips,
    rng: &mut R,
    config: &EngineConfig,
) -> Result<RouletteResult, EngineError> {
    for bet in bets {
        bet.kind.check()?;
    }
    validate_bets(bets, balance, config.limits.for_game(GameKind::Roulette), config)?;

    let n = rng.next_below(POCKETS) as u8;
    let result = settle_roulette(bets, n);
    debug!(
        number = n,
        wagered = %result.total_wagered,
        returned = %result.total_returned,
        "roulette resolved"
    );
    Ok(result)
}
