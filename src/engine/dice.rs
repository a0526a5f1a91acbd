//! Кости: упрощённый крэпс, только первый бросок.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::domain::bet::{Bet, RoundResult, Settlement};
use crate::domain::chips::Chips;
use crate::domain::hand::GameKind;
use crate::engine::errors::EngineError;
use crate::engine::validation::validate_bets;
use crate::engine::RandomSource;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DiceBet {
    Pass,
    DontPass,
    Field,
    Any7,
    Any11,
    HardWays,
    Big6,
    Big8,
}

impl DiceBet {
    pub const ALL: [DiceBet; 8] = [
        DiceBet::Pass,
        DiceBet::DontPass,
        DiceBet::Field,
        DiceBet::Any7,
        DiceBet::Any11,
        DiceBet::HardWays,
        DiceBet::Big6,
        DiceBet::Big8,
    ];

    /// Коэффициент X:1.
    pub fn odds(&self) -> u64 {
        match self {
            DiceBet::Any7 => 4,
            DiceBet::Any11 => 15,
            DiceBet::HardWays => 7,
            DiceBet::Pass | DiceBet::DontPass | DiceBet::Field | DiceBet::Big6 | DiceBet::Big8 => 1,
        }
    }

    pub fn wins_on(&self, roll: DiceRoll) -> bool {
        let total = roll.total();
        match self {
            DiceBet::Pass => matches!(total, 7 | 11),
            DiceBet::DontPass => matches!(total, 2 | 3),
            DiceBet::Field => matches!(total, 2 | 3 | 4 | 9 | 10 | 11 | 12),
            DiceBet::Any7 => total == 7,
            DiceBet::Any11 => total == 11,
            // 12 (6+6) в hard ways не входит.
            DiceBet::HardWays => matches!(total, 4 | 6 | 8 | 10) && roll.is_hard(),
            DiceBet::Big6 => total == 6,
            DiceBet::Big8 => total == 8,
        }
    }
}

/// Результат броска двух костей.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiceRoll {
    pub die1: u8,
    pub die2: u8,
}

impl DiceRoll {
    pub fn new(die1: u8, die2: u8) -> Self {
        Self { die1, die2 }
    }

    pub fn roll<R: RandomSource>(rng: &mut R) -> Self {
        let die1 = rng.roll_die();
        let die2 = rng.roll_die();
        Self { die1, die2 }
    }

    pub fn total(&self) -> u8 {
        self.die1 + self.die2
    }

    /// Дубль.
    pub fn is_hard(&self) -> bool {
        self.die1 == self.die2
    }
}

pub type DiceResult = RoundResult<DiceRoll, DiceBet>;

/// Расчёт ставок по известному броску. Одинаковые типы ставок
/// рассчитываются независимо.
pub fn settle_dice(bets: &[Bet<DiceBet>], roll: DiceRoll) -> DiceResult {
    let settlements = bets
        .iter()
        .cloned()
        .map(|bet| {
            if bet.kind.wins_on(roll) {
                let payout = bet.amount.times(bet.kind.odds() + 1);
                Settlement::win(bet, payout)
            } else {
                Settlement::lose(bet)
            }
        })
        .collect();
    RoundResult::from_settlements(roll, settlements)
}

pub fn resolve_dice<R: RandomSource>(
    bets: &[Bet<DiceBet>],
    balance: Chips,
    rng: &mut R,
    config: &EngineConfig,
) -> Result<DiceResult, EngineError> {
    validate_bets(bets, balance, config.limits.for_game(GameKind::Dice), config)?;

    let roll = DiceRoll::roll(rng);
    let result = settle_dice(bets, roll);
    debug!(
        die1 = roll.die1,
        die2 = roll.die2,
        returned = %result.total_returned,
        "dice resolved"
    );
    Ok(result)
}
