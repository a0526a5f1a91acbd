//! Слоты: три барабана с взвешенными символами и накопительный джекпот.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::domain::bet::{Bet, RoundResult, Settlement};
use crate::domain::chips::Chips;
use crate::domain::hand::GameKind;
use crate::engine::errors::EngineError;
use crate::engine::validation::validate_bets;
use crate::engine::RandomSource;

pub const REELS: usize = 3;

/// Символ барабана с весом выпадения.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotSymbol {
    pub name: String,
    pub payout_multiplier: u64,
    pub weight: u32,
    #[serde(default)]
    pub is_jackpot: bool,
}

impl SlotSymbol {
    pub fn new(name: &str, payout_multiplier: u64, weight: u32) -> Self {
        Self {
            name: name.to_string(),
            payout_multiplier,
            weight,
            is_jackpot: false,
        }
    }

    pub fn jackpot(name: &str, payout_multiplier: u64, weight: u32) -> Self {
        Self {
            is_jackpot: true,
            ..Self::new(name, payout_multiplier, weight)
        }
    }

    /// Стандартная таблица автомата.
    pub fn default_table() -> Vec<SlotSymbol> {
        vec![
            SlotSymbol::new("cherry", 2, 25),
            SlotSymbol::new("lemon", 3, 20),
            SlotSymbol::new("orange", 4, 18),
            SlotSymbol::new("grape", 5, 15),
            SlotSymbol::new("bell", 8, 10),
            SlotSymbol::new("star", 12, 8),
            SlotSymbol::new("diamond", 20, 3),
            SlotSymbol::jackpot("jackpot", 100, 1),
        ]
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SlotsBet {
    Spin,
}

/// Выигрышная комбинация. Индексы символов — позиции в таблице.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SlotsWin {
    None,
    Pair { symbol: u8, payout: Chips },
    Three { symbol: u8, payout: Chips },
    Jackpot { payout: Chips },
}

impl SlotsWin {
    pub fn payout(&self) -> Chips {
        match *self {
            SlotsWin::None => Chips::ZERO,
            SlotsWin::Pair { payout, .. }
            | SlotsWin::Three { payout, .. }
            | SlotsWin::Jackpot { payout } => payout,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotsOutcome {
    pub reels: [u8; REELS],
    pub win: SlotsWin,
    /// Размер джекпота после спина.
    pub jackpot_pool: Chips,
}

pub type SlotsResult = RoundResult<SlotsOutcome, SlotsBet>;

fn total_weight(table: &[SlotSymbol]) -> Result<u64, EngineError> {
    let total: u64 = table.iter().map(|s| s.weight as u64).sum();
    if total == 0 || table.len() > u8::MAX as usize {
        return Err(EngineError::InvalidConfig(
            "таблица символов пуста или суммарный вес 0".into(),
        ));
    }
    Ok(total)
}

/// Выбор символа обратной выборкой по накопленному весу.
/// Символ с весом 0 не выпадает никогда.
pub fn draw_symbol<R: RandomSource>(table: &[SlotSymbol], rng: &mut R) -> Result<u8, EngineError> {
    let total = total_weight(table)?;
    let r = rng.next_below(total as usize) as u64;

    let mut cumulative = 0u64;
    for (idx, symbol) in table.iter().enumerate() {
        cumulative += symbol.weight as u64;
        if r < cumulative {
            return Ok(idx as u8);
        }
    }
    // r < total: сюда не доходим.
    let last = table.iter().rposition(|s| s.weight > 0).unwrap_or(0);
    Ok(last as u8)
}

/// Оценка барабанов (без RNG).
pub fn evaluate_reels(
    table: &[SlotSymbol],
    reels: [u8; REELS],
    bet: Chips,
    jackpot_pool: Chips,
) -> SlotsWin {
    let [a, b, c] = reels;
    let multiplier = |idx: u8| table.get(idx as usize).map_or(0, |s| s.payout_multiplier);

    if a == b && b == c {
        if table.get(a as usize).is_some_and(|s| s.is_jackpot) {
            return SlotsWin::Jackpot { payout: jackpot_pool };
        }
        return SlotsWin::Three {
            symbol: a,
            payout: bet.times(multiplier(a)),
        };
    }

    let pair = if a == b || a == c {
        Some(a)
    } else if b == c {
        Some(b)
    } else {
        None
    };
    match pair {
        Some(symbol) => SlotsWin::Pair {
            symbol,
            payout: bet.times((multiplier(symbol) / 3).max(1)),
        },
        None => SlotsWin::None,
    }
}

/// Состояние автомата: таблица и накопленный джекпот.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotMachine {
    pub table: Vec<SlotSymbol>,
    pub jackpot_pool: Chips,
    pub jackpot_floor: Chips,
    pub contribution_bps: u32,
}

impl SlotMachine {
    pub fn new(table: Vec<SlotSymbol>, config: &EngineConfig) -> Result<Self, EngineError> {
        total_weight(&table)?;
        Ok(Self {
            table,
            jackpot_pool: config.jackpot_floor,
            jackpot_floor: config.jackpot_floor,
            contribution_bps: config.jackpot_contribution_bps,
        })
    }

    /// Автомат со стандартной таблицей.
    pub fn standard(config: &EngineConfig) -> Result<Self, EngineError> {
        Self::new(SlotSymbol::default_table(), config)
    }

    /// Один спин. Джекпот сбрасывается до минимума при выигрыше;
    /// проигрышный спин пополняет его долей ставки.
    pub fn spin<R: RandomSource>(
        &mut self,
        bet: Chips,
        balance: Chips,
        rng: &mut R,
        config: &EngineConfig,
    ) -> Result<SlotsResult, EngineError> {
        let bets = [Bet::new(SlotsBet::Spin, bet)];
        validate_bets(&bets, balance, config.limits.for_game(GameKind::Slots), config)?;
        total_weight(&self.table)?;

        let mut reels = [0u8; REELS];
        for reel in reels.iter_mut() {
            *reel = draw_symbol(&self.table, rng)?;
        }
        let win = evaluate_reels(&self.table, reels, bet, self.jackpot_pool);

        match win {
            SlotsWin::Jackpot { payout } => {
                info!(%payout, floor = %self.jackpot_floor, "slots jackpot hit");
                self.jackpot_pool = self.jackpot_floor;
            }
            SlotsWin::None => {
                self.jackpot_pool += bet.fraction_bps(self.contribution_bps);
            }
            _ => {}
        }

        let [spin] = bets;
        let settlement = match win {
            SlotsWin::None => Settlement::lose(spin),
            w => Settlement::win(spin, w.payout()),
        };
        let result = RoundResult::from_settlements(
            SlotsOutcome {
                reels,
                win,
                jackpot_pool: self.jackpot_pool,
            },
            vec![settlement],
        );
        debug!(
            ?reels,
            returned = %result.total_returned,
            pool = %self.jackpot_pool,
            "slots resolved"
        );
        Ok(result)
    }
}
