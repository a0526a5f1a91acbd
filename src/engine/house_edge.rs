//! Явный слой house edge поверх честного расчёта.
//!
//! Резолверы всегда считают по честным коэффициентам. Урезание выплат
//! включается только если вызывающий код сам выбрал политику.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::bet::RoundResult;
use crate::domain::chips::{Chips, BPS_SCALE};
use crate::domain::hand::GameKind;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum HouseEdgePolicy {
    /// Выплаты без изменений.
    #[default]
    Fair,
    /// Урезать выигрышные выплаты на долю (в bps) по игре.
    /// Для слотов — потолок выплаты как доля ставки.
    PayoutReduction {
        roulette_bps: u32,
        blackjack_bps: u32,
        poker_bps: u32,
        slots_cap_bps: u32,
    },
}

impl HouseEdgePolicy {
    /// Значения старого браузерного казино: рулетка −20%, блэкджек −15%,
    /// покер −25%, слоты не больше 30% ставки.
    pub fn legacy_browser() -> Self {
        HouseEdgePolicy::PayoutReduction {
            roulette_bps: 2_000,
            blackjack_bps: 1_500,
            poker_bps: 2_500,
            slots_cap_bps: 3_000,
        }
    }

    /// Применить политику к готовому результату. Возвращает удержанную сумму.
    /// Проигрыши и возвраты ставок (push) не трогаются.
    pub fn apply<O, K>(&self, game: GameKind, result: &mut RoundResult<O, K>) -> Chips {
        let (roulette_bps, blackjack_bps, poker_bps, slots_cap_bps) = match *self {
            HouseEdgePolicy::Fair => return Chips::ZERO,
            HouseEdgePolicy::PayoutReduction {
                roulette_bps,
                blackjack_bps,
                poker_bps,
                slots_cap_bps,
            } => (roulette_bps, blackjack_bps, poker_bps, slots_cap_bps),
        };

        let mut withheld = Chips::ZERO;
        for s in result.settlements.iter_mut().filter(|s| s.won) {
            let reduced = match game {
                GameKind::Roulette => keep_share(s.payout, roulette_bps),
                GameKind::Blackjack => keep_share(s.payout, blackjack_bps),
                GameKind::Poker => keep_share(s.payout, poker_bps),
                GameKind::Slots => s.payout.min(s.bet.amount.fraction_bps(slots_cap_bps)),
                GameKind::Dice | GameKind::Baccarat => s.payout,
            };
            withheld += s.payout - reduced;
            s.payout = reduced;
        }

        if !withheld.is_zero() {
            result.recompute_totals();
            info!(%game, %withheld, returned = %result.total_returned, "house edge policy applied");
        }
        withheld
    }
}

fn keep_share(payout: Chips, reduction_bps: u32) -> Chips {
    let keep = (BPS_SCALE as u32).saturating_sub(reduction_bps);
    payout.fraction_bps(keep)
}
