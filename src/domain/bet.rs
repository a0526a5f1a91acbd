use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;

/// Ставка в конкретной игре. `K` — тип ставки (номер/цвет в рулетке,
/// player/banker/tie в баккаре и т.д.).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bet<K> {
    pub kind: K,
    pub amount: Chips,
}

impl<K> Bet<K> {
    pub fn new(kind: K, amount: Chips) -> Self {
        Self { kind, amount }
    }
}

/// Итог одной ставки. `payout` уже включает возврат самой ставки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settlement<K> {
    pub bet: Bet<K>,
    pub won: bool,
    pub payout: Chips,
}

impl<K> Settlement<K> {
    pub fn win(bet: Bet<K>, payout: Chips) -> Self {
        Self { bet, won: true, payout }
    }

    pub fn lose(bet: Bet<K>) -> Self {
        Self {
            bet,
            won: false,
            payout: Chips::ZERO,
        }
    }

    /// Возврат ставки без выигрыша.
    pub fn push(bet: Bet<K>) -> Self {
        let payout = bet.amount;
        Self {
            bet,
            won: false,
            payout,
        }
    }

    pub fn is_push(&self) -> bool {
        !self.won && !self.payout.is_zero() && self.payout == self.bet.amount
    }
}

/// Результат раунда: исход игры + расчёт по каждой ставке.
///
/// Создаётся один раз при завершении раунда и дальше не меняется
/// (кроме явного слоя `HouseEdgePolicy`). По нему вызывающий код списывает
/// `total_wagered` и зачисляет `total_returned`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundResult<O, K> {
    pub outcome: O,
    pub settlements: Vec<Settlement<K>>,
    pub total_wagered: Chips,
    pub total_returned: Chips,
}

impl<O, K> RoundResult<O, K> {
    /// Собрать результат, посчитав итоги по расчётам.
    pub fn from_settlements(outcome: O, settlements: Vec<Settlement<K>>) -> Self {
        let total_wagered = settlements.iter().map(|s| s.bet.amount).sum();
        let total_returned = settlements.iter().map(|s| s.payout).sum();
        Self {
            outcome,
            settlements,
            total_wagered,
            total_returned,
        }
    }

    /// Пересчитать `total_returned` после правки выплат.
    pub fn recompute_totals(&mut self) {
        self.total_wagered = self.settlements.iter().map(|s| s.bet.amount).sum();
        self.total_returned = self.settlements.iter().map(|s| s.payout).sum();
    }

    /// Чистый результат для игрока (положительный = выигрыш).
    pub fn net(&self) -> i128 {
        self.total_returned.0 as i128 - self.total_wagered.0 as i128
    }

    pub fn is_win(&self) -> bool {
        self.settlements.iter().any(|s| s.won)
    }
}
