//! Провайдер баланса — внешний для движка.
//!
//! Движок баланс не трогает: он возвращает `total_wagered` / `total_returned`,
//! а вызывающий код применяет их через `apply_settlement`.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::chips::Chips;

use super::errors::ApiError;

pub trait BalanceProvider {
    fn balance(&self) -> Chips;

    /// Списать сумму. `false`, если денег не хватает (баланс не меняется).
    fn debit(&mut self, amount: Chips) -> bool;

    fn credit(&mut self, amount: Chips);
}

/// Баланс в памяти (анонимная сессия, тесты, CLI).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InMemoryBalance {
    amount: Chips,
}

impl InMemoryBalance {
    pub fn new(amount: Chips) -> Self {
        Self { amount }
    }
}

impl BalanceProvider for InMemoryBalance {
    fn balance(&self) -> Chips {
        self.amount
    }

    fn debit(&mut self, amount: Chips) -> bool {
        if amount > self.amount {
            return false;
        }
        self.amount -= amount;
        true
    }

    fn credit(&mut self, amount: Chips) {
        self.amount += amount;
    }
}

/// Применить итог раунда: сначала списать ставки, потом зачислить выплату.
/// Если списание отклонено, баланс остаётся прежним.
pub fn apply_settlement<P: BalanceProvider + ?Sized>(
    provider: &mut P,
    total_wagered: Chips,
    total_returned: Chips,
) -> Result<Chips, ApiError> {
    if !provider.debit(total_wagered) {
        warn!(%total_wagered, balance = %provider.balance(), "debit rejected");
        return Err(ApiError::DebitRejected);
    }
    provider.credit(total_returned);
    Ok(provider.balance())
}
