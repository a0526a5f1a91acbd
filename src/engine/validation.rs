use crate::config::{EngineConfig, GameLimits};
use crate::domain::bet::Bet;
use crate::domain::chips::Chips;
use crate::engine::errors::{EngineError, InvalidBetReason};

/// Проверка, что у игрока вообще достаточно денег, чтобы сесть играть.
pub fn validate_play_balance(balance: Chips, config: &EngineConfig) -> Result<(), EngineError> {
    if balance < config.min_play_balance {
        return Err(InvalidBetReason::BalanceBelowPlayMinimum {
            min: config.min_play_balance,
        }
        .into());
    }
    Ok(())
}

/// Проверка одной суммы по лимитам игры.
pub fn validate_amount(amount: Chips, limits: GameLimits) -> Result<(), EngineError> {
    if amount.is_zero() {
        return Err(InvalidBetReason::NonPositiveAmount.into());
    }
    if amount < limits.min_bet {
        return Err(InvalidBetReason::BelowMinimum { min: limits.min_bet }.into());
    }
    if amount > limits.max_bet {
        return Err(InvalidBetReason::AboveMaximum { max: limits.max_bet }.into());
    }
    Ok(())
}

/// Полная проверка набора ставок раунда:
/// - хотя бы одна ставка;
/// - каждая сумма > 0 и в лимитах игры;
/// - каждая ставка и их сумма не больше баланса;
/// - баланс не ниже минимального для игры.
///
/// Ничего не меняет: при ошибке раунд просто не начинается.
pub fn validate_bets<K>(
    bets: &[Bet<K>],
    balance: Chips,
    limits: GameLimits,
    config: &EngineConfig,
) -> Result<Chips, EngineError> {
    if bets.is_empty() {
        return Err(InvalidBetReason::NoBets.into());
    }
    validate_play_balance(balance, config)?;

    let mut total = Chips::ZERO;
    for bet in bets {
        validate_amount(bet.amount, limits)?;
        if bet.amount > balance {
            return Err(InvalidBetReason::InsufficientBalance.into());
        }
        total += bet.amount;
    }

    if total > balance {
        return Err(InvalidBetReason::InsufficientBalance.into());
    }
    Ok(total)
}

/// Хватает ли баланса, чтобы довнести `extra` к уже поставленному `committed`.
pub fn ensure_affordable(committed: Chips, extra: Chips, balance: Chips) -> Result<(), EngineError> {
    if committed + extra > balance {
        return Err(InvalidBetReason::InsufficientBalance.into());
    }
    Ok(())
}
