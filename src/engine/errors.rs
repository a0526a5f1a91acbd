use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::chips::Chips;

/// Почему ставка отклонена.
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvalidBetReason {
    #[error("не сделано ни одной ставки")]
    NoBets,

    #[error("сумма ставки должна быть больше нуля")]
    NonPositiveAmount,

    #[error("минимальная ставка {min}")]
    BelowMinimum { min: Chips },

    #[error("максимальная ставка {max}")]
    AboveMaximum { max: Chips },

    #[error("недостаточно средств для этой ставки")]
    InsufficientBalance,

    #[error("минимальный баланс для игры {min}")]
    BalanceBelowPlayMinimum { min: Chips },

    #[error("неизвестная ставка: {0}")]
    UnknownBetValue(String),
}

/// Ошибки движка исходов.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Недопустимая ставка: {0}")]
    InvalidBet(InvalidBetReason),

    /// Нарушение контракта: шуз должен пересобираться заранее.
    #[error("Шуз пуст")]
    EmptyShoe,

    #[error("Недопустимое действие: {0}")]
    InvalidAction(&'static str),

    #[error("Для оценки руки нужно от 5 до 7 карт, получено {0}")]
    InvalidHandSize(usize),

    #[error("Некорректная конфигурация: {0}")]
    InvalidConfig(String),
}

impl From<InvalidBetReason> for EngineError {
    fn from(reason: InvalidBetReason) -> Self {
        EngineError::InvalidBet(reason)
    }
}
