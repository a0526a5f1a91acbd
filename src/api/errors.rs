use serde::{Deserialize, Serialize};

use crate::engine::{EngineError, InvalidBetReason};

/// Ошибки внешнего API (то, что отдаём фронту / клиенту).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные (например, битый JSON).
    BadRequest(String),

    /// Ставка не прошла проверку.
    InvalidBet(InvalidBetReason),

    /// Команда не может быть выполнена в текущем состоянии.
    InvalidCommand(String),

    /// Баланс не удалось списать у провайдера.
    DebitRejected,

    /// Внутренняя ошибка (нарушение контракта движка).
    Internal(String),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidBet(reason) => ApiError::InvalidBet(reason),
            EngineError::InvalidAction(_) => ApiError::InvalidCommand(err.to_string()),
            EngineError::InvalidConfig(_) => ApiError::BadRequest(err.to_string()),
            EngineError::EmptyShoe | EngineError::InvalidHandSize(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}
