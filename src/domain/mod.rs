//! Доменная модель казино: карты, шуз, фишки, ставки и результаты раундов.

pub mod bet;
pub mod card;
pub mod chips;
pub mod hand;
pub mod shoe;

// Базовые идентификаторы.
pub type SessionId = u64;
pub type RoundId = u64;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use bet::*;
pub use card::*;
pub use chips::*;
pub use hand::*;
pub use shoe::*;
