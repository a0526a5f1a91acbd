//! Внешний API движка казино.
//!
//! - команды (commands.rs) — всё, что играет раунд;
//! - запросы (queries.rs) — только чтение;
//! - DTO (dto.rs) — структуры для фронта;
//! - ошибки (errors.rs) — то, что видит клиент;
//! - баланс (balance.rs) — провайдер баланса и применение итогов раунда.

pub mod balance;
pub mod commands;
pub mod dto;
pub mod errors;
pub mod queries;

pub use balance::*;
pub use commands::*;
pub use dto::*;
pub use errors::*;
pub use queries::*;
