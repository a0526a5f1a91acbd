//! Движок исходов для мини-игр казино на Linera.
//!
//! Здесь описываем ABI (Operation / Message / Query / Response);
//! сами игры — в `engine`, оценка покерных рук — в `eval`.

pub mod api;
pub mod config;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;

use linera_sdk::linera_base_types::{ContractAbi, ServiceAbi};
use serde::{Deserialize, Serialize};

use crate::api::{Command, Query, QueryResponse};
use crate::domain::chips::Chips;

/// Операции, которые принимает приложение.
/// Одна операция = одна команда из `api::Command` + баланс игрока.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum CasinoOperation {
    Command { command: Command, balance: Chips },
}

/// Сообщения между приложениями Linera. Пока не нужны.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum CasinoMessage {}

pub type CasinoQuery = Query;

pub type CasinoResponse = QueryResponse;

/// ABI для контракта и сервиса.
#[derive(Clone, Debug)]
pub struct CasinoAbi;

impl ContractAbi for CasinoAbi {
    type Operation = CasinoOperation;
    type Response = ();
}

impl ServiceAbi for CasinoAbi {
    type Query = CasinoQuery;
    type QueryResponse = CasinoResponse;
}
