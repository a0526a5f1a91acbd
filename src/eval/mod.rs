//! Модуль оценки силы покерных рук (упрощённый Texas Hold'em против дома).
//!
//! Основные функции:
//!   `evaluate_best_hand(hole, board) -> HandRank`
//!   `evaluate_cards(cards) -> HandRank`

pub mod evaluator;
pub mod hand_rank;
pub mod lookup_tables;

pub use evaluator::{evaluate_best_hand, evaluate_cards, hand_strength};
pub use hand_rank::{describe_hand, hand_category, HandCategory};
