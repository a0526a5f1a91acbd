//! Инфраструктура вокруг движка:
//! - RNG-реализации и выведение seed'ов;
//! - генерация ID;
//! - маппинг меток фронта в ставки.

pub mod ids;
pub mod mapping;
pub mod rng;
pub mod rng_seed;

pub use ids::*;
pub use mapping::*;
pub use rng::*;
pub use rng_seed::RngSeed;
