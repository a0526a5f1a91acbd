//! Движок исходов: по одному резолверу на игру + общие примитивы.
//!
//! Каждый резолвер — чистое вычисление:
//!   (состояние шуза/RNG, ставки) -> (новое состояние, `RoundResult`).
//! Баланс движок не трогает: списание/зачисление делает вызывающий код
//! по `total_wagered` / `total_returned`.

pub mod baccarat;
pub mod blackjack;
pub mod dealing;
pub mod dice;
pub mod errors;
pub mod history;
pub mod house_edge;
pub mod poker;
pub mod roulette;
pub mod session;
pub mod slots;
pub mod validation;

pub use baccarat::{resolve_baccarat, settle_baccarat, BaccaratBet, BaccaratOutcome};
pub use blackjack::{BlackjackBet, BlackjackOutcome, BlackjackPhase, BlackjackRound};
pub use dealing::{deal_card, draw, shuffle_shoe};
pub use dice::{resolve_dice, settle_dice, DiceBet, DiceRoll};
pub use errors::{EngineError, InvalidBetReason};
pub use history::{RoundEvent, RoundEventKind, RoundHistory};
pub use house_edge::HouseEdgePolicy;
pub use poker::{PokerAction, PokerBet, PokerOutcome, PokerRound, PokerStatus};
pub use roulette::{resolve_roulette, settle_roulette, RouletteBet, RouletteOutcome};
pub use session::{CasinoSession, CommandOutcome, SessionStats};
pub use slots::{SlotMachine, SlotSymbol, SlotsBet, SlotsOutcome, SlotsWin};

/// RNG интерфейс для движка: равномерное число в [0, 1).
///
/// Реализации лежат в infra (rand, хэш-цепочка, скриптованный дубль для тестов).
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;

    /// Равномерное целое в [0, n). Для n == 0 возвращает 0.
    fn next_below(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        let r = self.next_f64();
        // r < 1.0 по контракту, но скриптованный RNG может отдать и 1.0.
        ((r * n as f64) as usize).min(n - 1)
    }

    /// Бросок одной кости 1..=6.
    fn roll_die(&mut self) -> u8 {
        self.next_below(6) as u8 + 1
    }

    /// Перемешивание Фишера–Йетса.
    fn shuffle<T>(&mut self, slice: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..slice.len()).rev() {
            let j = self.next_below(i + 1);
            slice.swap(i, j);
        }
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}
