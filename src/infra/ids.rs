use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::{RoundId, SessionId};

/// Генерация ID на монотонных счётчиках.
///
/// В контракте Linera ID обычно приходят извне или из счётчиков в state;
/// здесь — для сессий вне цепочки, тестов и CLI.
#[derive(Debug)]
pub struct IdGenerator {
    session_counter: AtomicU64,
    round_counter: AtomicU64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    /// Все счётчики начинаются с 1.
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Продолжить нумерацию раундов (например, после восстановления сессии).
    pub fn starting_at(next_round: RoundId) -> Self {
        Self {
            session_counter: AtomicU64::new(1),
            round_counter: AtomicU64::new(next_round),
        }
    }

    #[inline]
    pub fn next_session_id(&self) -> SessionId {
        self.session_counter.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn next_round_id(&self) -> RoundId {
        self.round_counter.fetch_add(1, Ordering::Relaxed)
    }
}
