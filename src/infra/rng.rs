use sha2::{Digest, Sha256};

use crate::engine::RandomSource;

//
// Нативный вариант (не wasm32): rand.
//
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

#[cfg(not(target_arch = "wasm32"))]
impl RandomSource for SystemRng {
    fn next_f64(&mut self) -> f64 {
        use rand::Rng;
        rand::thread_rng().gen::<f64>()
    }
}

/// Детерминированный RNG для тестов и симуляций.
/// Одинаковый seed — одинаковая последовательность раундов.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: rand::rngs::StdRng,
}

#[cfg(not(target_arch = "wasm32"))]
impl DeterministicRng {
    pub fn from_seed(seed: u64) -> Self {
        use rand::SeedableRng;
        Self {
            inner: rand::rngs::StdRng::seed_from_u64(seed),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl RandomSource for DeterministicRng {
    fn next_f64(&mut self) -> f64 {
        use rand::Rng;
        self.inner.gen::<f64>()
    }
}

/// RNG на цепочке SHA-256. Работает на любой платформе, включая wasm32
/// (контракт Linera), поэтому реплей не зависит от rand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashChainRng {
    state: [u8; 32],
    index: usize,
}

impl HashChainRng {
    pub fn new(seed: [u8; 32]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"CASINO_HASH_CHAIN_V1");
        hasher.update(seed);
        Self {
            state: hasher.finalize().into(),
            index: 0,
        }
    }

    fn next_byte(&mut self) -> u8 {
        if self.index >= self.state.len() {
            self.state = Sha256::digest(self.state).into();
            self.index = 0;
        }
        let b = self.state[self.index];
        self.index += 1;
        b
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        for b in buf.iter_mut() {
            *b = self.next_byte();
        }
        u64::from_le_bytes(buf)
    }
}

impl RandomSource for HashChainRng {
    fn next_f64(&mut self) -> f64 {
        // 53 старших бита -> [0, 1)
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

/// Скриптованный RNG для тестов: отдаёт заданные значения по кругу.
#[derive(Clone, Debug, Default)]
pub struct SequenceRng {
    values: Vec<f64>,
    pos: usize,
}

impl SequenceRng {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, pos: 0 }
    }

    /// Значение, при котором `next_below(n)` вернёт `index`.
    pub fn value_for(index: usize, n: usize) -> f64 {
        (index as f64 + 0.5) / n as f64
    }

    /// Последовательность, выдающая ровно эти индексы для `next_below(n)`.
    pub fn picking(indices: &[usize], n: usize) -> Self {
        Self::new(indices.iter().map(|&i| Self::value_for(i, n)).collect())
    }

    /// Сколько значений уже выдано.
    pub fn consumed(&self) -> usize {
        self.pos
    }
}

impl RandomSource for SequenceRng {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        v
    }
}
