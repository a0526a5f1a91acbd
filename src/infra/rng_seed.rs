//! RngSeed — базовый seed сессии и выведение seed'ов для отдельных раундов.
//!
//!   round_seed = H(domain || session_seed || session_id || round_id || index)
//!
//! Из seed'а раунда строится `HashChainRng`, так что любой раунд можно
//! воспроизвести, зная seed сессии и номер раунда.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::domain::{RoundId, SessionId};
use crate::infra::rng::HashChainRng;

/// 32-байтовый seed.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RngSeed {
    pub bytes: [u8; 32],
}

impl RngSeed {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Seed из u64 (для тестов и CLI).
    pub fn from_u64(x: u64) -> Self {
        let mut b = [0u8; 32];
        b[..8].copy_from_slice(&x.to_le_bytes());
        Self { bytes: b }
    }

    /// Seed конкретного раунда в сессии.
    pub fn derive(&self, session_id: SessionId, round_id: RoundId, index: u64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"CASINO_ENGINE_RNG_V1");
        hasher.update(self.bytes);
        hasher.update(session_id.to_le_bytes());
        hasher.update(round_id.to_le_bytes());
        hasher.update(index.to_le_bytes());
        Self {
            bytes: hasher.finalize().into(),
        }
    }

    pub fn to_rng(&self) -> HashChainRng {
        HashChainRng::new(self.bytes)
    }
}
