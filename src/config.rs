//! Конфигурация движка: лимиты ставок по играм и игровые константы.
//!
//! Значения по умолчанию повторяют то, что было зашито в браузерных играх.
//! Все суммы — в сентаво (`Chips`), все доли — в базисных пунктах.

use serde::{Deserialize, Serialize};

use crate::domain::chips::{Chips, BPS_SCALE};
use crate::domain::hand::GameKind;
use crate::engine::errors::EngineError;

/// Нижняя граница порога пересборки: шесть карт — максимум раунда баккара.
pub const MIN_RESHUFFLE_THRESHOLD: usize = 6;

/// Лимиты одной ставки.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameLimits {
    pub min_bet: Chips,
    pub max_bet: Chips,
}

impl GameLimits {
    pub const fn new(min_bet: Chips, max_bet: Chips) -> Self {
        Self { min_bet, max_bet }
    }
}

/// Лимиты по всем играм.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TableLimits {
    pub roulette: GameLimits,
    pub blackjack: GameLimits,
    pub slots: GameLimits,
    pub dice: GameLimits,
    /// Для покера — лимиты рейза.
    pub poker: GameLimits,
    pub baccarat: GameLimits,
}

impl Default for TableLimits {
    fn default() -> Self {
        Self {
            roulette: GameLimits::new(Chips::whole(1), Chips::whole(1_000)),
            blackjack: GameLimits::new(Chips::whole(10), Chips::whole(1_000)),
            slots: GameLimits::new(Chips::whole(1), Chips::whole(100)),
            dice: GameLimits::new(Chips::whole(5), Chips::whole(500)),
            poker: GameLimits::new(Chips::whole(5), Chips::whole(500)),
            baccarat: GameLimits::new(Chips::whole(10), Chips::whole(1_000)),
        }
    }
}

impl TableLimits {
    pub fn for_game(&self, game: GameKind) -> GameLimits {
        match game {
            GameKind::Roulette => self.roulette,
            GameKind::Blackjack => self.blackjack,
            GameKind::Slots => self.slots,
            GameKind::Dice => self.dice,
            GameKind::Poker => self.poker,
            GameKind::Baccarat => self.baccarat,
        }
    }
}

/// Полная конфигурация движка.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    pub limits: TableLimits,
    /// Без такого баланса играть нельзя вообще.
    pub min_play_balance: Chips,
    /// Пересобрать шуз, если карт осталось меньше.
    pub reshuffle_threshold: usize,
    pub blackjack_decks: u8,
    pub baccarat_decks: u8,
    /// Комиссия с выигрыша на banker.
    pub banker_commission_bps: u32,
    /// Доля дома с выплаты победителю в покере.
    pub poker_house_edge_bps: u32,
    pub poker_blind: Chips,
    pub poker_call: Chips,
    /// Шанс, что дилер со слабой рукой сбросит карты в ответ на рейз/олл-ин.
    pub poker_dealer_fold_bps: u32,
    /// Рука слабая, если её категория ниже этой (0 — старшая карта, 1 — пара, ...).
    pub poker_dealer_fold_below: u8,
    pub jackpot_floor: Chips,
    /// Какая доля проигрышного спина уходит в джекпот.
    pub jackpot_contribution_bps: u32,
    /// Сколько последних бросков костей хранить в сессии.
    pub dice_history_len: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            limits: TableLimits::default(),
            min_play_balance: Chips::whole(10),
            reshuffle_threshold: 20,
            blackjack_decks: 6,
            baccarat_decks: 8,
            banker_commission_bps: 500,
            poker_house_edge_bps: 250,
            poker_blind: Chips::whole(10),
            poker_call: Chips::whole(10),
            poker_dealer_fold_bps: 3_000,
            poker_dealer_fold_below: 2,
            jackpot_floor: Chips::whole(5_000),
            jackpot_contribution_bps: 100,
            dice_history_len: 10,
        }
    }
}

impl EngineConfig {
    /// Прочитать конфиг из JSON. Отсутствующие поля берутся из `Default`.
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, EngineError> {
        serde_json::to_string_pretty(self).map_err(|e| EngineError::InvalidConfig(e.to_string()))
    }

    /// Проверка согласованности значений.
    pub fn validate(&self) -> Result<(), EngineError> {
        for game in GameKind::ALL {
            let l = self.limits.for_game(game);
            if l.min_bet.is_zero() || l.min_bet > l.max_bet {
                return Err(EngineError::InvalidConfig(format!(
                    "лимиты {game}: min {} / max {}",
                    l.min_bet, l.max_bet
                )));
            }
        }
        if self.blackjack_decks == 0 || self.baccarat_decks == 0 {
            return Err(EngineError::InvalidConfig("количество колод должно быть > 0".into()));
        }
        if self.reshuffle_threshold < MIN_RESHUFFLE_THRESHOLD {
            return Err(EngineError::InvalidConfig(format!(
                "порог пересборки {} меньше {MIN_RESHUFFLE_THRESHOLD}",
                self.reshuffle_threshold
            )));
        }
        // Шуз, который меньше порога, пересобирался бы перед каждой картой.
        let smallest = 52 * self.blackjack_decks.min(self.baccarat_decks) as usize;
        if self.reshuffle_threshold >= smallest {
            return Err(EngineError::InvalidConfig(format!(
                "порог пересборки {} не меньше размера шуза {smallest}",
                self.reshuffle_threshold
            )));
        }
        for (name, bps) in [
            ("banker_commission_bps", self.banker_commission_bps),
            ("poker_house_edge_bps", self.poker_house_edge_bps),
            ("jackpot_contribution_bps", self.jackpot_contribution_bps),
            ("poker_dealer_fold_bps", self.poker_dealer_fold_bps),
        ] {
            if bps as u64 > BPS_SCALE {
                return Err(EngineError::InvalidConfig(format!("{name} = {bps} > 100%")));
            }
        }
        if self.poker_dealer_fold_below > 10 {
            return Err(EngineError::InvalidConfig(format!(
                "poker_dealer_fold_below = {} > 10",
                self.poker_dealer_fold_below
            )));
        }
        Ok(())
    }
}
