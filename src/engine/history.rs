use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;

/// Чья рука получила карту.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Seat {
    Player,
    Dealer,
    Board,
}

/// Тип события в раунде.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundEventKind {
    /// Раунд начат, ставка принята.
    RoundStarted { stake: Chips },

    /// Шуз пересобран (перед раздачей или посреди раунда).
    ShoeReshuffled { decks: u8 },

    /// Карта ушла игроку / дилеру / на борд.
    CardDealt { seat: Seat, card: Card },

    /// Действие игрока (hit, stand, call, raise…).
    PlayerActed { action: String, committed: Chips },

    /// Дилер сбросил карты в ответ на рейз/олл-ин.
    DealerFolded,

    /// Переход покерной улицы.
    StreetChanged { street: Street },

    /// Дилер добрал до своей границы и остановился.
    DealerStood { score: u8 },

    /// Раунд рассчитан.
    RoundSettled { wagered: Chips, returned: Chips },
}

/// Событие в раунде с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundEvent {
    pub index: u32,
    pub kind: RoundEventKind,
}

/// Полная история раунда (для реплея и UI).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundHistory {
    pub events: Vec<RoundEvent>,
}

impl RoundHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: RoundEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(RoundEvent { index: idx, kind });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Все карты, выданные указанному месту, в порядке раздачи.
    pub fn cards_for(&self, seat: Seat) -> Vec<Card> {
        self.events
            .iter()
            .filter_map(|e| match e.kind {
                RoundEventKind::CardDealt { seat: s, card } if s == seat => Some(card),
                _ => None,
            })
            .collect()
    }
}
