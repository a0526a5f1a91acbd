use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{GameKind, Street};
use crate::domain::{RoundId, SessionId};
use crate::engine::blackjack::BlackjackPhase;
use crate::engine::dice::DiceRoll;
use crate::engine::session::{CommandOutcome, GameStats};

/// DTO активного раунда блэкджека. Вторая карта дилера скрыта.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlackjackViewDto {
    pub phase: BlackjackPhase,
    pub player_hand: Vec<Card>,
    pub player_score: u8,
    pub dealer_upcard: Option<Card>,
    pub stake: Chips,
}

/// DTO активной раздачи покера. Карты дилера до вскрытия не отдаём.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PokerViewDto {
    pub street: Street,
    pub player_hole: Vec<Card>,
    pub board: Vec<Card>,
    pub committed: Chips,
    pub pot: Chips,
}

/// Строка статистики по игре (для лобби).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameStatsDto {
    pub game: GameKind,
    pub rounds: u64,
    pub wins: u64,
    pub wagered: Chips,
    pub returned: Chips,
}

impl GameStatsDto {
    pub fn new(game: GameKind, stats: GameStats) -> Self {
        Self {
            game,
            rounds: stats.rounds,
            wins: stats.wins,
            wagered: stats.wagered,
            returned: stats.returned,
        }
    }
}

/// Общий вид сессии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionViewDto {
    pub session_id: SessionId,
    pub jackpot_pool: Chips,
    pub blackjack: Option<BlackjackViewDto>,
    pub poker: Option<PokerViewDto>,
    /// Последние броски костей, свежий — последним.
    pub dice_history: Vec<DiceRoll>,
    pub games_played: u64,
    pub total_wagered: Chips,
    pub total_returned: Chips,
}

/// Короткая сводка по выполненной команде (для ленты / тоста).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundSummaryDto {
    pub round_id: RoundId,
    pub game: GameKind,
    pub settled: bool,
    pub wagered: Chips,
    pub returned: Chips,
}

impl From<&CommandOutcome> for RoundSummaryDto {
    fn from(outcome: &CommandOutcome) -> Self {
        match outcome {
            CommandOutcome::Settled {
                round_id,
                game,
                wagered,
                returned,
                ..
            } => Self {
                round_id: *round_id,
                game: *game,
                settled: true,
                wagered: *wagered,
                returned: *returned,
            },
            CommandOutcome::Ongoing { round_id, game, .. } => Self {
                round_id: *round_id,
                game: *game,
                settled: false,
                wagered: Chips::ZERO,
                returned: Chips::ZERO,
            },
        }
    }
}
