use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::domain::chips::Chips;
use crate::domain::hand::GameKind;
use crate::engine::dice::DiceRoll;
use crate::engine::session::CasinoSession;

use super::dto::{BlackjackViewDto, GameStatsDto, PokerViewDto, SessionViewDto};

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Query {
    /// Полный вид сессии.
    GetSession,

    /// Текущий джекпот слотов.
    GetJackpot,

    /// Статистика по всем играм.
    GetStats,

    /// Последние броски костей.
    GetDiceHistory,

    /// Действующая конфигурация (лимиты и константы).
    GetConfig,
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum QueryResponse {
    Session(SessionViewDto),
    Jackpot(Chips),
    Stats(Vec<GameStatsDto>),
    DiceHistory(Vec<DiceRoll>),
    Config(EngineConfig),
}

/// Ответить на запрос по состоянию сессии.
pub fn answer_query(session: &CasinoSession, query: &Query) -> QueryResponse {
    match query {
        Query::GetSession => QueryResponse::Session(build_session_view(session)),
        Query::GetJackpot => QueryResponse::Jackpot(session.jackpot_pool()),
        Query::GetStats => QueryResponse::Stats(
            GameKind::ALL
                .into_iter()
                .map(|g| GameStatsDto::new(g, session.stats().for_game(g)))
                .collect(),
        ),
        Query::GetDiceHistory => QueryResponse::DiceHistory(session.dice_history().copied().collect()),
        Query::GetConfig => QueryResponse::Config(session.config().clone()),
    }
}

/// Сформировать DTO сессии. Скрытые карты (вторая карта дилера,
/// карманные карты дилера в покере) наружу не попадают.
pub fn build_session_view(session: &CasinoSession) -> SessionViewDto {
    let blackjack = session.active_blackjack().map(|r| BlackjackViewDto {
        phase: r.phase(),
        player_hand: r.player_hand().to_vec(),
        player_score: r.player_score(),
        dealer_upcard: r.dealer_upcard(),
        stake: r.stake(),
    });

    let poker = session.active_poker().map(|r| PokerViewDto {
        street: r.street(),
        player_hole: r.player_hole().to_vec(),
        board: r.board().to_vec(),
        committed: r.committed(),
        pot: r.pot(),
    });

    let stats = session.stats();
    SessionViewDto {
        session_id: session.session_id,
        jackpot_pool: session.jackpot_pool(),
        blackjack,
        poker,
        dice_history: session.dice_history().copied().collect(),
        games_played: stats.games_played,
        total_wagered: stats.total_wagered,
        total_returned: stats.total_returned,
    }
}
