//! Баккара (punto banco), шуз на 8 колод.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::domain::bet::{Bet, RoundResult, Settlement};
use crate::domain::card::Card;
use crate::domain::chips::{Chips, BPS_SCALE};
use crate::domain::hand::GameKind;
use crate::domain::shoe::Shoe;
use crate::engine::dealing::deal_card;
use crate::engine::errors::EngineError;
use crate::engine::validation::validate_bets;
use crate::engine::RandomSource;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BaccaratBet {
    Player,
    Banker,
    Tie,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum BaccaratWinner {
    Player,
    Banker,
    Tie,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BaccaratOutcome {
    pub player_hand: Vec<Card>,
    pub banker_hand: Vec<Card>,
    pub player_score: u8,
    pub banker_score: u8,
    pub winner: BaccaratWinner,
}

impl BaccaratOutcome {
    /// Собрать исход по уже разданным рукам.
    pub fn from_hands(player_hand: Vec<Card>, banker_hand: Vec<Card>) -> Self {
        let player_score = hand_score(&player_hand);
        let banker_score = hand_score(&banker_hand);
        let winner = match player_score.cmp(&banker_score) {
            core::cmp::Ordering::Greater => BaccaratWinner::Player,
            core::cmp::Ordering::Less => BaccaratWinner::Banker,
            core::cmp::Ordering::Equal => BaccaratWinner::Tie,
        };
        Self {
            player_hand,
            banker_hand,
            player_score,
            banker_score,
            winner,
        }
    }
}

pub type BaccaratResult = RoundResult<BaccaratOutcome, BaccaratBet>;

/// Сумма очков по модулю 10.
pub fn hand_score(cards: &[Card]) -> u8 {
    (cards.iter().map(|c| c.baccarat_value() as u32).sum::<u32>() % 10) as u8
}

pub fn is_natural(score: u8) -> bool {
    score >= 8
}

/// Игрок добирает на 0..=5.
pub fn player_draws(player_score: u8) -> bool {
    player_score <= 5
}

/// Таблица добора банкира. `player_third` — значение третьей карты игрока,
/// если он добирал.
pub fn banker_draws(banker_score: u8, player_third: Option<u8>) -> bool {
    let third = match player_third {
        None => return banker_score <= 5,
        Some(v) => v,
    };
    match banker_score {
        0..=2 => true,
        3 => third != 8,
        4 => (2..=7).contains(&third),
        5 => (4..=7).contains(&third),
        6 => (6..=7).contains(&third),
        _ => false,
    }
}

/// Раздать руки по правилам добора. Ставки здесь не участвуют.
pub fn play_out_baccarat<R: RandomSource>(
    shoe: &mut Shoe,
    rng: &mut R,
    threshold: usize,
) -> Result<BaccaratOutcome, EngineError> {
    let mut player = Vec::with_capacity(3);
    let mut banker = Vec::with_capacity(3);

    player.push(deal_card(shoe, rng, threshold)?);
    banker.push(deal_card(shoe, rng, threshold)?);
    player.push(deal_card(shoe, rng, threshold)?);
    banker.push(deal_card(shoe, rng, threshold)?);

    let p = hand_score(&player);
    let b = hand_score(&banker);

    if !is_natural(p) && !is_natural(b) {
        let mut player_third = None;
        if player_draws(p) {
            let card = deal_card(shoe, rng, threshold)?;
            player_third = Some(card.baccarat_value());
            player.push(card);
        }
        if banker_draws(b, player_third) {
            banker.push(deal_card(shoe, rng, threshold)?);
        }
    }

    Ok(BaccaratOutcome::from_hands(player, banker))
}

/// Расчёт ставок по исходу. Ничья возвращает ставки на player/banker.
pub fn settle_baccarat(
    bets: &[Bet<BaccaratBet>],
    outcome: BaccaratOutcome,
    commission_bps: u32,
) -> BaccaratResult {
    let winner = outcome.winner;
    let settlements = bets
        .iter()
        .cloned()
        .map(|bet| match (bet.kind, winner) {
            (BaccaratBet::Tie, BaccaratWinner::Tie) => {
                let payout = bet.amount.times(9);
                Settlement::win(bet, payout)
            }
            (BaccaratBet::Player | BaccaratBet::Banker, BaccaratWinner::Tie) => Settlement::push(bet),
            (BaccaratBet::Player, BaccaratWinner::Player) => {
                let payout = bet.amount.times(2);
                Settlement::win(bet, payout)
            }
            (BaccaratBet::Banker, BaccaratWinner::Banker) => {
                let keep = (BPS_SCALE as u32).saturating_sub(commission_bps);
                let payout = bet.amount + bet.amount.fraction_bps(keep);
                Settlement::win(bet, payout)
            }
            _ => Settlement::lose(bet),
        })
        .collect();
    RoundResult::from_settlements(outcome, settlements)
}

/// Проверить ставки, раздать из шуза, рассчитать. При ошибке проверки
/// шуз не трогается.
pub fn resolve_baccarat<R: RandomSource>(
    bets: &[Bet<BaccaratBet>],
    balance: Chips,
    shoe: &mut Shoe,
    rng: &mut R,
    config: &EngineConfig,
) -> Result<BaccaratResult, EngineError> {
    validate_bets(bets, balance, config.limits.for_game(GameKind::Baccarat), config)?;

    let outcome = play_out_baccarat(shoe, rng, config.reshuffle_threshold)?;
    let result = settle_baccarat(bets, outcome, config.banker_commission_bps);
    debug!(
        player = result.outcome.player_score,
        banker = result.outcome.banker_score,
        winner = ?result.outcome.winner,
        returned = %result.total_returned,
        "baccarat resolved"
    );
    Ok(result)
}
