//! Блэкджек против дилера: одна рука, без сплита и страховки.
//!
//! Раунд — обычное значение у вызывающего кода: `new -> deal -> hit/stand/double`.
//! Баланс на каждом шаге передаётся тот же, что был до раунда: раунд сам
//! следит, чтобы суммарная ставка его не превысила.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::domain::bet::{Bet, RoundResult, Settlement};
use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::GameKind;
use crate::domain::shoe::Shoe;
use crate::engine::dealing::{draw, reshuffle_if_needed};
use crate::engine::errors::EngineError;
use crate::engine::history::{RoundEventKind, RoundHistory, Seat};
use crate::engine::validation::{ensure_affordable, validate_bets};
use crate::engine::RandomSource;

/// Дилер добирает, пока меньше.
pub const DEALER_STANDS_ON: u8 = 17;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum BlackjackPhase {
    Betting,
    Playing,
    Dealer,
    Finished,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BlackjackBet {
    Main,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum BlackjackHandKind {
    Bust,
    Total(u8),
    /// 21 ровно двумя картами.
    Blackjack,
}

/// Чем закончился раунд для игрока.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum BlackjackResolution {
    PlayerBlackjack,
    PlayerWin,
    DealerWin,
    PlayerBust,
    Push,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlackjackOutcome {
    pub player_hand: Vec<Card>,
    pub dealer_hand: Vec<Card>,
    pub player_score: u8,
    pub dealer_score: u8,
    pub doubled: bool,
    pub resolution: BlackjackResolution,
}

pub type BlackjackResult = RoundResult<BlackjackOutcome, BlackjackBet>;

/// Очки руки: туз 11, пока сумма > 21 — тузы по одному превращаются в 1.
pub fn hand_score(cards: &[Card]) -> u8 {
    let mut total: u32 = cards.iter().map(|c| c.blackjack_value() as u32).sum();
    let mut aces = cards.iter().filter(|c| c.blackjack_value() == 11).count();
    while total > 21 && aces > 0 {
        total -= 10;
        aces -= 1;
    }
    total.min(u8::MAX as u32) as u8
}

pub fn classify_hand(cards: &[Card]) -> BlackjackHandKind {
    let score = hand_score(cards);
    if score > 21 {
        BlackjackHandKind::Bust
    } else if score == 21 && cards.len() == 2 {
        BlackjackHandKind::Blackjack
    } else {
        BlackjackHandKind::Total(score)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlackjackRound {
    phase: BlackjackPhase,
    shoe: Shoe,
    player: Vec<Card>,
    dealer: Vec<Card>,
    stake: Chips,
    doubled: bool,
    actions_taken: u32,
    reshuffle_threshold: usize,
    result: Option<BlackjackResult>,
    history: RoundHistory,
}

impl BlackjackRound {
    /// Новый раунд в фазе `Betting` над переданным шузом.
    pub fn new(shoe: Shoe) -> Self {
        Self {
            phase: BlackjackPhase::Betting,
            shoe,
            player: Vec::new(),
            dealer: Vec::new(),
            stake: Chips::ZERO,
            doubled: false,
            actions_taken: 0,
            reshuffle_threshold: 0,
            result: None,
            history: RoundHistory::new(),
        }
    }

    pub fn phase(&self) -> BlackjackPhase {
        self.phase
    }

    pub fn player_hand(&self) -> &[Card] {
        &self.player
    }

    pub fn dealer_hand(&self) -> &[Card] {
        &self.dealer
    }

    /// Открытая карта дилера (первая).
    pub fn dealer_upcard(&self) -> Option<Card> {
        self.dealer.first().copied()
    }

    pub fn player_score(&self) -> u8 {
        hand_score(&self.player)
    }

    pub fn dealer_score(&self) -> u8 {
        hand_score(&self.dealer)
    }

    /// Текущая ставка (после дабла — удвоенная).
    pub fn stake(&self) -> Chips {
        self.stake
    }

    pub fn history(&self) -> &RoundHistory {
        &self.history
    }

    pub fn is_finished(&self) -> bool {
        self.phase == BlackjackPhase::Finished
    }

    /// Итог раунда, если он закончен.
    pub fn settlement(&self) -> Option<BlackjackResult> {
        self.result.clone()
    }

    /// Вернуть шуз вызывающему коду (для следующего раунда).
    pub fn into_shoe(self) -> Shoe {
        self.shoe
    }

    /// Принять ставку и раздать P, D, P, D. Натуральный блэкджек у любой
    /// стороны сразу завершает раунд.
    pub fn deal<R: RandomSource>(
        &mut self,
        stake: Chips,
        balance: Chips,
        rng: &mut R,
        config: &EngineConfig,
    ) -> Result<(), EngineError> {
        if self.phase != BlackjackPhase::Betting {
            return Err(EngineError::InvalidAction("раздача возможна только в фазе ставок"));
        }
        let bet = [Bet::new(BlackjackBet::Main, stake)];
        validate_bets(&bet, balance, config.limits.for_game(GameKind::Blackjack), config)?;

        self.reshuffle_threshold = config.reshuffle_threshold;
        self.stake = stake;
        self.history.push(RoundEventKind::RoundStarted { stake });

        for seat in [Seat::Player, Seat::Dealer, Seat::Player, Seat::Dealer] {
            self.deal_to(seat, rng)?;
        }
        self.phase = BlackjackPhase::Playing;

        let player_bj = classify_hand(&self.player) == BlackjackHandKind::Blackjack;
        let dealer_bj = classify_hand(&self.dealer) == BlackjackHandKind::Blackjack;
        if player_bj || dealer_bj {
            self.finish();
        }
        Ok(())
    }

    /// Взять карту. Перебор завершает раунд, ровно 21 — автоматический stand.
    pub fn hit<R: RandomSource>(&mut self, rng: &mut R) -> Result<(), EngineError> {
        self.ensure_playing()?;
        self.actions_taken += 1;
        self.history.push(RoundEventKind::PlayerActed {
            action: "hit".into(),
            committed: self.stake,
        });
        self.deal_to(Seat::Player, rng)?;

        match self.player_score() {
            s if s > 21 => self.finish(),
            21 => self.play_dealer(rng)?,
            _ => {}
        }
        Ok(())
    }

    pub fn stand<R: RandomSource>(&mut self, rng: &mut R) -> Result<(), EngineError> {
        self.ensure_playing()?;
        self.actions_taken += 1;
        self.history.push(RoundEventKind::PlayerActed {
            action: "stand".into(),
            committed: self.stake,
        });
        self.play_dealer(rng)
    }

    /// Удвоить: только первым действием с двумя картами и если удвоенная
    /// ставка укладывается в баланс. Ровно одна карта, затем stand.
    pub fn double<R: RandomSource>(&mut self, balance: Chips, rng: &mut R) -> Result<(), EngineError> {
        self.ensure_playing()?;
        if self.actions_taken > 0 || self.player.len() != 2 {
            return Err(EngineError::InvalidAction("дабл возможен только первым действием"));
        }
        ensure_affordable(self.stake, self.stake, balance)?;

        self.stake = self.stake.times(2);
        self.doubled = true;
        self.actions_taken += 1;
        self.history.push(RoundEventKind::PlayerActed {
            action: "double".into(),
            committed: self.stake,
        });
        self.deal_to(Seat::Player, rng)?;

        if self.player_score() > 21 {
            self.finish();
            Ok(())
        } else {
            self.play_dealer(rng)
        }
    }

    fn ensure_playing(&self) -> Result<(), EngineError> {
        if self.phase != BlackjackPhase::Playing {
            return Err(EngineError::InvalidAction("действие возможно только в фазе игры"));
        }
        Ok(())
    }

    /// Карта с проактивной пересборкой; пересборка пишется в историю.
    fn deal_to<R: RandomSource>(&mut self, seat: Seat, rng: &mut R) -> Result<(), EngineError> {
        if reshuffle_if_needed(&mut self.shoe, rng, self.reshuffle_threshold) {
            self.history.push(RoundEventKind::ShoeReshuffled {
                decks: self.shoe.deck_count,
            });
        }
        let card = draw(&mut self.shoe)?;
        match seat {
            Seat::Dealer => self.dealer.push(card),
            _ => self.player.push(card),
        }
        self.history.push(RoundEventKind::CardDealt { seat, card });
        Ok(())
    }

    fn play_dealer<R: RandomSource>(&mut self, rng: &mut R) -> Result<(), EngineError> {
        self.phase = BlackjackPhase::Dealer;
        while self.dealer_score() < DEALER_STANDS_ON {
            self.deal_to(Seat::Dealer, rng)?;
        }
        self.history.push(RoundEventKind::DealerStood {
            score: self.dealer_score(),
        });
        self.finish();
        Ok(())
    }

    fn resolve(&self) -> BlackjackResolution {
        let player = classify_hand(&self.player);
        let dealer = classify_hand(&self.dealer);
        match (player, dealer) {
            (BlackjackHandKind::Bust, _) => BlackjackResolution::PlayerBust,
            (BlackjackHandKind::Blackjack, BlackjackHandKind::Blackjack) => BlackjackResolution::Push,
            (BlackjackHandKind::Blackjack, _) => BlackjackResolution::PlayerBlackjack,
            (_, BlackjackHandKind::Blackjack) => BlackjackResolution::DealerWin,
            (BlackjackHandKind::Total(_), BlackjackHandKind::Bust) => BlackjackResolution::PlayerWin,
            (BlackjackHandKind::Total(p), BlackjackHandKind::Total(d)) => match p.cmp(&d) {
                core::cmp::Ordering::Greater => BlackjackResolution::PlayerWin,
                core::cmp::Ordering::Equal => BlackjackResolution::Push,
                core::cmp::Ordering::Less => BlackjackResolution::DealerWin,
            },
        }
    }

    fn finish(&mut self) {
        let resolution = self.resolve();
        let bet = Bet::new(BlackjackBet::Main, self.stake);
        let settlement = match resolution {
            BlackjackResolution::PlayerBlackjack => {
                let payout = self.stake.times_two_and_half();
                Settlement::win(bet, payout)
            }
            BlackjackResolution::PlayerWin => {
                let payout = self.stake.times(2);
                Settlement::win(bet, payout)
            }
            BlackjackResolution::Push => Settlement::push(bet),
            BlackjackResolution::DealerWin | BlackjackResolution::PlayerBust => Settlement::lose(bet),
        };

        let outcome = BlackjackOutcome {
            player_hand: self.player.clone(),
            dealer_hand: self.dealer.clone(),
            player_score: self.player_score(),
            dealer_score: self.dealer_score(),
            doubled: self.doubled,
            resolution,
        };
        let result = RoundResult::from_settlements(outcome, vec![settlement]);
        self.history.push(RoundEventKind::RoundSettled {
            wagered: result.total_wagered,
            returned: result.total_returned,
        });
        debug!(
            player = result.outcome.player_score,
            dealer = result.outcome.dealer_score,
            resolution = ?resolution,
            returned = %result.total_returned,
            "blackjack settled"
        );
        self.result = Some(result);
        self.phase = BlackjackPhase::Finished;
    }
}
