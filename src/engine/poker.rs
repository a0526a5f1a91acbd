//! Heads-up hold'em против дома.
//!
//! Дом уравнивает каждую ставку игрока, поэтому банк = 2 × вложенное игроком.
//! Победителю выплачивается банк за вычетом доли дома. Равные руки — победа дома.
//! На рейз и олл-ин дилер со слабой рукой может сбросить карты.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{EngineConfig, GameLimits};
use crate::domain::bet::{Bet, RoundResult, Settlement};
use crate::domain::card::Card;
use crate::domain::chips::{Chips, BPS_SCALE};
use crate::domain::hand::{GameKind, HandRank, Street};
use crate::domain::shoe::Shoe;
use crate::engine::dealing::{draw, fresh_shoe};
use crate::engine::errors::EngineError;
use crate::engine::history::{RoundEventKind, RoundHistory, Seat};
use crate::engine::validation::{ensure_affordable, validate_amount, validate_play_balance};
use crate::engine::RandomSource;
use crate::eval::{evaluate_best_hand, hand_strength};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PokerAction {
    Fold,
    Call,
    Raise(Chips),
    AllIn,
}

impl PokerAction {
    fn label(&self) -> &'static str {
        match self {
            PokerAction::Fold => "fold",
            PokerAction::Call => "call",
            PokerAction::Raise(_) => "raise",
            PokerAction::AllIn => "all_in",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PokerBet {
    Pot,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PokerWinner {
    Player,
    House,
}

/// Кто сбросил карты.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PokerFold {
    Player,
    Dealer,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PokerOutcome {
    pub player_hole: Vec<Card>,
    pub dealer_hole: Vec<Card>,
    pub board: Vec<Card>,
    /// Ранги на вскрытии. При фолде — `None`.
    pub player_rank: Option<HandRank>,
    pub dealer_rank: Option<HandRank>,
    pub winner: PokerWinner,
    pub folded: Option<PokerFold>,
    pub pot: Chips,
}

pub type PokerResult = RoundResult<PokerOutcome, PokerBet>;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PokerStatus {
    Ongoing { street: Street },
    Finished(PokerResult),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PokerRound {
    street: Street,
    deck: Shoe,
    player_hole: Vec<Card>,
    dealer_hole: Vec<Card>,
    board: Vec<Card>,
    committed: Chips,
    call_amount: Chips,
    raise_limits: GameLimits,
    house_edge_bps: u32,
    dealer_fold_bps: u32,
    dealer_fold_below: u8,
    result: Option<PokerResult>,
    history: RoundHistory,
}

impl PokerRound {
    /// Свежая колода, блайнд игрока, по две карты игроку и дилеру.
    pub fn start<R: RandomSource>(
        balance: Chips,
        rng: &mut R,
        config: &EngineConfig,
    ) -> Result<Self, EngineError> {
        validate_play_balance(balance, config)?;
        ensure_affordable(Chips::ZERO, config.poker_blind, balance)?;
        Self::with_deck(fresh_shoe(1, rng), balance, config)
    }

    /// Раздача из заранее подготовленной колоды (реплей, тесты).
    /// Порядок выдачи: игрок, игрок, дилер, дилер, затем борд.
    pub fn with_deck(deck: Shoe, balance: Chips, config: &EngineConfig) -> Result<Self, EngineError> {
        validate_play_balance(balance, config)?;
        ensure_affordable(Chips::ZERO, config.poker_blind, balance)?;

        let mut round = Self {
            street: Street::Preflop,
            deck,
            player_hole: Vec::with_capacity(2),
            dealer_hole: Vec::with_capacity(2),
            board: Vec::with_capacity(5),
            committed: config.poker_blind,
            call_amount: config.poker_call,
            raise_limits: config.limits.for_game(GameKind::Poker),
            house_edge_bps: config.poker_house_edge_bps,
            dealer_fold_bps: config.poker_dealer_fold_bps,
            dealer_fold_below: config.poker_dealer_fold_below,
            result: None,
            history: RoundHistory::new(),
        };
        round.history.push(RoundEventKind::RoundStarted {
            stake: config.poker_blind,
        });
        for seat in [Seat::Player, Seat::Player, Seat::Dealer, Seat::Dealer] {
            round.deal_to(seat)?;
        }
        Ok(round)
    }

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn player_hole(&self) -> &[Card] {
        &self.player_hole
    }

    pub fn board(&self) -> &[Card] {
        &self.board
    }

    /// Сколько игрок уже вложил в банк.
    pub fn committed(&self) -> Chips {
        self.committed
    }

    pub fn pot(&self) -> Chips {
        self.committed.times(2)
    }

    pub fn history(&self) -> &RoundHistory {
        &self.history
    }

    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }

    pub fn settlement(&self) -> Option<PokerResult> {
        self.result.clone()
    }

    /// Действие игрока. `balance` — баланс до начала раунда.
    /// RNG тратится только на ответ дилера при рейзе и олл-ине.
    pub fn apply_action<R: RandomSource>(
        &mut self,
        action: PokerAction,
        balance: Chips,
        rng: &mut R,
    ) -> Result<PokerStatus, EngineError> {
        if self.result.is_some() || self.street == Street::Showdown {
            return Err(EngineError::InvalidAction("раздача уже завершена"));
        }

        // Сначала все проверки, потом изменения.
        let extra = match action {
            PokerAction::Fold => Chips::ZERO,
            PokerAction::Call => self.call_amount,
            PokerAction::Raise(amount) => {
                validate_amount(amount, self.raise_limits)?;
                amount
            }
            PokerAction::AllIn => balance.saturating_sub(self.committed),
        };
        ensure_affordable(self.committed, extra, balance)?;

        self.committed += extra;
        self.history.push(RoundEventKind::PlayerActed {
            action: action.label().into(),
            committed: self.committed,
        });

        if matches!(action, PokerAction::Raise(_) | PokerAction::AllIn) && self.dealer_folds(rng) {
            self.finish_fold(PokerFold::Dealer);
            return Ok(self.status());
        }

        match action {
            PokerAction::Fold => {
                self.finish_fold(PokerFold::Player);
            }
            PokerAction::AllIn => {
                while self.street != Street::Showdown {
                    self.advance_street()?;
                }
                self.showdown()?;
            }
            PokerAction::Call | PokerAction::Raise(_) => {
                self.advance_street()?;
                if self.street == Street::Showdown {
                    self.showdown()?;
                }
            }
        }

        Ok(self.status())
    }

    fn status(&self) -> PokerStatus {
        match &self.result {
            Some(result) => PokerStatus::Finished(result.clone()),
            None => PokerStatus::Ongoing { street: self.street },
        }
    }

    /// Ответ дилера на давление: сила по текущему борду, затем бросок.
    fn dealer_folds<R: RandomSource>(&self, rng: &mut R) -> bool {
        let strength = hand_strength(&self.dealer_hole, &self.board);
        let roll = rng.next_below(BPS_SCALE as usize) as u32;
        let folds = strength.ordinal() < self.dealer_fold_below && roll < self.dealer_fold_bps;
        debug!(?strength, roll, folds, "poker dealer response");
        folds
    }

    fn deal_to(&mut self, seat: Seat) -> Result<(), EngineError> {
        let card = draw(&mut self.deck)?;
        match seat {
            Seat::Player => self.player_hole.push(card),
            Seat::Dealer => self.dealer_hole.push(card),
            Seat::Board => self.board.push(card),
        }
        self.history.push(RoundEventKind::CardDealt { seat, card });
        Ok(())
    }

    fn advance_street(&mut self) -> Result<(), EngineError> {
        let (next, cards) = match self.street {
            Street::Preflop => (Street::Flop, 3),
            Street::Flop => (Street::Turn, 1),
            Street::Turn => (Street::River, 1),
            Street::River => (Street::Showdown, 0),
            Street::Showdown => return Ok(()),
        };
        for _ in 0..cards {
            self.deal_to(Seat::Board)?;
        }
        self.street = next;
        self.history.push(RoundEventKind::StreetChanged { street: next });
        Ok(())
    }

    fn finish_fold(&mut self, who: PokerFold) {
        let pot = self.pot();
        let bet = Bet::new(PokerBet::Pot, self.committed);
        let (winner, settlement) = match who {
            PokerFold::Player => (PokerWinner::House, Settlement::lose(bet)),
            PokerFold::Dealer => {
                self.history.push(RoundEventKind::DealerFolded);
                (PokerWinner::Player, Settlement::win(bet, self.winner_payout()))
            }
        };
        let outcome = PokerOutcome {
            player_hole: self.player_hole.clone(),
            dealer_hole: self.dealer_hole.clone(),
            board: self.board.clone(),
            player_rank: None,
            dealer_rank: None,
            winner,
            folded: Some(who),
            pot,
        };
        self.store(RoundResult::from_settlements(outcome, vec![settlement]));
    }

    /// Банк минус доля дома.
    fn winner_payout(&self) -> Chips {
        let pot = self.pot();
        pot - pot.fraction_bps(self.house_edge_bps)
    }

    fn showdown(&mut self) -> Result<(), EngineError> {
        let player_rank = evaluate_best_hand(&self.player_hole, &self.board)?;
        let dealer_rank = evaluate_best_hand(&self.dealer_hole, &self.board)?;
        let pot = self.pot();
        let bet = Bet::new(PokerBet::Pot, self.committed);

        // Ничья уходит дому.
        let (winner, settlement) = if player_rank > dealer_rank {
            (PokerWinner::Player, Settlement::win(bet, self.winner_payout()))
        } else {
            (PokerWinner::House, Settlement::lose(bet))
        };

        let outcome = PokerOutcome {
            player_hole: self.player_hole.clone(),
            dealer_hole: self.dealer_hole.clone(),
            board: self.board.clone(),
            player_rank: Some(player_rank),
            dealer_rank: Some(dealer_rank),
            winner,
            folded: None,
            pot,
        };
        self.store(RoundResult::from_settlements(outcome, vec![settlement]));
        Ok(())
    }

    fn store(&mut self, result: PokerResult) {
        self.history.push(RoundEventKind::RoundSettled {
            wagered: result.total_wagered,
            returned: result.total_returned,
        });
        debug!(
            winner = ?result.outcome.winner,
            pot = %result.outcome.pot,
            returned = %result.total_returned,
            "poker settled"
        );
        self.street = Street::Showdown;
        self.result = Some(result);
    }
}
