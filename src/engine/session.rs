//! CasinoSession — состояние одного игрока за всеми играми.
//!
//! Вместо глобальных объектов игр: шузы, автомат слотов, активные раунды
//! блэкджека и покера, история костей и статистика лежат в одном значении,
//! которым владеет вызывающий код. `execute` маршрутизирует команду в нужный
//! резолвер и возвращает итог; баланс применяет вызывающий код.

use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::commands::{
    BaccaratCommand, BlackjackCommand, Command, DiceCommand, PokerCommand, RouletteCommand,
    SlotsCommand,
};
use crate::config::EngineConfig;
use crate::domain::bet::{Bet, RoundResult};
use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{GameKind, Street};
use crate::domain::shoe::Shoe;
use crate::domain::{RoundId, SessionId};
use crate::engine::baccarat::{resolve_baccarat, BaccaratResult};
use crate::engine::blackjack::{BlackjackPhase, BlackjackResult, BlackjackRound};
use crate::engine::dealing::fresh_shoe;
use crate::engine::dice::{resolve_dice, DiceBet, DiceResult, DiceRoll};
use crate::engine::errors::{EngineError, InvalidBetReason};
use crate::engine::house_edge::HouseEdgePolicy;
use crate::engine::poker::{PokerResult, PokerRound, PokerStatus};
use crate::engine::roulette::{resolve_roulette, RouletteResult};
use crate::engine::slots::{SlotMachine, SlotsResult};
use crate::engine::RandomSource;
use crate::infra::ids::IdGenerator;

/// Итоги по одной игре.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameStats {
    pub rounds: u64,
    pub wins: u64,
    pub wagered: Chips,
    pub returned: Chips,
}

/// Статистика сессии.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionStats {
    pub games_played: u64,
    pub total_wagered: Chips,
    pub total_returned: Chips,
    pub per_game: BTreeMap<GameKind, GameStats>,
}

impl SessionStats {
    pub fn record(&mut self, game: GameKind, wagered: Chips, returned: Chips, won: bool) {
        self.games_played += 1;
        self.total_wagered += wagered;
        self.total_returned += returned;

        let entry = self.per_game.entry(game).or_default();
        entry.rounds += 1;
        entry.wagered += wagered;
        entry.returned += returned;
        if won {
            entry.wins += 1;
        }
    }

    pub fn for_game(&self, game: GameKind) -> GameStats {
        self.per_game.get(&game).copied().unwrap_or_default()
    }
}

/// Полный результат завершённого раунда по игре.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SettledRound {
    Roulette(RouletteResult),
    Blackjack(BlackjackResult),
    Slots(SlotsResult),
    Dice(DiceResult),
    Poker(PokerResult),
    Baccarat(BaccaratResult),
}

/// То, что видно игроку в незавершённом раунде.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum OngoingRound {
    Blackjack {
        phase: BlackjackPhase,
        player_hand: Vec<Card>,
        dealer_upcard: Option<Card>,
        player_score: u8,
        stake: Chips,
    },
    Poker {
        street: Street,
        player_hole: Vec<Card>,
        board: Vec<Card>,
        committed: Chips,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Раунд рассчитан: списать `wagered`, зачислить `returned`.
    Settled {
        round_id: RoundId,
        game: GameKind,
        wagered: Chips,
        returned: Chips,
        /// Сколько удержала политика house edge (0 при `Fair`).
        withheld: Chips,
        round: SettledRound,
    },
    /// Раунд продолжается, баланс пока не меняется.
    Ongoing { round_id: RoundId, game: GameKind, round: OngoingRound },
}

impl CommandOutcome {
    pub fn round_id(&self) -> RoundId {
        match self {
            CommandOutcome::Settled { round_id, .. } | CommandOutcome::Ongoing { round_id, .. } => {
                *round_id
            }
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, CommandOutcome::Settled { .. })
    }

    /// Чистый результат для игрока; для незавершённого раунда 0.
    pub fn net(&self) -> i128 {
        match self {
            CommandOutcome::Settled { wagered, returned, .. } => returned.0 as i128 - wagered.0 as i128,
            CommandOutcome::Ongoing { .. } => 0,
        }
    }
}

#[derive(Debug)]
pub struct CasinoSession {
    pub session_id: SessionId,
    config: EngineConfig,
    policy: HouseEdgePolicy,
    blackjack_shoe: Option<Shoe>,
    baccarat_shoe: Shoe,
    slots: SlotMachine,
    blackjack: Option<(RoundId, BlackjackRound)>,
    poker: Option<(RoundId, PokerRound)>,
    last_dice_bets: Vec<Bet<DiceBet>>,
    dice_history: VecDeque<DiceRoll>,
    stats: SessionStats,
    ids: IdGenerator,
}

impl CasinoSession {
    /// Новая сессия: конфиг проверяется, шузы собираются и перемешиваются.
    pub fn new<R: RandomSource>(
        session_id: SessionId,
        config: EngineConfig,
        rng: &mut R,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let blackjack_shoe = fresh_shoe(config.blackjack_decks, rng);
        let baccarat_shoe = fresh_shoe(config.baccarat_decks, rng);
        let slots = SlotMachine::standard(&config)?;
        Ok(Self {
            session_id,
            policy: HouseEdgePolicy::Fair,
            blackjack_shoe: Some(blackjack_shoe),
            baccarat_shoe,
            slots,
            blackjack: None,
            poker: None,
            last_dice_bets: Vec::new(),
            dice_history: VecDeque::with_capacity(config.dice_history_len),
            stats: SessionStats::default(),
            ids: IdGenerator::new(),
            config,
        })
    }

    pub fn with_policy(mut self, policy: HouseEdgePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_slot_machine(mut self, slots: SlotMachine) -> Self {
        self.slots = slots;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn policy(&self) -> HouseEdgePolicy {
        self.policy
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn slot_machine(&self) -> &SlotMachine {
        &self.slots
    }

    pub fn jackpot_pool(&self) -> Chips {
        self.slots.jackpot_pool
    }

    /// Последние броски, самый свежий — последним.
    pub fn dice_history(&self) -> impl Iterator<Item = &DiceRoll> {
        self.dice_history.iter()
    }

    pub fn last_dice_bets(&self) -> &[Bet<DiceBet>] {
        &self.last_dice_bets
    }

    pub fn active_blackjack(&self) -> Option<&BlackjackRound> {
        self.blackjack.as_ref().map(|(_, r)| r)
    }

    pub fn active_poker(&self) -> Option<&PokerRound> {
        self.poker.as_ref().map(|(_, r)| r)
    }

    /// Карт в шузе блэкджека между раундами (во время раунда шуз у раунда).
    pub fn blackjack_cards_left(&self) -> usize {
        self.blackjack_shoe.as_ref().map_or(0, Shoe::len)
    }

    pub fn baccarat_cards_left(&self) -> usize {
        self.baccarat_shoe.len()
    }

    /// Выполнить команду. `balance` — текущий баланс игрока; для
    /// многошаговых игр — баланс до начала раунда.
    pub fn execute<R: RandomSource>(
        &mut self,
        command: Command,
        balance: Chips,
        rng: &mut R,
    ) -> Result<CommandOutcome, EngineError> {
        match command {
            Command::Roulette(RouletteCommand { bets }) => {
                let result = resolve_roulette(&bets, balance, rng, &self.config)?;
                let round_id = self.ids.next_round_id();
                Ok(self.settle(round_id, GameKind::Roulette, result, SettledRound::Roulette))
            }
            Command::Blackjack(cmd) => self.execute_blackjack(cmd, balance, rng),
            Command::Slots(SlotsCommand { bet }) => {
                let result = self.slots.spin(bet, balance, rng, &self.config)?;
                let round_id = self.ids.next_round_id();
                Ok(self.settle(round_id, GameKind::Slots, result, SettledRound::Slots))
            }
            Command::Dice(DiceCommand::Roll { bets }) => self.roll_dice(bets, balance, rng),
            Command::Dice(DiceCommand::RepeatLastBets) => {
                if self.last_dice_bets.is_empty() {
                    return Err(InvalidBetReason::NoBets.into());
                }
                let bets = self.last_dice_bets.clone();
                self.roll_dice(bets, balance, rng)
            }
            Command::Poker(cmd) => self.execute_poker(cmd, balance, rng),
            Command::Baccarat(BaccaratCommand { bets }) => {
                let result =
                    resolve_baccarat(&bets, balance, &mut self.baccarat_shoe, rng, &self.config)?;
                let round_id = self.ids.next_round_id();
                Ok(self.settle(round_id, GameKind::Baccarat, result, SettledRound::Baccarat))
            }
        }
    }

    fn roll_dice<R: RandomSource>(
        &mut self,
        bets: Vec<Bet<DiceBet>>,
        balance: Chips,
        rng: &mut R,
    ) -> Result<CommandOutcome, EngineError> {
        let result = resolve_dice(&bets, balance, rng, &self.config)?;
        self.last_dice_bets = bets;
        if self.config.dice_history_len > 0 {
            if self.dice_history.len() >= self.config.dice_history_len {
                self.dice_history.pop_front();
            }
            self.dice_history.push_back(result.outcome);
        }
        let round_id = self.ids.next_round_id();
        Ok(self.settle(round_id, GameKind::Dice, result, SettledRound::Dice))
    }

    fn execute_blackjack<R: RandomSource>(
        &mut self,
        cmd: BlackjackCommand,
        balance: Chips,
        rng: &mut R,
    ) -> Result<CommandOutcome, EngineError> {
        if let BlackjackCommand::Deal { stake } = cmd {
            if self.blackjack.is_some() {
                return Err(EngineError::InvalidAction("раунд блэкджека уже идёт"));
            }
            let shoe = match self.blackjack_shoe.take() {
                Some(shoe) => shoe,
                None => fresh_shoe(self.config.blackjack_decks, rng),
            };
            let mut round = BlackjackRound::new(shoe);
            if let Err(e) = round.deal(stake, balance, rng, &self.config) {
                self.blackjack_shoe = Some(round.into_shoe());
                return Err(e);
            }
            let round_id = self.ids.next_round_id();
            return Ok(self.after_blackjack_step(round_id, round));
        }

        let (round_id, mut round) = self
            .blackjack
            .take()
            .ok_or(EngineError::InvalidAction("нет активного раунда блэкджека"))?;
        let step = match cmd {
            BlackjackCommand::Hit => round.hit(rng),
            BlackjackCommand::Stand => round.stand(rng),
            BlackjackCommand::Double => round.double(balance, rng),
            BlackjackCommand::Deal { .. } => Ok(()),
        };
        if let Err(e) = step {
            self.blackjack = Some((round_id, round));
            return Err(e);
        }
        Ok(self.after_blackjack_step(round_id, round))
    }

    fn after_blackjack_step(&mut self, round_id: RoundId, round: BlackjackRound) -> CommandOutcome {
        match round.settlement() {
            Some(result) => {
                self.blackjack_shoe = Some(round.into_shoe());
                self.settle(round_id, GameKind::Blackjack, result, SettledRound::Blackjack)
            }
            None => {
                let view = OngoingRound::Blackjack {
                    phase: round.phase(),
                    player_hand: round.player_hand().to_vec(),
                    dealer_upcard: round.dealer_upcard(),
                    player_score: round.player_score(),
                    stake: round.stake(),
                };
                self.blackjack = Some((round_id, round));
                CommandOutcome::Ongoing {
                    round_id,
                    game: GameKind::Blackjack,
                    round: view,
                }
            }
        }
    }

    fn execute_poker<R: RandomSource>(
        &mut self,
        cmd: PokerCommand,
        balance: Chips,
        rng: &mut R,
    ) -> Result<CommandOutcome, EngineError> {
        match cmd {
            PokerCommand::Start => {
                if self.poker.is_some() {
                    return Err(EngineError::InvalidAction("раздача покера уже идёт"));
                }
                let round = PokerRound::start(balance, rng, &self.config)?;
                let round_id = self.ids.next_round_id();
                let view = poker_view(&round);
                self.poker = Some((round_id, round));
                Ok(CommandOutcome::Ongoing {
                    round_id,
                    game: GameKind::Poker,
                    round: view,
                })
            }
            PokerCommand::Act(action) => {
                let (round_id, round) = self
                    .poker
                    .as_mut()
                    .ok_or(EngineError::InvalidAction("нет активной раздачи покера"))?;
                let round_id = *round_id;
                match round.apply_action(action, balance, rng)? {
                    PokerStatus::Ongoing { .. } => Ok(CommandOutcome::Ongoing {
                        round_id,
                        game: GameKind::Poker,
                        round: poker_view(round),
                    }),
                    PokerStatus::Finished(result) => {
                        self.poker = None;
                        Ok(self.settle(round_id, GameKind::Poker, result, SettledRound::Poker))
                    }
                }
            }
        }
    }

    /// Политика house edge, статистика, итог.
    fn settle<O, K>(
        &mut self,
        round_id: RoundId,
        game: GameKind,
        mut result: RoundResult<O, K>,
        wrap: impl FnOnce(RoundResult<O, K>) -> SettledRound,
    ) -> CommandOutcome {
        let withheld = self.policy.apply(game, &mut result);
        let wagered = result.total_wagered;
        let returned = result.total_returned;
        self.stats.record(game, wagered, returned, result.is_win());
        debug!(
            session = self.session_id,
            round = round_id,
            %game,
            %wagered,
            %returned,
            "round settled"
        );
        CommandOutcome::Settled {
            round_id,
            game,
            wagered,
            returned,
            withheld,
            round: wrap(result),
        }
    }
}

fn poker_view(round: &PokerRound) -> OngoingRound {
    OngoingRound::Poker {
        street: round.street(),
        player_hole: round.player_hole().to_vec(),
        board: round.board().to_vec(),
        committed: round.committed(),
    }
}
