use serde::{Deserialize, Serialize};

use crate::domain::bet::Bet;
use crate::domain::chips::Chips;
use crate::engine::{BaccaratBet, DiceBet, PokerAction, RouletteBet};

/// Команда верхнего уровня.
///
/// Команды превращаются в операции (`CasinoOperation`), которые Linera
/// экспонирует наружу. Баланс в команду не входит: его передаёт вызывающий
/// код вместе с командой.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Command {
    Roulette(RouletteCommand),
    Blackjack(BlackjackCommand),
    Slots(SlotsCommand),
    Dice(DiceCommand),
    Poker(PokerCommand),
    Baccarat(BaccaratCommand),
}

/// Спин рулетки с набором ставок.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouletteCommand {
    pub bets: Vec<Bet<RouletteBet>>,
}

/// Шаги раунда блэкджека.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum BlackjackCommand {
    /// Принять ставку и раздать.
    Deal { stake: Chips },
    Hit,
    Stand,
    Double,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotsCommand {
    pub bet: Chips,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum DiceCommand {
    Roll { bets: Vec<Bet<DiceBet>> },
    /// Повторить ставки последнего броска.
    RepeatLastBets,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PokerCommand {
    /// Новая раздача (блайнд + карманные карты).
    Start,
    Act(PokerAction),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BaccaratCommand {
    pub bets: Vec<Bet<BaccaratBet>>,
}
