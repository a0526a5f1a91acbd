//! Маппинг строковых меток фронта в типизированные ставки и обратно.
//!
//! Метки те же, что отправлял браузерный клиент: рулетка `("color", "red")`,
//! `("type", "even")`, `("range", "1-18")`, `("dozen", "1st")`, кости
//! `"pass"`, `"dontPass"`, баккара `"player"` и т.д.

use crate::engine::baccarat::BaccaratBet;
use crate::engine::dice::DiceBet;
use crate::engine::errors::{EngineError, InvalidBetReason};
use crate::engine::roulette::{Dozen, NumberRange, Parity, RouletteBet, RouletteColor};

fn unknown(kind: &str, value: &str) -> EngineError {
    InvalidBetReason::UnknownBetValue(format!("{kind}:{value}")).into()
}

/// Ставка рулетки из пары (тип, значение).
pub fn roulette_bet_from_labels(bet_type: &str, value: &str) -> Result<RouletteBet, EngineError> {
    let bet = match (bet_type, value) {
        ("number", v) => {
            let n: u8 = v.trim().parse().map_err(|_| unknown(bet_type, value))?;
            if n > 36 {
                return Err(unknown(bet_type, value));
            }
            RouletteBet::Number(n)
        }
        ("color", "red") => RouletteBet::Color(RouletteColor::Red),
        ("color", "black") => RouletteBet::Color(RouletteColor::Black),
        ("type", "even") => RouletteBet::Parity(Parity::Even),
        ("type", "odd") => RouletteBet::Parity(Parity::Odd),
        ("range", "1-18") => RouletteBet::Range(NumberRange::Low),
        ("range", "19-36") => RouletteBet::Range(NumberRange::High),
        ("dozen", "1st") => RouletteBet::Dozen(Dozen::First),
        ("dozen", "2nd") => RouletteBet::Dozen(Dozen::Second),
        ("dozen", "3rd") => RouletteBet::Dozen(Dozen::Third),
        _ => return Err(unknown(bet_type, value)),
    };
    Ok(bet)
}

/// Обратное преобразование (для истории и DTO).
pub fn roulette_bet_to_labels(bet: RouletteBet) -> (&'static str, String) {
    match bet {
        RouletteBet::Number(n) => ("number", n.to_string()),
        RouletteBet::Color(RouletteColor::Red) => ("color", "red".into()),
        RouletteBet::Color(_) => ("color", "black".into()),
        RouletteBet::Parity(Parity::Even) => ("type", "even".into()),
        RouletteBet::Parity(Parity::Odd) => ("type", "odd".into()),
        RouletteBet::Range(NumberRange::Low) => ("range", "1-18".into()),
        RouletteBet::Range(NumberRange::High) => ("range", "19-36".into()),
        RouletteBet::Dozen(Dozen::First) => ("dozen", "1st".into()),
        RouletteBet::Dozen(Dozen::Second) => ("dozen", "2nd".into()),
        RouletteBet::Dozen(Dozen::Third) => ("dozen", "3rd".into()),
    }
}

pub fn dice_bet_from_label(label: &str) -> Result<DiceBet, EngineError> {
    DiceBet::ALL
        .into_iter()
        .find(|b| dice_bet_label(*b) == label)
        .ok_or_else(|| unknown("dice", label))
}

pub fn dice_bet_label(bet: DiceBet) -> &'static str {
    match bet {
        DiceBet::Pass => "pass",
        DiceBet::DontPass => "dontPass",
        DiceBet::Field => "field",
        DiceBet::Any7 => "any7",
        DiceBet::Any11 => "any11",
        DiceBet::HardWays => "hardWays",
        DiceBet::Big6 => "big6",
        DiceBet::Big8 => "big8",
    }
}

pub fn baccarat_bet_from_label(label: &str) -> Result<BaccaratBet, EngineError> {
    match label {
        "player" => Ok(BaccaratBet::Player),
        "banker" => Ok(BaccaratBet::Banker),
        "tie" => Ok(BaccaratBet::Tie),
        other => Err(unknown("baccarat", other)),
    }
}
