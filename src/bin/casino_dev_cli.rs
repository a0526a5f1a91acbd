//! casino_dev_cli: прогоняет много раундов каждой игры на детерминированном
//! RNG и печатает фактический return-to-player.
//!
//!   casino_dev_cli [раундов_на_игру] [seed] [--legacy-edge]
//!
//! Уровень логов — через RUST_LOG (например, `RUST_LOG=casino_engine=debug`).

use casino_engine::api::{
    apply_settlement, BaccaratCommand, BalanceProvider, BlackjackCommand, Command, DiceCommand,
    InMemoryBalance, PokerCommand, RouletteCommand, SlotsCommand,
};
use casino_engine::config::EngineConfig;
use casino_engine::domain::bet::Bet;
use casino_engine::domain::chips::Chips;
use casino_engine::domain::hand::GameKind;
use casino_engine::engine::roulette::RouletteColor;
use casino_engine::engine::session::OngoingRound;
use casino_engine::engine::{
    BaccaratBet, CasinoSession, CommandOutcome, DiceBet, EngineError, HouseEdgePolicy,
    PokerAction, RouletteBet,
};
use casino_engine::infra::{HashChainRng, RngSeed};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let rounds: u64 = args.first().and_then(|s| s.parse().ok()).unwrap_or(10_000);
    let seed: u64 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(42);
    let policy = if args.iter().any(|a| a == "--legacy-edge") {
        HouseEdgePolicy::legacy_browser()
    } else {
        HouseEdgePolicy::Fair
    };

    println!(
        "casino_dev_cli: {} раундов на игру, seed={}, политика {:?}",
        rounds, seed, policy
    );

    let mut rng: HashChainRng = RngSeed::from_u64(seed).to_rng();
    let config = EngineConfig::default();
    let mut session = match CasinoSession::new(1, config, &mut rng) {
        Ok(s) => s.with_policy(policy),
        Err(e) => {
            eprintln!("[CLI] не удалось создать сессию: {e}");
            return;
        }
    };

    // Баланс с запасом, чтобы серия проигрышей не остановила симуляцию.
    let mut wallet = InMemoryBalance::new(Chips::whole(100_000_000));

    for game in GameKind::ALL {
        for _ in 0..rounds {
            if let Err(e) = play_round(&mut session, &mut wallet, game, &mut rng) {
                eprintln!("[CLI][{game}] ошибка раунда: {e}");
                break;
            }
        }
    }

    println!();
    println!("{:<10} {:>8} {:>8} {:>16} {:>16} {:>8}", "game", "rounds", "wins", "wagered", "returned", "RTP %");
    for game in GameKind::ALL {
        let s = session.stats().for_game(game);
        let rtp = if s.wagered.is_zero() {
            0.0
        } else {
            s.returned.0 as f64 / s.wagered.0 as f64 * 100.0
        };
        println!(
            "{:<10} {:>8} {:>8} {:>16} {:>16} {:>8.2}",
            game.to_string(),
            s.rounds,
            s.wins,
            s.wagered.to_string(),
            s.returned.to_string(),
            rtp
        );
    }
    println!();
    println!("Итоговый баланс: {}", wallet.balance());
    println!("Джекпот слотов: {}", session.jackpot_pool());
}

/// Один полный раунд игры по простой стратегии.
fn play_round(
    session: &mut CasinoSession,
    wallet: &mut InMemoryBalance,
    game: GameKind,
    rng: &mut HashChainRng,
) -> Result<(), EngineError> {
    let balance = wallet.balance();
    let mut outcome = match game {
        GameKind::Roulette => session.execute(
            Command::Roulette(RouletteCommand {
                bets: vec![Bet::new(RouletteBet::Color(RouletteColor::Red), Chips::whole(10))],
            }),
            balance,
            rng,
        )?,
        GameKind::Blackjack => session.execute(
            Command::Blackjack(BlackjackCommand::Deal {
                stake: Chips::whole(10),
            }),
            balance,
            rng,
        )?,
        GameKind::Slots => session.execute(
            Command::Slots(SlotsCommand { bet: Chips::whole(1) }),
            balance,
            rng,
        )?,
        GameKind::Dice => session.execute(
            Command::Dice(DiceCommand::Roll {
                bets: vec![Bet::new(DiceBet::Pass, Chips::whole(5))],
            }),
            balance,
            rng,
        )?,
        GameKind::Poker => session.execute(Command::Poker(PokerCommand::Start), balance, rng)?,
        GameKind::Baccarat => session.execute(
            Command::Baccarat(BaccaratCommand {
                bets: vec![Bet::new(BaccaratBet::Banker, Chips::whole(10))],
            }),
            balance,
            rng,
        )?,
    };

    // Доигрываем многошаговые раунды.
    while let CommandOutcome::Ongoing { round, .. } = &outcome {
        let next = match round {
            OngoingRound::Blackjack { player_score, .. } if *player_score < 17 => {
                Command::Blackjack(BlackjackCommand::Hit)
            }
            OngoingRound::Blackjack { .. } => Command::Blackjack(BlackjackCommand::Stand),
            OngoingRound::Poker { .. } => Command::Poker(PokerCommand::Act(PokerAction::Call)),
        };
        outcome = session.execute(next, balance, rng)?;
    }

    if let CommandOutcome::Settled { wagered, returned, .. } = outcome {
        if let Err(e) = apply_settlement(wallet, wagered, returned) {
            eprintln!("[CLI] не удалось применить итог: {e:?}");
        }
    }
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
}

#[cfg(target_arch = "wasm32")]
fn init_tracing() {}
