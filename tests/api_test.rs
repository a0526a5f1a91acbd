use casino_engine::{
    api::{
        balance::{apply_settlement, BalanceProvider, InMemoryBalance},
        commands::{BlackjackCommand, Command, DiceCommand, PokerCommand, SlotsCommand},
        dto::RoundSummaryDto,
        errors::ApiError,
        queries::{answer_query, build_session_view, Query, QueryResponse},
    },
    config::EngineConfig,
    domain::{Bet, Chips, GameKind},
    engine::{CasinoSession, DiceBet, EngineError, InvalidBetReason},
    infra::DeterministicRng,
    CasinoOperation,
};

fn new_session(seed: u64) -> (CasinoSession, DeterministicRng) {
    let mut rng = DeterministicRng::from_seed(seed);
    let session = CasinoSession::new(7, EngineConfig::default(), &mut rng).unwrap();
    (session, rng)
}

//
// Свежая сессия: пустой вид, джекпот на полу.
//
#[test]
fn fresh_session_view() {
    let (session, _) = new_session(1);
    let view = build_session_view(&session);

    assert_eq!(view.session_id, 7);
    assert_eq!(view.jackpot_pool, Chips::whole(5_000));
    assert!(view.blackjack.is_none());
    assert!(view.poker.is_none());
    assert!(view.dice_history.is_empty());
    assert_eq!(view.games_played, 0);

    assert_eq!(
        answer_query(&session, &Query::GetJackpot),
        QueryResponse::Jackpot(Chips::whole(5_000))
    );
    assert_eq!(
        answer_query(&session, &Query::GetConfig),
        QueryResponse::Config(EngineConfig::default())
    );
}

//
// Вид активного блэкджека: только открытая карта дилера.
//
#[test]
fn blackjack_view_hides_hole_card() {
    // Ищем seed, где раздача не заканчивается натуралом.
    for seed in 0..50 {
        let (mut session, mut rng) = new_session(seed);
        let out = session
            .execute(
                Command::Blackjack(BlackjackCommand::Deal { stake: Chips::whole(10) }),
                Chips::whole(100),
                &mut rng,
            )
            .unwrap();
        if out.is_settled() {
            continue;
        }

        let view = build_session_view(&session);
        let bj = view.blackjack.expect("active blackjack in view");
        let round = session.active_blackjack().unwrap();
        assert_eq!(bj.player_hand, round.player_hand());
        assert_eq!(bj.dealer_upcard, Some(round.dealer_hand()[0]));
        assert_eq!(bj.stake, Chips::whole(10));

        // В JSON нет второй карты дилера.
        let json = serde_json::to_string(&bj).unwrap();
        assert!(!json.contains("dealer_hand"));

        let summary = RoundSummaryDto::from(&out);
        assert!(!summary.settled);
        assert_eq!(summary.game, GameKind::Blackjack);
        return;
    }
    panic!("no seed produced an open blackjack round");
}

//
// Вид покера и статистика по играм.
//
#[test]
fn poker_view_and_stats() {
    let (mut session, mut rng) = new_session(4);
    session
        .execute(Command::Poker(PokerCommand::Start), Chips::whole(200), &mut rng)
        .unwrap();
    session
        .execute(Command::Slots(SlotsCommand { bet: Chips::whole(1) }), Chips::whole(200), &mut rng)
        .unwrap();

    let view = build_session_view(&session);
    let poker = view.poker.unwrap();
    assert_eq!(poker.player_hole.len(), 2);
    assert!(poker.board.is_empty());
    assert_eq!(poker.committed, Chips::whole(10));
    assert_eq!(poker.pot, Chips::whole(20));

    match answer_query(&session, &Query::GetStats) {
        QueryResponse::Stats(rows) => {
            assert_eq!(rows.len(), 6);
            let slots = rows.iter().find(|r| r.game == GameKind::Slots).unwrap();
            assert_eq!(slots.rounds, 1);
            assert_eq!(slots.wagered, Chips::whole(1));
            let poker = rows.iter().find(|r| r.game == GameKind::Poker).unwrap();
            assert_eq!(poker.rounds, 0);
        }
        other => panic!("unexpected {other:?}"),
    }
}

//
// История костей через запрос.
//
#[test]
fn dice_history_query() {
    let (mut session, mut rng) = new_session(2);
    for _ in 0..3 {
        session
            .execute(
                Command::Dice(DiceCommand::Roll {
                    bets: vec![Bet::new(DiceBet::Any7, Chips::whole(5))],
                }),
                Chips::whole(100),
                &mut rng,
            )
            .unwrap();
    }
    match answer_query(&session, &Query::GetDiceHistory) {
        QueryResponse::DiceHistory(rolls) => {
            assert_eq!(rolls.len(), 3);
            assert!(rolls.iter().all(|r| (2..=12).contains(&r.total())));
        }
        other => panic!("unexpected {other:?}"),
    }
}

//
// Баланс: списание, зачисление, отказ.
//
#[test]
fn balance_provider_applies_settlement() {
    let mut wallet = InMemoryBalance::new(Chips::whole(100));

    let after = apply_settlement(&mut wallet, Chips::whole(10), Chips::whole(35)).unwrap();
    assert_eq!(after, Chips::whole(125));

    let err = apply_settlement(&mut wallet, Chips::whole(500), Chips::whole(1_000)).unwrap_err();
    assert_eq!(err, ApiError::DebitRejected);
    assert_eq!(wallet.balance(), Chips::whole(125));

    assert!(!wallet.debit(Chips::whole(126)));
    assert!(wallet.debit(Chips::whole(125)));
    assert_eq!(wallet.balance(), Chips::ZERO);
}

//
// Ошибки движка -> ошибки API.
//
#[test]
fn api_error_from_engine_error() {
    assert_eq!(
        ApiError::from(EngineError::InvalidBet(InvalidBetReason::NoBets)),
        ApiError::InvalidBet(InvalidBetReason::NoBets)
    );
    assert!(matches!(
        ApiError::from(EngineError::InvalidAction("нет раунда")),
        ApiError::InvalidCommand(_)
    ));
    assert!(matches!(
        ApiError::from(EngineError::InvalidConfig("x".into())),
        ApiError::BadRequest(_)
    ));
    assert!(matches!(ApiError::from(EngineError::EmptyShoe), ApiError::Internal(_)));
}

//
// Конфиг из JSON: частичный JSON дополняется значениями по умолчанию.
//
#[test]
fn config_from_partial_json() {
    let config = EngineConfig::from_json_str(
        r#"{ "blackjack_decks": 4, "limits": { "dice": { "min_bet": 100, "max_bet": 20000 } } }"#,
    )
    .unwrap();
    assert_eq!(config.blackjack_decks, 4);
    assert_eq!(config.limits.dice.min_bet, Chips::whole(1));
    assert_eq!(config.limits.roulette, EngineConfig::default().limits.roulette);
    assert_eq!(config.baccarat_decks, 8);

    let json = config.to_json_string().unwrap();
    assert_eq!(EngineConfig::from_json_str(&json).unwrap(), config);
}

//
// Некорректный конфиг отклоняется.
//
#[test]
fn config_rejects_invalid_values() {
    for json in [
        "not json",
        r#"{ "reshuffle_threshold": 400 }"#,
        r#"{ "reshuffle_threshold": 0 }"#,
        r#"{ "reshuffle_threshold": 5 }"#,
        r#"{ "poker_dealer_fold_bps": 10001 }"#,
        r#"{ "poker_dealer_fold_below": 11 }"#,
        r#"{ "banker_commission_bps": 20000 }"#,
        r#"{ "limits": { "slots": { "min_bet": 500, "max_bet": 100 } } }"#,
    ] {
        assert!(
            matches!(EngineConfig::from_json_str(json), Err(EngineError::InvalidConfig(_))),
            "{json} should be rejected"
        );
    }
}

//
// Операция контракта сериализуется вместе с командой и балансом.
//
#[test]
fn operation_serde_round_trip() {
    let op = CasinoOperation::Command {
        command: Command::Dice(DiceCommand::RepeatLastBets),
        balance: Chips::whole(50),
    };
    let json = serde_json::to_string(&op).unwrap();
    let back: CasinoOperation = serde_json::from_str(&json).unwrap();
    match back {
        CasinoOperation::Command { command, balance } => {
            assert_eq!(command, Command::Dice(DiceCommand::RepeatLastBets));
            assert_eq!(balance, Chips::whole(50));
        }
    }
}
