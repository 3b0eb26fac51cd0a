//! Integration tests for betting-settlement

use betting_settlement::{
    BettingProcessor, MatchCatalog, PlayerStore, ProcessorConfig, ReconciliationEngine,
    SettlementError, SettlementReport,
};
use betting_settlement::ledger::LedgerBuilder;
use std::fs;
use std::path::Path;
use uuid::Uuid;

const ALICE: &str = "163f23ed-e9a9-4e54-a5b1-4e1fc86f12f4";
const BOB: &str = "8f2e3e5b-0b6e-4a63-9f7c-3c55ea0b3e5d";
const CAROL: &str = "0d1b2a3c-4e5f-4a6b-8c7d-9e0f1a2b3c4d";
const DAVE: &str = "c2a4e6f8-1b3d-4f5a-9c7e-2d4f6a8b0c1e";
const MATCH_1: &str = "abae7f73-e5fd-4e37-be36-0a2d6ba3fe2b";
const MATCH_2: &str = "d6c8b5a5-4a2a-4b4f-8c3a-1f0e5b7a9c11";

fn write_lines(path: &Path, lines: &[String]) {
    let mut content = lines.join("\n");
    content.push('\n');
    fs::write(path, content).unwrap();
}

fn run_in(dir: &Path) -> (Result<SettlementReport, SettlementError>, ProcessorConfig) {
    let config = ProcessorConfig::in_dir(dir);
    let result = BettingProcessor::new(config.clone()).run();
    (result, config)
}

#[test]
fn test_complete_settlement_run() {
    let dir = tempfile::tempdir().unwrap();
    let config = ProcessorConfig::in_dir(dir.path());

    let bob_bet = format!("{BOB},BET,{MATCH_1},500,A");
    let dave_withdraw = format!("{DAVE},WITHDRAW,,100");
    write_lines(
        &config.player_data,
        &[
            format!("{ALICE},DEPOSIT,,4000"),
            format!("{BOB},DEPOSIT,,1000"),
            bob_bet.clone(),
            format!("{CAROL},DEPOSIT,,300"),
            format!("{CAROL},WITHDRAW,,500"),
            format!("{DAVE},DEPOSIT,,250"),
            dave_withdraw.clone(),
        ],
    );
    write_lines(
        &config.match_data,
        &[
            format!("{MATCH_1},1.5,0.75,A"),
            format!("{MATCH_2},0.2,4.8,B"),
        ],
    );

    let report = BettingProcessor::new(config.clone()).run().unwrap();

    // Bob's bet wins: 500 * 1.5 = 750
    assert_eq!(report.casino_delta, 750);
    let expected = format!(
        "{CAROL} 300 0.00\n{ALICE} 4000 0.00\n\n{BOB} {bob_bet}\n{DAVE} {dave_withdraw}\n\n750\n"
    );
    assert_eq!(fs::read_to_string(&config.output).unwrap(), expected);
}

#[test]
fn test_winning_bet_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let config = ProcessorConfig::in_dir(dir.path());
    let bet = format!("{ALICE},BET,{MATCH_1},50,A");

    write_lines(&config.player_data, &[format!("{ALICE},DEPOSIT,,100"), bet.clone()]);
    write_lines(&config.match_data, &[format!("{MATCH_1},2.0,0.5,A")]);

    let (result, config) = run_in(dir.path());
    let report = result.unwrap();

    assert!(report.settled.is_empty());
    assert_eq!(report.flagged.len(), 1);
    assert_eq!(report.flagged[0].action, bet);
    assert_eq!(report.casino_delta, 100);
    assert_eq!(
        fs::read_to_string(&config.output).unwrap(),
        format!("{ALICE} {bet}\n\n100\n")
    );
}

#[test]
fn test_deposits_only_with_empty_match_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = ProcessorConfig::in_dir(dir.path());

    write_lines(
        &config.player_data,
        &[
            format!("{BOB},DEPOSIT,,20"),
            format!("{ALICE},DEPOSIT,,10"),
            format!("{BOB},DEPOSIT,,5"),
        ],
    );
    fs::write(&config.match_data, "").unwrap();

    let (result, config) = run_in(dir.path());
    result.unwrap();
    assert_eq!(
        fs::read_to_string(&config.output).unwrap(),
        format!("{ALICE} 10 0.00\n{BOB} 25 0.00\n\n0\n")
    );
}

#[test]
fn test_missing_match_file_still_reports() {
    let dir = tempfile::tempdir().unwrap();
    let config = ProcessorConfig::in_dir(dir.path());
    let bet = format!("{BOB},BET,{MATCH_1},10,A");

    write_lines(&config.player_data, &[format!("{ALICE},DEPOSIT,,10"), bet.clone()]);

    let (result, config) = run_in(dir.path());
    let report = result.unwrap();
    assert_eq!(report.casino_delta, 0);
    assert_eq!(
        fs::read_to_string(&config.output).unwrap(),
        format!("{ALICE} 10 0.00\n\n{BOB} {bet}\n\n0\n")
    );
}

#[test]
fn test_missing_player_file_still_reports() {
    let dir = tempfile::tempdir().unwrap();
    let config = ProcessorConfig::in_dir(dir.path());
    write_lines(&config.match_data, &[format!("{MATCH_1},2.0,0.5,A")]);

    let (result, config) = run_in(dir.path());
    result.unwrap();
    assert_eq!(fs::read_to_string(&config.output).unwrap(), "0\n");
}

#[test]
fn test_malformed_record_stops_before_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = ProcessorConfig::in_dir(dir.path());
    write_lines(
        &config.player_data,
        &[format!("{ALICE},DEPOSIT,,10"), "not-a-uuid,DEPOSIT,,10".to_string()],
    );

    let (result, config) = run_in(dir.path());
    match result.unwrap_err() {
        SettlementError::MalformedRecord { line, .. } => assert_eq!(line, 2),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!config.output.exists());
}

#[test]
fn test_unhyphenated_player_id_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let config = ProcessorConfig::in_dir(dir.path());
    let simple = ALICE.replace('-', "");
    write_lines(&config.player_data, &[format!("{simple},DEPOSIT,,10")]);

    let (result, config) = run_in(dir.path());
    match result.unwrap_err() {
        SettlementError::MalformedRecord { line, reason, .. } => {
            assert_eq!(line, 1);
            assert!(reason.contains(&simple));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!config.output.exists());
}

#[test]
fn test_malformed_match_rate_stops_before_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = ProcessorConfig::in_dir(dir.path());
    write_lines(&config.player_data, &[format!("{ALICE},DEPOSIT,,10")]);
    write_lines(&config.match_data, &[format!("{MATCH_1},two,0.5,A")]);

    let (result, config) = run_in(dir.path());
    assert!(matches!(result, Err(SettlementError::MalformedRecord { .. })));
    assert!(!config.output.exists());
}

#[test]
fn test_settled_bet_without_account_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = ProcessorConfig::in_dir(dir.path());
    write_lines(&config.player_data, &[format!("{CAROL},BET,{MATCH_2},10,B")]);
    write_lines(&config.match_data, &[format!("{MATCH_2},1.0,1.0,B")]);

    let (result, config) = run_in(dir.path());
    assert!(matches!(result, Err(SettlementError::UnknownPlayer(id)) if id.to_string() == CAROL));
    assert!(!config.output.exists());
}

#[test]
fn test_settled_player_balances_and_win_rate() {
    // players with a held bet are reported as flagged, so check the ledger
    let mut builder = LedgerBuilder::new("player_data.txt");
    for line in [
        format!("{ALICE},DEPOSIT,,1000"),
        format!("{ALICE},BET,{MATCH_1},100,A"),
        format!("{BOB},DEPOSIT,,1000"),
        format!("{BOB},BET,{MATCH_2},200,A"),
    ] {
        builder.apply_line(&line).unwrap();
    }
    let mut ledger = builder.finish();

    let matches = format!("{MATCH_1},1.5,2.5,A\n{MATCH_2},1.5,2.5,B\n");
    let catalog = MatchCatalog::load(matches.as_bytes(), "match_data.txt").unwrap();

    let summary = ReconciliationEngine::new().settle(&mut ledger, &catalog).unwrap();

    // 100 * 1.5 for Alice's win, then + 200 * 2.5 for Bob's loss
    assert_eq!(summary.casino_delta, 650);
    let alice = ledger.players().get(&Uuid::parse_str(ALICE).unwrap()).unwrap();
    assert_eq!(alice.balance(), 1100);
    assert_eq!(alice.win_rate().to_string(), "1.00");
    let bob = ledger.players().get(&Uuid::parse_str(BOB).unwrap()).unwrap();
    assert_eq!(bob.balance(), 800);
    assert_eq!(bob.win_rate().to_string(), "0.00");
}

#[test]
fn test_output_is_truncated_between_runs() {
    let dir = tempfile::tempdir().unwrap();
    let config = ProcessorConfig::in_dir(dir.path());
    write_lines(&config.player_data, &[format!("{ALICE},DEPOSIT,,10")]);
    fs::write(&config.output, "left over from a previous run\n".repeat(10)).unwrap();

    let (result, config) = run_in(dir.path());
    result.unwrap();
    assert_eq!(
        fs::read_to_string(&config.output).unwrap(),
        format!("{ALICE} 10 0.00\n\n0\n")
    );
}
