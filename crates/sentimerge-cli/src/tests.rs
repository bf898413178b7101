use rust_decimal::Decimal;
use sentimerge_core::MonthlyCost;
use sentimerge_sentiment::{MergedEntities, MergedEntity, OverallSentiment};

use super::*;

#[test]
fn parses_analyze_command() {
    let cli = Cli::try_parse_from(["sentimerge-cli", "analyze", "the coffee was great"])
        .expect("expected valid cli args");

    match cli.command {
        Some(Commands::Analyze { text, compact }) => {
            assert_eq!(text, "the coffee was great");
            assert!(!compact);
        }
        other => panic!("expected analyze command, got: {other:?}"),
    }
}

#[test]
fn analyze_requires_text() {
    assert!(Cli::try_parse_from(["sentimerge-cli", "analyze"]).is_err());
}

#[test]
fn parses_cost_command_with_month() {
    let cli = Cli::try_parse_from(["sentimerge-cli", "cost", "--month", "2026-09"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Cost { month: Some(ref m) }) if m == "2026-09"
    ));
}

#[test]
fn parses_db_ping_command() {
    let cli = Cli::try_parse_from(["sentimerge-cli", "db", "ping"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Ping
        })
    ));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["sentimerge-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn render_pretty_prints_merged_entities() {
    let entity = MergedEntity {
        text: "coffee".to_string(),
        aws_score: Some(0.8),
        gcp_score: Some(0.4),
        overall_sentiment: Some(OverallSentiment::Positive),
    };
    let merged = MergedEntities {
        common_entities: vec![entity.clone()],
        entities: vec![entity],
    };

    let pretty = analyze::render(&merged, false).expect("render");
    assert!(pretty.contains('\n'));
    assert!(pretty.contains("\"overall_sentiment\": \"Positive\""));

    let compact = analyze::render(&merged, true).expect("render");
    assert!(!compact.contains('\n'));
}

#[test]
fn format_cost_flags_exhausted_budget() {
    let cost = MonthlyCost::with_units("2026-10", 10_000, 0);

    let lines = cost::format_cost(&cost, Decimal::ONE);
    assert_eq!(lines[0], "month:       2026-10");
    assert!(lines[3].starts_with("total:       $1 of $1"));
    assert!(lines.last().is_some_and(|l| l.starts_with("budget exhausted")));

    let lines = cost::format_cost(&cost, Decimal::TEN);
    assert_eq!(lines.len(), 4);
}
