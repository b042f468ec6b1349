// End-to-end tests for the travelcast subcommands, driven from a saved feed
// file and a scratch config directory seeded from the shipped defaults.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;

use travelcast_cli::args::Cli;
use travelcast_cli::commands;

fn repo_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
}

fn feed_sample() -> PathBuf {
    repo_root().join("crates/travelcast-core/tests/fixtures/feed_sample.json")
}

/// Scratch base dir holding only defaults/, so `run` must copy config/ itself.
fn scratch_base(name: &str) -> PathBuf {
    let tmp = std::env::temp_dir().join(name);
    let _ = fs::remove_dir_all(&tmp);
    fs::create_dir_all(tmp.join("defaults")).unwrap();
    for file in ["league.toml", "venues.toml"] {
        fs::copy(
            repo_root().join("defaults").join(file),
            tmp.join("defaults").join(file),
        )
        .unwrap();
    }
    tmp
}

async fn run_cli(base: &Path, args: &[&str]) -> String {
    let mut argv = vec![
        "travelcast".to_string(),
        "--config-dir".to_string(),
        base.display().to_string(),
        "--fixture-file".to_string(),
        feed_sample().display().to_string(),
    ];
    argv.extend(args.iter().map(|s| s.to_string()));
    let cli = Cli::try_parse_from(argv).expect("args should parse");

    let mut out = Vec::new();
    commands::run(cli, &mut out).await.expect("command should succeed");
    String::from_utf8(out).unwrap()
}

#[tokio::test]
async fn travel_json_covers_every_side_of_every_game() {
    let base = scratch_base("travelcast_cli_travel_json");
    let text = run_cli(&base, &["travel", "--format", "json"]).await;

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let records = value.as_array().unwrap();
    // Eight feed records, one with a bad timestamp: seven games, two sides each.
    assert_eq!(records.len(), 14);
    assert!(base.join("config/venues.toml").exists());

    let unknown: Vec<_> = records
        .iter()
        .filter(|r| r["venue"] == "Hands Oval")
        .collect();
    assert_eq!(unknown.len(), 2);
    assert!(unknown.iter().all(|r| r["fatigue_score"].is_null()));

    let _ = fs::remove_dir_all(&base);
}

#[tokio::test]
async fn travel_table_for_one_team() {
    let base = scratch_base("travelcast_cli_travel_team");
    let text = run_cli(&base, &["travel", "--team", "West Coast Eagles"]).await;

    let lines: Vec<&str> = text.lines().collect();
    // Header, rule, three matches.
    assert_eq!(lines.len(), 5);
    assert!(lines[2..].iter().all(|l| l.starts_with("West Coast Eagles")));
    assert!(lines[3].ends_with("Short rest; Back-to-back travel; Time zone shift"));

    let _ = fs::remove_dir_all(&base);
}

#[tokio::test]
async fn travel_csv_has_header_plus_rows() {
    let base = scratch_base("travelcast_cli_travel_csv");
    let text = run_cli(&base, &["travel", "--team", "Collingwood", "--format", "csv"]).await;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("team,round,opponent"));
    assert!(lines[2].contains("Manual Check Required"));

    let _ = fs::remove_dir_all(&base);
}

#[tokio::test]
async fn finished_season_has_no_next_round() {
    let base = scratch_base("travelcast_cli_next_round");
    let text = run_cli(&base, &["next-round"]).await;
    assert_eq!(text.trim(), "No upcoming fixtures found.");

    let text = run_cli(&base, &["weather"]).await;
    // Header and rule only.
    assert_eq!(text.lines().count(), 2);

    let _ = fs::remove_dir_all(&base);
}

#[tokio::test]
async fn missing_feed_file_is_empty_input() {
    let base = scratch_base("travelcast_cli_missing_feed");
    let cli = Cli::try_parse_from([
        "travelcast",
        "--config-dir",
        &base.display().to_string(),
        "--fixture-file",
        "/no/such/feed.json",
        "travel",
        "--format",
        "json",
    ])
    .unwrap();
    let mut out = Vec::new();
    commands::run(cli, &mut out).await.unwrap();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert!(value.as_array().unwrap().is_empty());

    let _ = fs::remove_dir_all(&base);
}
