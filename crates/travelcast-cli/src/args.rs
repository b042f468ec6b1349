// Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "travelcast")]
#[command(about = "Travel fatigue and match-day weather signals for the league fixture")]
pub struct Cli {
    /// Directory holding config/ and defaults/ (defaults to the current directory).
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    /// Read the fixture from a saved feed file instead of the network.
    #[arg(long, global = true)]
    pub fixture_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Per-team travel fatigue log for the whole fixture.
    Travel {
        /// Only show this team (exact name as in the feed).
        #[arg(long)]
        team: Option<String>,

        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Games in the next round still to be played.
    NextRound,
    /// Kickoff forecast and stat adjustments for the next round.
    Weather,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_travel_with_filters() {
        let cli = Cli::try_parse_from([
            "travelcast",
            "--fixture-file",
            "feed.json",
            "travel",
            "--team",
            "Fremantle",
            "--format",
            "csv",
        ])
        .unwrap();
        assert_eq!(cli.fixture_file, Some(PathBuf::from("feed.json")));
        match cli.command {
            Command::Travel { team, format } => {
                assert_eq!(team.as_deref(), Some("Fremantle"));
                assert_eq!(format, OutputFormat::Csv);
            }
            other => panic!("expected travel, got {other:?}"),
        }
    }

    #[test]
    fn travel_defaults_to_table() {
        let cli = Cli::try_parse_from(["travelcast", "travel"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Travel {
                team: None,
                format: OutputFormat::Table
            }
        ));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["travelcast", "weather", "--config-dir", "/tmp/tc"]).unwrap();
        assert_eq!(cli.config_dir, Some(PathBuf::from("/tmp/tc")));
        assert!(matches!(cli.command, Command::Weather));
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["travelcast"]).is_err());
    }
}
