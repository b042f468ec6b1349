// Schedule grouping: raw feed records -> games -> per-team / per-round lists.
//
// Kickoffs arrive as UTC strings and are converted to the league's zone
// before any chronological comparison. A record whose timestamp does not
// parse is skipped with a warning; it never aborts the batch.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Timestamp layout used by the fixture feed's `DateUtc` field.
pub const FEED_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%SZ";

/// Venue name substituted when a record carries no location.
pub const UNKNOWN_VENUE: &str = "Unknown";

/// Round number substituted when a record carries none.
pub const UNKNOWN_ROUND: i32 = -1;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("invalid kickoff timestamp {value:?}: {source}")]
    InvalidTimestamp {
        value: String,
        source: chrono::ParseError,
    },
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One game exactly as the fixture feed describes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawFixture {
    #[serde(default)]
    pub match_number: Option<u32>,
    #[serde(default)]
    pub round_number: Option<i32>,
    pub date_utc: String,
    #[serde(default)]
    pub location: Option<String>,
    pub home_team: String,
    pub away_team: String,
}

/// A game with its kickoff resolved to the league's zone.
#[derive(Debug, Clone, PartialEq)]
pub struct Fixture {
    pub round: i32,
    pub home_team: String,
    pub away_team: String,
    pub venue: String,
    pub kickoff: DateTime<Tz>,
}

/// One side's view of a game.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub team: String,
    pub opponent: String,
    pub venue: String,
    pub kickoff: DateTime<Tz>,
    pub round: i32,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse a feed timestamp (`YYYY-MM-DD HH:MM:SSZ`, UTC) into the given zone.
pub fn parse_kickoff(value: &str, tz: Tz) -> Result<DateTime<Tz>, ScheduleError> {
    let naive = NaiveDateTime::parse_from_str(value.trim(), FEED_TIMESTAMP_FORMAT).map_err(
        |source| ScheduleError::InvalidTimestamp {
            value: value.to_string(),
            source,
        },
    )?;
    Ok(naive.and_utc().with_timezone(&tz))
}

impl RawFixture {
    /// Resolve this record into a `Fixture` in the given zone.
    pub fn resolve(&self, tz: Tz) -> Result<Fixture, ScheduleError> {
        let kickoff = parse_kickoff(&self.date_utc, tz)?;
        Ok(Fixture {
            round: self.round_number.unwrap_or(UNKNOWN_ROUND),
            home_team: self.home_team.clone(),
            away_team: self.away_team.clone(),
            venue: self
                .location
                .clone()
                .unwrap_or_else(|| UNKNOWN_VENUE.to_string()),
            kickoff,
        })
    }
}

/// Resolve every record, skipping (and logging) those that fail to parse.
/// Output order follows input order.
pub fn parse_fixtures(raw: &[RawFixture], tz: Tz) -> Vec<Fixture> {
    let mut fixtures = Vec::with_capacity(raw.len());
    for record in raw {
        match record.resolve(tz) {
            Ok(fixture) => fixtures.push(fixture),
            Err(e) => warn!(
                "skipping {} vs {}: {}",
                record.home_team, record.away_team, e
            ),
        }
    }
    debug!(parsed = fixtures.len(), total = raw.len(), "parsed fixtures");
    fixtures
}

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

impl Fixture {
    /// The two per-side `Match` entries for this game, home side first.
    pub fn sides(&self) -> [Match; 2] {
        [
            Match {
                team: self.home_team.clone(),
                opponent: self.away_team.clone(),
                venue: self.venue.clone(),
                kickoff: self.kickoff,
                round: self.round,
            },
            Match {
                team: self.away_team.clone(),
                opponent: self.home_team.clone(),
                venue: self.venue.clone(),
                kickoff: self.kickoff,
                round: self.round,
            },
        ]
    }
}

/// Every team's matches in chronological order, keyed by team name.
///
/// Sorting is stable, so two matches with the same kickoff keep feed order.
pub fn group_by_team(fixtures: &[Fixture]) -> BTreeMap<String, Vec<Match>> {
    let mut teams: BTreeMap<String, Vec<Match>> = BTreeMap::new();
    for fixture in fixtures {
        for side in fixture.sides() {
            teams.entry(side.team.clone()).or_default().push(side);
        }
    }
    for matches in teams.values_mut() {
        matches.sort_by_key(|m| m.kickoff);
    }
    teams
}

/// Games grouped by round number, each round in kickoff order.
pub fn group_by_round(fixtures: &[Fixture]) -> BTreeMap<i32, Vec<Fixture>> {
    let mut rounds: BTreeMap<i32, Vec<Fixture>> = BTreeMap::new();
    for fixture in fixtures {
        rounds.entry(fixture.round).or_default().push(fixture.clone());
    }
    for games in rounds.values_mut() {
        games.sort_by_key(|f| f.kickoff);
    }
    rounds
}

/// The games of the next round to start after `now`.
///
/// Only games still to be played are considered; of the rounds that have
/// any, the one with the earliest kickoff wins. Empty when nothing is left.
pub fn next_round(fixtures: &[Fixture], now: DateTime<Tz>) -> Vec<Fixture> {
    let upcoming: Vec<Fixture> = fixtures
        .iter()
        .filter(|f| f.kickoff > now)
        .cloned()
        .collect();

    group_by_round(&upcoming)
        .into_values()
        .filter_map(|games| Some((games.first()?.kickoff, games)))
        .min_by_key(|(first, _)| *first)
        .map(|(_, games)| games)
        .unwrap_or_default()
}
