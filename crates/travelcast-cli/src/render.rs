// Output formatting for the travel log, next round and weather summary.
//
// Everything writes to a caller-supplied `Write` so the same code serves
// stdout and tests.

use std::io::{self, Write};

use serde::Serialize;

use travelcast_core::fatigue::TravelRecord;
use travelcast_core::schedule::Fixture;
use travelcast_core::sensitivity::{ImpactLevel, StatAdjustments, WeatherConditions};

const KICKOFF_FORMAT: &str = "%A %d %B, %I:%M %p";

// ---------------------------------------------------------------------------
// Travel log
// ---------------------------------------------------------------------------

/// "N/A" when the score could not be computed.
pub fn fatigue_display(record: &TravelRecord) -> String {
    match record.fatigue_score {
        Some(score) => score.to_string(),
        None => "N/A".to_string(),
    }
}

pub fn write_travel_table<W: Write>(out: &mut W, records: &[TravelRecord]) -> io::Result<()> {
    writeln!(
        out,
        "{:<18} {:<5} {:<18} {:<25} {:<7} Notes",
        "Team", "Round", "Opponent", "Venue", "Fatigue"
    )?;
    writeln!(out, "{}", "-".repeat(95))?;
    for r in records {
        writeln!(
            out,
            "{:<18} {:<5} {:<18} {:<25} {:<7} {}",
            r.team,
            r.round,
            r.opponent,
            r.venue,
            fatigue_display(r),
            r.notes.join("; ")
        )?;
    }
    Ok(())
}

pub fn write_travel_json<W: Write>(out: &mut W, records: &[TravelRecord]) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(&mut *out, records)?;
    writeln!(out).map_err(serde_json::Error::io)
}

/// Flat row for CSV export; notes are joined into a single column.
#[derive(Debug, Serialize)]
struct TravelRow<'a> {
    team: &'a str,
    round: i32,
    opponent: &'a str,
    venue: &'a str,
    kickoff: String,
    distance_km: Option<f64>,
    short_rest: Option<bool>,
    back_to_back_travel: Option<bool>,
    timezone_change: Option<bool>,
    fatigue_score: Option<u8>,
    notes: String,
}

pub fn write_travel_csv<W: Write>(out: W, records: &[TravelRecord]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(out);
    for r in records {
        writer.serialize(TravelRow {
            team: &r.team,
            round: r.round,
            opponent: &r.opponent,
            venue: &r.venue,
            kickoff: r.kickoff.to_rfc3339(),
            distance_km: r.distance_km,
            short_rest: r.short_rest,
            back_to_back_travel: r.back_to_back_travel,
            timezone_change: r.timezone_change,
            fatigue_score: r.fatigue_score,
            notes: r.notes.join("; "),
        })?;
    }
    writer.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Next round
// ---------------------------------------------------------------------------

pub fn write_next_round<W: Write>(out: &mut W, games: &[Fixture]) -> io::Result<()> {
    let Some(first) = games.first() else {
        return writeln!(out, "No upcoming fixtures found.");
    };
    writeln!(out, "Next Round ({}): {} matches", first.round, games.len())?;
    for g in games {
        writeln!(
            out,
            "{} vs {} - {} at {}",
            g.home_team,
            g.away_team,
            g.kickoff.format(KICKOFF_FORMAT),
            g.venue
        )?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Weather summary
// ---------------------------------------------------------------------------

/// One game's weather outcome. `forecast` is `None` when no forecast could
/// be obtained (unknown venue, API failure, or no slot near kickoff).
#[derive(Debug, Clone)]
pub struct WeatherRow {
    pub game: Fixture,
    pub forecast: Option<(WeatherConditions, StatAdjustments)>,
}

/// A percentage adjustment with its impact level, e.g. "-40% High".
fn adjustment_cell(pct: i32, impact: ImpactLevel) -> String {
    format!("{pct:>4}% {:<4}", impact.label())
}

pub fn write_weather_table<W: Write>(out: &mut W, rows: &[WeatherRow]) -> io::Result<()> {
    writeln!(
        out,
        "{:<40} | Rain | Wind | Humid | {:<10} | {:<10} | {:<10} | Rating",
        "Match", "Marks", "Goals", "Tackles"
    )?;
    writeln!(out, "{}", "-".repeat(110))?;
    for row in rows {
        let title = format!("{} vs {}", row.game.home_team, row.game.away_team);
        match &row.forecast {
            Some((c, adj)) => writeln!(
                out,
                "{:<40} | {:>4.1} | {:>4.1} | {:>4.0}% | {} | {} | {} | {}",
                title,
                c.rain_mm,
                c.wind_speed_ms,
                c.humidity_pct,
                adjustment_cell(adj.marks_pct, adj.marks_impact()),
                adjustment_cell(adj.goals_pct, adj.goals_impact()),
                adjustment_cell(adj.tackles_pct, adj.tackles_impact()),
                adj.rating.label()
            )?,
            None => writeln!(out, "{:<40} | No forecast data", title)?,
        }
    }
    Ok(())
}
