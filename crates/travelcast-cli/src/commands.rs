// Subcommand orchestration: config -> fixture feed -> core -> render.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use futures_util::future::join_all;
use tracing::{info, warn};

use travelcast_core::config::{ensure_config_files, load_config_from, Config};
use travelcast_core::fatigue::{build_travel_log, TravelRecord};
use travelcast_core::schedule::{group_by_team, next_round, parse_fixtures, Fixture};
use travelcast_core::sensitivity::apply_sensitivity;
use travelcast_feed::fixtures::{fetch_or_empty, FileFixtureSource, FixtureSource, HttpFixtureSource};
use travelcast_feed::weather::ForecastClient;

use crate::args::{Cli, Command, OutputFormat};
use crate::render::{self, WeatherRow};

pub async fn run<W: Write>(cli: Cli, out: &mut W) -> anyhow::Result<()> {
    let base_dir = match &cli.config_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("failed to read current directory")?,
    };
    let copied = ensure_config_files(&base_dir).context("failed to prepare config/")?;
    for path in &copied {
        info!("copied default config to {}", path.display());
    }
    let config = load_config_from(&base_dir).context("failed to load configuration")?;
    info!(
        "Config loaded: {} {}, {} venues, {} teams",
        config.league.name,
        config.league.season,
        config.venues.venue_count(),
        config.venues.team_count()
    );

    let fixtures = load_fixtures(&config, cli.fixture_file).await;

    match cli.command {
        Command::Travel { team, format } => {
            let log = travel_log(&config, &fixtures, team.as_deref());
            match format {
                OutputFormat::Table => render::write_travel_table(out, &log)?,
                OutputFormat::Json => render::write_travel_json(out, &log)?,
                OutputFormat::Csv => render::write_travel_csv(&mut *out, &log)?,
            }
        }
        Command::NextRound => {
            let now = Utc::now().with_timezone(&config.league.timezone);
            render::write_next_round(out, &next_round(&fixtures, now))?;
        }
        Command::Weather => {
            let now = Utc::now().with_timezone(&config.league.timezone);
            let games = next_round(&fixtures, now);
            let rows = weather_rows(&config, games).await;
            render::write_weather_table(out, &rows)?;
        }
    }

    Ok(())
}

/// Fetch and parse the season's fixtures. Feed failures yield an empty list.
pub async fn load_fixtures(config: &Config, fixture_file: Option<PathBuf>) -> Vec<Fixture> {
    let source: Box<dyn FixtureSource> = match fixture_file {
        Some(path) => Box::new(FileFixtureSource::new(path)),
        None => Box::new(HttpFixtureSource::new(config.league.feed_url.clone())),
    };
    info!("Loading fixtures from {}", source.describe());
    let raw = fetch_or_empty(source.as_ref()).await;
    let fixtures = parse_fixtures(&raw, config.league.timezone);
    info!("Loaded {} fixtures", fixtures.len());
    fixtures
}

/// Build the travel log, optionally restricted to one team.
pub fn travel_log(config: &Config, fixtures: &[Fixture], team: Option<&str>) -> Vec<TravelRecord> {
    let mut schedule = group_by_team(fixtures);
    if let Some(team) = team {
        schedule.retain(|name, _| name == team);
        if schedule.is_empty() {
            warn!("team '{team}' does not appear in the fixture");
        }
    }
    let log = build_travel_log(&schedule, &config.venues, &config.fatigue);
    let unresolved = log.iter().filter(|r| !r.is_resolved()).count();
    if unresolved > 0 {
        warn!("{unresolved} records need a manual venue check");
    }
    log
}

/// Fetch every game's forecast concurrently and apply the stat rules.
pub async fn weather_rows(config: &Config, games: Vec<Fixture>) -> Vec<WeatherRow> {
    let client = ForecastClient::from_config(config);
    if !client.has_api_key() {
        warn!("no OpenWeatherMap API key configured; forecasts unavailable");
    }

    let lookups = games.iter().map(|game| {
        let client = &client;
        async move {
            if !client.has_api_key() {
                return None;
            }
            let coords = config.venues.coords(&game.venue)?;
            match client
                .forecast_for(coords, game.kickoff.with_timezone(&Utc))
                .await
            {
                Ok(conditions) => conditions,
                Err(e) => {
                    warn!("forecast for {} failed: {e}", game.venue);
                    None
                }
            }
        }
    });
    let forecasts = join_all(lookups).await;

    games
        .into_iter()
        .zip(forecasts)
        .map(|(game, conditions)| WeatherRow {
            game,
            forecast: conditions.map(|c| (c, apply_sensitivity(&c))),
        })
        .collect()
}
