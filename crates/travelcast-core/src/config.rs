// Configuration loading and parsing (league.toml, venues.toml, credentials.toml).

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::fatigue::FatigueThresholds;
use crate::venues::{VenueReference, VenuesFile};

/// Environment variable that overrides `openweather_api_key`.
pub const OWM_API_KEY_ENV: &str = "OWM_API_KEY";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueConfig,
    pub fatigue: FatigueThresholds,
    pub weather: WeatherConfig,
    pub venues: VenueReference,
    pub credentials: CredentialsConfig,
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire league.toml file.
#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    league: LeagueSection,
    #[serde(default)]
    fatigue: FatigueThresholds,
    #[serde(default)]
    weather: WeatherConfig,
}

#[derive(Debug, Clone, Deserialize)]
struct LeagueSection {
    name: String,
    season: u16,
    timezone: String,
    feed_url: String,
}

#[derive(Debug, Clone)]
pub struct LeagueConfig {
    pub name: String,
    pub season: u16,
    /// Zone every kickoff is converted to before comparison.
    pub timezone: Tz,
    pub feed_url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub forecast_url: String,
    pub match_window_hours: u32,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            forecast_url: "https://api.openweathermap.org/data/2.5/forecast".into(),
            match_window_hours: 3,
        }
    }
}

// ---------------------------------------------------------------------------
// credentials.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CredentialsConfig {
    pub openweather_api_key: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/league.toml`,
/// `config/venues.toml`, and (optionally) `config/credentials.toml`,
/// all relative to the given `base_dir`.
///
/// Does not copy defaults; `load_config()` does that first.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- league.toml (required) ---
    let league_path = config_dir.join("league.toml");
    let league_file: LeagueFile = parse_file(&league_path)?;
    let timezone = league_file
        .league
        .timezone
        .parse::<Tz>()
        .map_err(|e| ConfigError::ValidationError {
            field: "league.timezone".into(),
            message: format!("unknown time zone {:?}: {e}", league_file.league.timezone),
        })?;
    let league = LeagueConfig {
        name: league_file.league.name,
        season: league_file.league.season,
        timezone,
        feed_url: league_file.league.feed_url,
    };

    // --- venues.toml (required) ---
    let venues_path = config_dir.join("venues.toml");
    let venues_file: VenuesFile = parse_file(&venues_path)?;
    validate_venues(&venues_file)?;
    let venues = VenueReference::from_file(venues_file);
    warn_unplaced_teams(&venues);

    // --- credentials.toml (optional) ---
    let credentials_path = config_dir.join("credentials.toml");
    let mut credentials: CredentialsConfig = if credentials_path.exists() {
        parse_file(&credentials_path)?
    } else {
        CredentialsConfig::default()
    };
    if let Ok(key) = std::env::var(OWM_API_KEY_ENV) {
        if !key.trim().is_empty() {
            credentials.openweather_api_key = Some(key);
        }
    }

    let config = Config {
        league,
        fatigue: league_file.fatigue,
        weather: league_file.weather,
        venues,
        credentials,
    };

    validate(&config)?;

    Ok(config)
}

/// Files seeded from `defaults/` on first run. credentials.toml is never
/// shipped; `defaults/credentials.toml.example` documents its layout.
const SEEDED_FILES: [&str; 2] = ["league.toml", "venues.toml"];

/// Copy any seeded file missing from `config/` out of `defaults/`.
/// Existing files are left alone. Returns the paths that were created.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.is_dir() {
        if config_dir.is_dir() {
            return Ok(Vec::new());
        }
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "neither defaults/ nor config/ directory found in {}; \
                 pass --config-dir pointing at the travelcast checkout",
                base_dir.display()
            ),
        });
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| copy_error("create", &config_dir, e))?;

    let mut copied = Vec::new();
    for name in SEEDED_FILES {
        let source = defaults_dir.join(name);
        let target = config_dir.join(name);
        if !source.is_file() || target.exists() {
            continue;
        }
        std::fs::copy(&source, &target).map_err(|e| copy_error("copy", &source, e))?;
        copied.push(target);
    }

    Ok(copied)
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Ensures default config files are copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn copy_error(action: &str, path: &Path, e: std::io::Error) -> ConfigError {
    ConfigError::DefaultsCopyError {
        message: format!("failed to {action} {}: {e}", path.display()),
    }
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn parse_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = read_file(path)?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_venues(file: &VenuesFile) -> Result<(), ConfigError> {
    for (name, entry) in &file.venues {
        if !(-90.0..=90.0).contains(&entry.lat) {
            return Err(ConfigError::ValidationError {
                field: format!("venues.{name}.lat"),
                message: format!("must be between -90 and 90, got {}", entry.lat),
            });
        }
        if !(-180.0..=180.0).contains(&entry.lon) {
            return Err(ConfigError::ValidationError {
                field: format!("venues.{name}.lon"),
                message: format!("must be between -180 and 180, got {}", entry.lon),
            });
        }
        if entry.region.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: format!("venues.{name}.region"),
                message: "must not be empty".into(),
            });
        }
    }

    Ok(())
}

/// A team whose home region holds no venue can never play at home. Not an
/// error, but every one of its matches will count as travel.
fn warn_unplaced_teams(venues: &VenueReference) {
    for (team, region) in venues.teams() {
        if !venues.venues().any(|v| v.region == region) {
            warn!("team '{team}' has home region '{region}' but no venue is in it");
        }
    }
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    let fatigue = &config.fatigue;
    if !(fatigue.long_travel_km > 0.0) {
        return Err(ConfigError::ValidationError {
            field: "fatigue.long_travel_km".into(),
            message: format!("must be > 0, got {}", fatigue.long_travel_km),
        });
    }
    if fatigue.short_rest_days <= 0 {
        return Err(ConfigError::ValidationError {
            field: "fatigue.short_rest_days".into(),
            message: format!("must be > 0, got {}", fatigue.short_rest_days),
        });
    }
    if !(fatigue.timezone_shift_hours > 0.0) {
        return Err(ConfigError::ValidationError {
            field: "fatigue.timezone_shift_hours".into(),
            message: format!("must be > 0, got {}", fatigue.timezone_shift_hours),
        });
    }

    if config.weather.match_window_hours == 0 {
        return Err(ConfigError::ValidationError {
            field: "weather.match_window_hours".into(),
            message: "must be > 0".into(),
        });
    }

    if config.league.feed_url.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "league.feed_url".into(),
            message: "must not be empty".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
