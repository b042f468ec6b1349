// OpenWeatherMap 5-day / 3-hour forecast client.
//
// Fetches the forecast for a ground and picks the entry closest to kickoff,
// provided it falls strictly inside the configured window.

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use travelcast_core::config::Config;
use travelcast_core::geo::Coordinates;
use travelcast_core::sensitivity::WeatherConditions;

use crate::error::FeedError;

/// Layout of the forecast's `dt_txt` field (UTC, no zone suffix).
const FORECAST_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ---------------------------------------------------------------------------
// Response shape (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    list: Vec<RawEntry>,
}

#[derive(Debug, Deserialize)]
struct RawEntry {
    dt_txt: String,
    main: RawMain,
    wind: RawWind,
    #[serde(default)]
    rain: Option<RawRain>,
}

#[derive(Debug, Deserialize)]
struct RawMain {
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct RawWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct RawRain {
    #[serde(rename = "3h", default)]
    three_hour: f64,
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One forecast slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEntry {
    pub at: DateTime<Utc>,
    pub conditions: WeatherConditions,
}

/// Parse a forecast response body. Slots with an unreadable timestamp are
/// dropped.
pub fn parse_forecast(body: &str) -> Result<Vec<ForecastEntry>, FeedError> {
    let response: ForecastResponse = serde_json::from_str(body)?;
    let entries = response
        .list
        .into_iter()
        .filter_map(|raw| {
            match NaiveDateTime::parse_from_str(&raw.dt_txt, FORECAST_TIMESTAMP_FORMAT) {
                Ok(naive) => Some(ForecastEntry {
                    at: naive.and_utc(),
                    conditions: WeatherConditions {
                        rain_mm: raw.rain.map(|r| r.three_hour).unwrap_or(0.0),
                        wind_speed_ms: raw.wind.speed,
                        humidity_pct: raw.main.humidity,
                    },
                }),
                Err(e) => {
                    warn!("skipping forecast slot {:?}: {e}", raw.dt_txt);
                    None
                }
            }
        })
        .collect();
    Ok(entries)
}

/// The conditions of the slot nearest `kickoff`, if one lies strictly within
/// `window` of it. Ties go to the earlier slot in the list.
pub fn nearest_forecast(
    entries: &[ForecastEntry],
    kickoff: DateTime<Utc>,
    window: TimeDelta,
) -> Option<WeatherConditions> {
    let mut best: Option<(&ForecastEntry, TimeDelta)> = None;
    for entry in entries {
        let diff = (entry.at - kickoff).abs();
        let limit = best.map_or(window, |(_, d)| d);
        if diff < limit {
            best = Some((entry, diff));
        }
    }
    best.map(|(entry, _)| entry.conditions)
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct ForecastClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    window: TimeDelta,
}

impl ForecastClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>, window_hours: u32) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key,
            window: TimeDelta::hours(i64::from(window_hours)),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.weather.forecast_url.clone(),
            config.credentials.openweather_api_key.clone(),
            config.weather.match_window_hours,
        )
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Fetch every forecast slot for a location.
    pub async fn fetch_entries(&self, coords: Coordinates) -> Result<Vec<ForecastEntry>, FeedError> {
        let api_key = self.api_key.as_deref().ok_or(FeedError::MissingApiKey)?;

        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("lat", coords.lat.to_string()),
                ("lon", coords.lon.to_string()),
                ("appid", api_key.to_string()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                url: self.base_url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let entries = parse_forecast(&body)?;
        debug!(slots = entries.len(), lat = coords.lat, lon = coords.lon, "fetched forecast");
        Ok(entries)
    }

    /// Conditions expected at kickoff, or `None` when no slot is close enough.
    pub async fn forecast_for(
        &self,
        coords: Coordinates,
        kickoff: DateTime<Utc>,
    ) -> Result<Option<WeatherConditions>, FeedError> {
        let entries = self.fetch_entries(coords).await?;
        Ok(nearest_forecast(&entries, kickoff, self.window))
    }
}
