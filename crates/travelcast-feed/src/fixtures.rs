// Fixture feed sources.
//
// The feed is a JSON array of game objects (fixturedownload.com layout).
// Records that do not deserialize are skipped one by one so a single bad
// entry never loses the whole season.

use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use serde_json::Value;
use tracing::{error, info, warn};

use travelcast_core::schedule::RawFixture;

use crate::error::FeedError;

/// Some feed hosts reject requests without a browser-like agent.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0";

/// Anything that can produce the season's raw fixture records.
#[async_trait]
pub trait FixtureSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<RawFixture>, FeedError>;

    /// Short human-readable description for logs.
    fn describe(&self) -> String;
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decode a feed body. The top level must be a JSON array; individual
/// entries that fail to deserialize are logged and dropped.
pub fn decode_fixtures(body: &str) -> Result<Vec<RawFixture>, FeedError> {
    let entries: Vec<Value> = serde_json::from_str(body)?;
    let total = entries.len();
    let fixtures: Vec<RawFixture> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(i, entry)| match serde_json::from_value::<RawFixture>(entry) {
            Ok(fixture) => Some(fixture),
            Err(e) => {
                warn!("skipping feed entry {i}: {e}");
                None
            }
        })
        .collect();
    info!(decoded = fixtures.len(), total, "decoded fixture feed");
    Ok(fixtures)
}

// ---------------------------------------------------------------------------
// HTTP source
// ---------------------------------------------------------------------------

pub struct HttpFixtureSource {
    http: reqwest::Client,
    url: String,
}

impl HttpFixtureSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl FixtureSource for HttpFixtureSource {
    async fn fetch(&self) -> Result<Vec<RawFixture>, FeedError> {
        let response = self
            .http
            .get(&self.url)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        decode_fixtures(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

// ---------------------------------------------------------------------------
// File source
// ---------------------------------------------------------------------------

/// Reads a saved copy of the feed from disk.
pub struct FileFixtureSource {
    path: PathBuf,
}

impl FileFixtureSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FixtureSource for FileFixtureSource {
    async fn fetch(&self) -> Result<Vec<RawFixture>, FeedError> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| FeedError::Io {
                path: self.path.clone(),
                source,
            })?;
        decode_fixtures(&body)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Fetch from `source`, turning any failure into "no fixtures".
pub async fn fetch_or_empty(source: &dyn FixtureSource) -> Vec<RawFixture> {
    match source.fetch().await {
        Ok(fixtures) => fixtures,
        Err(e) => {
            error!("failed to fetch fixtures from {}: {e}", source.describe());
            Vec::new()
        }
    }
}
