// Venue reference tables: venue -> coordinates/region, team -> home region.
//
// Lookups are exact and case-sensitive. A venue or team missing from the
// tables is an expected state, so every accessor returns an Option.

use std::collections::HashMap;

use serde::Deserialize;

use crate::geo::Coordinates;

/// A ground the league plays at. Its name is the lookup key.
#[derive(Debug, Clone, PartialEq)]
pub struct Venue {
    pub coords: Coordinates,
    /// Coarse region label (state/territory), e.g. "VIC".
    pub region: String,
}

/// Raw `[venues."<name>"]` entry in venues.toml.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct VenueEntry {
    pub lat: f64,
    pub lon: f64,
    pub region: String,
}

/// Raw deserialization target for the entire venues.toml file.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct VenuesFile {
    #[serde(default)]
    pub venues: HashMap<String, VenueEntry>,
    #[serde(default)]
    pub teams: HashMap<String, String>,
}

/// Read-only lookup over venues and team home regions.
#[derive(Debug, Clone, Default)]
pub struct VenueReference {
    venues: HashMap<String, Venue>,
    team_regions: HashMap<String, String>,
}

impl VenueReference {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a venue.
    pub fn with_venue(mut self, name: &str, lat: f64, lon: f64, region: &str) -> Self {
        self.venues.insert(
            name.to_string(),
            Venue {
                coords: Coordinates::new(lat, lon),
                region: region.to_string(),
            },
        );
        self
    }

    /// Assign a team's home region.
    pub fn with_team(mut self, team: &str, region: &str) -> Self {
        self.team_regions.insert(team.to_string(), region.to_string());
        self
    }

    pub(crate) fn from_file(file: VenuesFile) -> Self {
        let venues = file
            .venues
            .into_iter()
            .map(|(name, entry)| {
                let venue = Venue {
                    coords: Coordinates::new(entry.lat, entry.lon),
                    region: entry.region,
                };
                (name, venue)
            })
            .collect();
        Self {
            venues,
            team_regions: file.teams,
        }
    }

    pub fn coords(&self, venue: &str) -> Option<Coordinates> {
        self.venues.get(venue).map(|v| v.coords)
    }

    pub fn region(&self, venue: &str) -> Option<&str> {
        self.venues.get(venue).map(|v| v.region.as_str())
    }

    pub fn team_region(&self, team: &str) -> Option<&str> {
        self.team_regions.get(team).map(String::as_str)
    }

    /// All venues, in no particular order.
    pub fn venues(&self) -> impl Iterator<Item = &Venue> {
        self.venues.values()
    }

    /// All (team, region) pairs, in no particular order.
    pub fn teams(&self) -> impl Iterator<Item = (&str, &str)> {
        self.team_regions
            .iter()
            .map(|(team, region)| (team.as_str(), region.as_str()))
    }

    pub fn venue_count(&self) -> usize {
        self.venues.len()
    }

    pub fn team_count(&self) -> usize {
        self.team_regions.len()
    }
}
