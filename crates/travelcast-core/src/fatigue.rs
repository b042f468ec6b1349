// Travel fatigue engine.
//
// Folds one team's chronologically ordered matches left to right, carrying a
// `TeamTravelState` between steps, and emits one `TravelRecord` per match.
// Every team gets a fresh state; nothing is shared between folds.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::geo::{haversine_km, Coordinates};
use crate::region::{coarse_timezone_offset, is_home_game, same_region};
use crate::schedule::Match;
use crate::venues::VenueReference;

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Distance beyond which a leg counts as long travel.
pub const LONG_TRAVEL_KM: f64 = 1500.0;
/// Fewer whole days than this between kickoffs counts as short rest.
pub const SHORT_REST_DAYS: i64 = 6;
/// Estimated offset change (hours) that counts as a time-zone shift.
pub const TIMEZONE_SHIFT_HOURS: f64 = 2.0;

/// Cutoffs for the individual fatigue conditions (`[fatigue]` in league.toml).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FatigueThresholds {
    pub long_travel_km: f64,
    pub short_rest_days: i64,
    pub timezone_shift_hours: f64,
}

impl Default for FatigueThresholds {
    fn default() -> Self {
        Self {
            long_travel_km: LONG_TRAVEL_KM,
            short_rest_days: SHORT_REST_DAYS,
            timezone_shift_hours: TIMEZONE_SHIFT_HOURS,
        }
    }
}

// ---------------------------------------------------------------------------
// Flags
// ---------------------------------------------------------------------------

/// One independently triggered fatigue condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FatigueFlag {
    LongTravel,
    ShortRest,
    BackToBackTravel,
    TimezoneShift,
}

impl FatigueFlag {
    /// All flags, in the order their notes are reported.
    pub const ALL: [FatigueFlag; 4] = [
        FatigueFlag::LongTravel,
        FatigueFlag::ShortRest,
        FatigueFlag::BackToBackTravel,
        FatigueFlag::TimezoneShift,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FatigueFlag::LongTravel => "Long travel",
            FatigueFlag::ShortRest => "Short rest",
            FatigueFlag::BackToBackTravel => "Back-to-back travel",
            FatigueFlag::TimezoneShift => "Time zone shift",
        }
    }
}

// ---------------------------------------------------------------------------
// Output record
// ---------------------------------------------------------------------------

/// Fatigue assessment for one (team, match) pair.
///
/// The `Option` fields are `None` only when the venue could not be resolved;
/// a computed "no" is `Some(false)` / `Some(0.0)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TravelRecord {
    pub team: String,
    pub opponent: String,
    pub round: i32,
    pub venue: String,
    pub kickoff: DateTime<FixedOffset>,
    /// Distance travelled since the previous match, rounded to 0.1 km.
    pub distance_km: Option<f64>,
    pub short_rest: Option<bool>,
    pub back_to_back_travel: Option<bool>,
    pub timezone_change: Option<bool>,
    /// Number of raised flags (0-4).
    pub fatigue_score: Option<u8>,
    /// One entry per raised flag, in `FatigueFlag::ALL` order.
    pub notes: Vec<String>,
}

impl TravelRecord {
    fn unresolved(m: &Match) -> Self {
        Self {
            team: m.team.clone(),
            opponent: m.opponent.clone(),
            round: m.round,
            venue: m.venue.clone(),
            kickoff: m.kickoff.fixed_offset(),
            distance_km: None,
            short_rest: None,
            back_to_back_travel: None,
            timezone_change: None,
            fatigue_score: None,
            notes: vec![format!("Manual Check Required: Unknown venue '{}'", m.venue)],
        }
    }

    fn resolved(m: &Match, leg: &Leg, flags: &[FatigueFlag]) -> Self {
        Self {
            team: m.team.clone(),
            opponent: m.opponent.clone(),
            round: m.round,
            venue: m.venue.clone(),
            kickoff: m.kickoff.fixed_offset(),
            distance_km: Some((leg.distance_km * 10.0).round() / 10.0),
            short_rest: Some(leg.short_rest),
            back_to_back_travel: Some(leg.back_to_back_travel),
            timezone_change: Some(leg.timezone_change),
            fatigue_score: Some(flags.len() as u8),
            notes: flags.iter().map(|f| f.label().to_string()).collect(),
        }
    }

    /// Whether the venue resolved and the fatigue fields were computed.
    pub fn is_resolved(&self) -> bool {
        self.fatigue_score.is_some()
    }
}

// ---------------------------------------------------------------------------
// Fold state
// ---------------------------------------------------------------------------

/// What one team's fold remembers about its previous match.
#[derive(Debug, Default)]
struct TeamTravelState {
    last_venue: Option<String>,
    last_kickoff: Option<DateTime<Tz>>,
    last_trip_was_real_travel: bool,
    last_match_was_home: bool,
}

/// The measured leg into the current match, before thresholds apply.
#[derive(Debug)]
struct Leg {
    distance_km: f64,
    short_rest: bool,
    back_to_back_travel: bool,
    timezone_change: bool,
}

impl Leg {
    fn flags(&self, thresholds: &FatigueThresholds) -> Vec<FatigueFlag> {
        FatigueFlag::ALL
            .into_iter()
            .filter(|flag| match flag {
                FatigueFlag::LongTravel => self.distance_km > thresholds.long_travel_km,
                FatigueFlag::ShortRest => self.short_rest,
                FatigueFlag::BackToBackTravel => self.back_to_back_travel,
                FatigueFlag::TimezoneShift => self.timezone_change,
            })
            .collect()
    }
}

impl TeamTravelState {
    fn step(
        &mut self,
        m: &Match,
        reference: &VenueReference,
        thresholds: &FatigueThresholds,
    ) -> TravelRecord {
        let Some(here) = reference.coords(&m.venue) else {
            warn!(
                team = %m.team,
                round = m.round,
                "unknown venue '{}', fatigue not computed",
                m.venue
            );
            self.last_venue = Some(m.venue.clone());
            self.last_kickoff = Some(m.kickoff);
            self.last_trip_was_real_travel = false;
            self.last_match_was_home = false;
            return TravelRecord::unresolved(m);
        };

        let at_home = is_home_game(reference, &m.team, &m.venue);
        let moved_within_region = self
            .last_venue
            .as_deref()
            .is_some_and(|prev| same_region(reference, &m.venue, prev));
        let real_travel = !at_home && !moved_within_region;

        let prev = self.last_venue.as_deref().and_then(|v| reference.coords(v));
        let (distance_km, timezone_change, short_rest) = match prev {
            Some(prev) => (
                if real_travel { haversine_km(prev, here) } else { 0.0 },
                real_travel && self.timezone_shift(prev, here, thresholds),
                self.last_kickoff
                    .is_some_and(|last| (m.kickoff - last).num_days() < thresholds.short_rest_days),
            ),
            None => (0.0, false, false),
        };

        let leg = Leg {
            distance_km,
            short_rest,
            back_to_back_travel: self.last_trip_was_real_travel
                && real_travel
                && !self.last_match_was_home,
            timezone_change,
        };
        let flags = leg.flags(thresholds);

        self.last_venue = Some(m.venue.clone());
        self.last_kickoff = Some(m.kickoff);
        self.last_trip_was_real_travel = real_travel;
        self.last_match_was_home = at_home;

        TravelRecord::resolved(m, &leg, &flags)
    }

    fn timezone_shift(
        &self,
        prev: Coordinates,
        here: Coordinates,
        thresholds: &FatigueThresholds,
    ) -> bool {
        let delta = coarse_timezone_offset(prev.lat) - coarse_timezone_offset(here.lat);
        delta.abs() >= thresholds.timezone_shift_hours
    }
}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Annotate one team's matches, which must already be in kickoff order.
///
/// Returns exactly one record per match, in input order.
pub fn travel_log_for_team(
    matches: &[Match],
    reference: &VenueReference,
    thresholds: &FatigueThresholds,
) -> Vec<TravelRecord> {
    let mut state = TeamTravelState::default();
    matches
        .iter()
        .map(|m| state.step(m, reference, thresholds))
        .collect()
}

/// Annotate every team's schedule (as produced by `group_by_team`).
///
/// Teams appear in key order; within a team, records follow kickoff order.
pub fn build_travel_log(
    schedule: &BTreeMap<String, Vec<Match>>,
    reference: &VenueReference,
    thresholds: &FatigueThresholds,
) -> Vec<TravelRecord> {
    let mut log = Vec::new();
    for (team, matches) in schedule {
        let records = travel_log_for_team(matches, reference, thresholds);
        debug!(
            team = %team,
            matches = records.len(),
            unresolved = records.iter().filter(|r| !r.is_resolved()).count(),
            "travel fold complete"
        );
        log.extend(records);
    }
    log
}
