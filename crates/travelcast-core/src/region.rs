// Region and travel classification.
//
// Policy: a team is "at home" whenever the venue sits in the team's home
// region, and a move between two venues in the same region is never counted
// as travel. Missing reference data classifies conservatively as false.

use crate::venues::VenueReference;

// ---------------------------------------------------------------------------
// Coarse time-zone heuristic
// ---------------------------------------------------------------------------

/// Latitude south of which a venue is treated as "far south".
pub const FAR_SOUTH_LAT: f64 = -40.0;
/// Northern edge of the mid-south band.
pub const MID_SOUTH_LAT: f64 = -33.0;
/// Secondary split inside the mid-south band.
pub const MID_SOUTH_SPLIT_LAT: f64 = -35.0;

const FAR_SOUTH_OFFSET: f64 = 10.0;
const MID_SOUTH_NORTH_OFFSET: f64 = 10.5;
const MID_SOUTH_SOUTH_OFFSET: f64 = 8.0;
const DEFAULT_OFFSET: f64 = 10.0;

/// Estimate a UTC offset in hours from latitude alone.
///
/// This is a three-bucket approximation, not a time-zone lookup: it ignores
/// longitude entirely and misplaces several grounds relative to their real
/// zones. Callers compare offsets only to detect large jumps. Replace this
/// function, not its callers, when a real geo time-zone source is available.
pub fn coarse_timezone_offset(lat: f64) -> f64 {
    if lat < FAR_SOUTH_LAT {
        FAR_SOUTH_OFFSET
    } else if lat < MID_SOUTH_LAT {
        if lat > MID_SOUTH_SPLIT_LAT {
            MID_SOUTH_NORTH_OFFSET
        } else {
            MID_SOUTH_SOUTH_OFFSET
        }
    } else {
        DEFAULT_OFFSET
    }
}

// ---------------------------------------------------------------------------
// Home / region checks
// ---------------------------------------------------------------------------

/// True iff the venue's region equals the team's home region.
pub fn is_home_game(reference: &VenueReference, team: &str, venue: &str) -> bool {
    match (reference.team_region(team), reference.region(venue)) {
        (Some(home), Some(here)) => home == here,
        _ => false,
    }
}

/// True iff both venues resolve to the same known region.
pub fn same_region(reference: &VenueReference, venue_a: &str, venue_b: &str) -> bool {
    match (reference.region(venue_a), reference.region(venue_b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> VenueReference {
        VenueReference::new()
            .with_venue("MCG", -37.8199, 144.9834, "VIC")
            .with_venue("Marvel Stadium", -37.8165, 144.9475, "VIC")
            .with_venue("Optus Stadium", -31.9511, 115.8890, "WA")
            .with_team("Collingwood", "VIC")
            .with_team("Fremantle", "WA")
    }

    #[test]
    fn offset_buckets() {
        // Far south (Hobart).
        assert_eq!(coarse_timezone_offset(-42.88), 10.0);
        // Mid-south band, north of the split (Sydney).
        assert_eq!(coarse_timezone_offset(-33.89), 10.5);
        // Mid-south band, south of the split (Melbourne).
        assert_eq!(coarse_timezone_offset(-37.82), 8.0);
        // Everything further north (Perth, Brisbane, Darwin).
        assert_eq!(coarse_timezone_offset(-31.95), 10.0);
        assert_eq!(coarse_timezone_offset(-27.49), 10.0);
        assert_eq!(coarse_timezone_offset(-12.40), 10.0);
    }

    #[test]
    fn offset_boundaries() {
        assert_eq!(coarse_timezone_offset(FAR_SOUTH_LAT), MID_SOUTH_SOUTH_OFFSET);
        assert_eq!(coarse_timezone_offset(MID_SOUTH_SPLIT_LAT), MID_SOUTH_SOUTH_OFFSET);
        assert_eq!(coarse_timezone_offset(MID_SOUTH_LAT), DEFAULT_OFFSET);
    }

    #[test]
    fn home_game_by_region() {
        let r = reference();
        assert!(is_home_game(&r, "Collingwood", "MCG"));
        assert!(is_home_game(&r, "Collingwood", "Marvel Stadium"));
        assert!(!is_home_game(&r, "Collingwood", "Optus Stadium"));
        assert!(is_home_game(&r, "Fremantle", "Optus Stadium"));
    }

    #[test]
    fn missing_data_is_not_home() {
        let r = reference();
        assert!(!is_home_game(&r, "Unknown FC", "MCG"));
        assert!(!is_home_game(&r, "Collingwood", "Nowhere Oval"));
    }

    #[test]
    fn same_region_requires_both_known() {
        let r = reference();
        assert!(same_region(&r, "MCG", "Marvel Stadium"));
        assert!(same_region(&r, "MCG", "MCG"));
        assert!(!same_region(&r, "MCG", "Optus Stadium"));
        assert!(!same_region(&r, "MCG", "Nowhere Oval"));
        assert!(!same_region(&r, "Nowhere Oval", "Nowhere Oval"));
    }
}
