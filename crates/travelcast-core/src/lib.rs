// Library root for the travel fatigue engine and its reference data.
//
// Data flow: raw fixtures -> `schedule` (per-team chronological matches) ->
// `fatigue` (one TravelRecord per match) using `venues`, `geo` and `region`.

pub mod config;
pub mod fatigue;
pub mod geo;
pub mod region;
pub mod schedule;
pub mod sensitivity;
pub mod venues;
