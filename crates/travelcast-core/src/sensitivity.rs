// Weather -> stat sensitivity adjustments.
//
// Maps forecast rain, wind and humidity at kickoff to percentage adjustments
// for marks, goals and tackles, plus an "unders" rating for the game.

use serde::{Deserialize, Serialize};

/// Conditions at kickoff, as taken from a forecast.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WeatherConditions {
    /// Rain over the forecast window, in millimetres.
    pub rain_mm: f64,
    /// Wind speed in metres per second.
    pub wind_speed_ms: f64,
    /// Relative humidity, 0-100.
    pub humidity_pct: f64,
}

/// Whether the adjustments make the game a good "unders" candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UndersRating {
    GoodUnders,
    Skip,
}

impl UndersRating {
    pub fn label(&self) -> &'static str {
        match self {
            UndersRating::GoodUnders => "Good Unders",
            UndersRating::Skip => "Skip",
        }
    }
}

/// Coarse size of a single percentage adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
}

impl ImpactLevel {
    /// |pct| >= 30 is High, >= 15 is Medium, anything smaller is Low.
    pub fn from_adjustment(pct: i32) -> Self {
        match pct.unsigned_abs() {
            30.. => ImpactLevel::High,
            15..=29 => ImpactLevel::Medium,
            _ => ImpactLevel::Low,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ImpactLevel::Low => "Low",
            ImpactLevel::Medium => "Med",
            ImpactLevel::High => "High",
        }
    }
}

/// Percentage adjustments to expected stat totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatAdjustments {
    pub marks_pct: i32,
    pub goals_pct: i32,
    pub tackles_pct: i32,
    pub rating: UndersRating,
}

impl StatAdjustments {
    pub fn marks_impact(&self) -> ImpactLevel {
        ImpactLevel::from_adjustment(self.marks_pct)
    }

    pub fn goals_impact(&self) -> ImpactLevel {
        ImpactLevel::from_adjustment(self.goals_pct)
    }

    pub fn tackles_impact(&self) -> ImpactLevel {
        ImpactLevel::from_adjustment(self.tackles_pct)
    }
}

/// Apply the rain, wind and humidity rules. Each factor contributes
/// independently; within a factor only the highest matching tier applies.
pub fn apply_sensitivity(conditions: &WeatherConditions) -> StatAdjustments {
    let mut marks = 0;
    let mut goals = 0;
    let mut tackles = 0;

    // Rain
    if conditions.rain_mm >= 2.0 {
        marks -= 40;
        goals -= 20;
        tackles += 25;
    } else if conditions.rain_mm >= 1.0 {
        marks -= 25;
        goals -= 15;
        tackles += 15;
    }

    // Wind
    if conditions.wind_speed_ms >= 7.0 {
        goals -= 15;
    } else if conditions.wind_speed_ms >= 4.0 {
        goals -= 10;
    }

    // Humidity
    if conditions.humidity_pct >= 80.0 {
        marks -= 10;
        tackles += 10;
    }

    let rating = if marks <= -30 || tackles >= 20 || goals <= -20 {
        UndersRating::GoodUnders
    } else {
        UndersRating::Skip
    };

    StatAdjustments {
        marks_pct: marks,
        goals_pct: goals,
        tackles_pct: tackles,
        rating,
    }
}
