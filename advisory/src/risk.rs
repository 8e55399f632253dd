//! Country risk metrics.

use serde::{Deserialize, Serialize};

/// Number of decimal places the aggregated index is rounded to.
const INDEX_PRECISION: i32 = 4;

/// The four risk metrics tracked for each country.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskIndices {
    /// Level of crime (higher means more crime).
    pub crime_index: f64,

    /// Severity and risk of disasters (higher means worse).
    pub disaster_risk: f64,

    /// Level of corruption (higher means more).
    pub corruption_index: f64,

    /// Level of healthcare (higher means better).
    pub health: f64,
}

impl RiskIndices {
    /// Returns the mean of all four metrics, rounded to four decimal places.
    pub fn aggregate(&self) -> f64 {
        let mean = (self.corruption_index + self.crime_index + self.health + self.disaster_risk) / 4.0;
        round_to(mean, INDEX_PRECISION)
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
