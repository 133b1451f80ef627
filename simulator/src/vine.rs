//! Soil water balance and vine phenology

use chrono::{Datelike, NaiveDate};
use shared::round2;

/// Base temperature for growing degree days
pub const GDD_BASE_TEMPERATURE_C: f64 = 10.0;

/// Single-bucket soil water balance.
///
/// The next day's moisture depends only on today's rain and yesterday's
/// moisture, so days must be simulated strictly in order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoilModel {
    pub decay: f64,
    pub infiltration: f64,
}

impl SoilModel {
    pub fn new(decay: f64, infiltration: f64) -> Self {
        Self {
            decay,
            infiltration,
        }
    }

    /// Moisture after one day, rounded to file precision and kept in [0, 100]
    pub fn next(&self, previous_percent: f64, precipitation_mm: f64) -> f64 {
        let moisture = previous_percent * (1.0 - self.decay) + precipitation_mm * self.infiltration;
        round2(moisture.clamp(0.0, 100.0))
    }
}

/// Growing degree days accumulated since 1 January, as a fraction of the
/// total the vines need to ripen.
#[derive(Debug, Clone)]
pub struct GrowthTracker {
    gdd_target: f64,
    year: Option<i32>,
    accumulated: f64,
}

impl GrowthTracker {
    pub fn new(gdd_target: f64) -> Self {
        Self {
            gdd_target,
            year: None,
            accumulated: 0.0,
        }
    }

    /// Add one day and return the growth index, in [0, 1]
    pub fn advance(&mut self, date: NaiveDate, temperature_c: f64) -> f64 {
        if self.year != Some(date.year()) {
            self.year = Some(date.year());
            self.accumulated = 0.0;
        }
        self.accumulated += (temperature_c - GDD_BASE_TEMPERATURE_C).max(0.0);
        round2((self.accumulated / self.gdd_target).min(1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soil_decays_without_rain() {
        let soil = SoilModel::new(0.1, 0.5);
        assert_eq!(soil.next(50.0, 0.0), 45.0);
    }

    #[test]
    fn test_soil_gains_from_rain() {
        let soil = SoilModel::new(0.1, 0.5);
        assert_eq!(soil.next(50.0, 10.0), 50.0);
    }

    #[test]
    fn test_soil_saturates_at_100() {
        let soil = SoilModel::new(0.0, 1.0);
        assert_eq!(soil.next(95.0, 40.0), 100.0);
    }

    #[test]
    fn test_growth_accumulates_above_base_only() {
        let mut growth = GrowthTracker::new(100.0);
        let d = |day| NaiveDate::from_ymd_opt(2024, 6, day).unwrap();

        assert_eq!(growth.advance(d(1), 8.0), 0.0);
        assert_eq!(growth.advance(d(2), 20.0), 0.1);
        assert_eq!(growth.advance(d(3), 30.0), 0.3);
    }

    #[test]
    fn test_growth_caps_at_one() {
        let mut growth = GrowthTracker::new(10.0);
        let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        assert_eq!(growth.advance(date, 40.0), 1.0);
    }

    #[test]
    fn test_growth_resets_on_new_year() {
        let mut growth = GrowthTracker::new(100.0);
        let dec31 = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        let jan1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        growth.advance(dec31, 60.0);
        assert_eq!(growth.advance(jan1, 15.0), 0.05);
    }
}
