//! Plausibility checks and climate thresholds
//!
//! The bounds below are the physical envelope every generated row must stay in.

use chrono::Duration;
use thiserror::Error;

use crate::models::DailyRecord;

// ============================================================================
// Climate Thresholds
// ============================================================================

/// Days above this temperature count as extreme heat
pub const EXTREME_HEAT_C: f64 = 35.0;

/// Days below this temperature count as frost
pub const FROST_C: f64 = 5.0;

/// Days above this precipitation count as torrential rain
pub const EXTREME_RAIN_MM: f64 = 20.0;

/// Disease pressure needs warm and humid conditions together
pub const DISEASE_RISK_TEMP_C: f64 = 25.0;
pub const DISEASE_RISK_HUMIDITY_PERCENT: f64 = 80.0;

pub fn is_extreme_heat(temperature_c: f64) -> bool {
    temperature_c > EXTREME_HEAT_C
}

pub fn is_frost(temperature_c: f64) -> bool {
    temperature_c < FROST_C
}

pub fn is_extreme_rain(precipitation_mm: f64) -> bool {
    precipitation_mm > EXTREME_RAIN_MM
}

/// Warm, humid day favourable to downy mildew and botrytis
pub fn is_disease_risk(temperature_c: f64, humidity_percent: f64) -> bool {
    temperature_c > DISEASE_RISK_TEMP_C && humidity_percent > DISEASE_RISK_HUMIDITY_PERCENT
}

// ============================================================================
// Record Bounds
// ============================================================================

pub const MIN_SOLAR_IRRADIANCE_W_M2: f64 = 20.0;
pub const MIN_YIELD_KG_HA: f64 = 8000.0;
pub const MAX_YIELD_KG_HA: f64 = 15000.0;
pub const MIN_SUGAR_LEVEL: f64 = 15.0;
pub const MAX_SUGAR_LEVEL: f64 = 19.5;
pub const MIN_PRODUCTION_COST_EUR_HA: f64 = 8000.0;
pub const MIN_SELLING_PRICE_EUR_KG: f64 = 3.5;
pub const MAX_SELLING_PRICE_EUR_KG: f64 = 6.0;

/// A record field outside its plausible range
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{field} = {value} on {date} is outside [{min}, {max}]")]
pub struct BoundsViolation {
    pub date: chrono::NaiveDate,
    pub field: &'static str,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

/// Validate that every numeric field of a record is physically plausible
pub fn check_bounds(record: &DailyRecord) -> Result<(), BoundsViolation> {
    let checks: [(&'static str, f64, f64, f64); 10] = [
        ("humidity_percent", record.humidity_percent, 0.0, 100.0),
        ("precipitation_mm", record.precipitation_mm, 0.0, f64::INFINITY),
        (
            "solar_irradiance_w_m2",
            record.solar_irradiance_w_m2,
            MIN_SOLAR_IRRADIANCE_W_M2,
            f64::INFINITY,
        ),
        ("soil_moisture_percent", record.soil_moisture_percent, 0.0, 100.0),
        ("growth_index", record.growth_index, 0.0, 1.0),
        ("yield_kg_ha", record.yield_kg_ha, MIN_YIELD_KG_HA, MAX_YIELD_KG_HA),
        (
            "grape_sugar_level",
            record.grape_sugar_level,
            MIN_SUGAR_LEVEL,
            MAX_SUGAR_LEVEL,
        ),
        (
            "production_cost_eur_ha",
            record.production_cost_eur_ha,
            MIN_PRODUCTION_COST_EUR_HA,
            f64::INFINITY,
        ),
        (
            "selling_price_eur_kg",
            record.selling_price_eur_kg,
            MIN_SELLING_PRICE_EUR_KG,
            MAX_SELLING_PRICE_EUR_KG,
        ),
        ("temperature_c", record.temperature_c, -40.0, 60.0),
    ];

    for (field, value, min, max) in checks {
        // NaN fails both comparisons, so test for containment
        if !(value >= min && value <= max) {
            return Err(BoundsViolation {
                date: record.date,
                field,
                value,
                min,
                max,
            });
        }
    }
    Ok(())
}

/// Validate that record dates are strictly increasing with no gaps
pub fn check_contiguous(records: &[DailyRecord]) -> Result<(), &'static str> {
    for pair in records.windows(2) {
        let step = pair[1].date - pair[0].date;
        if step <= Duration::zero() {
            return Err("Record dates must be strictly increasing");
        }
        if step > Duration::days(1) {
            return Err("Record dates must not contain gaps");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(date: NaiveDate) -> DailyRecord {
        DailyRecord {
            date,
            temperature_c: 18.5,
            humidity_percent: 65.0,
            precipitation_mm: 2.4,
            solar_irradiance_w_m2: 240.0,
            soil_moisture_percent: 41.2,
            growth_index: 0.35,
            hectares: 600,
            yield_kg_ha: 12100.0,
            grape_sugar_level: 18.2,
            production_cost_eur_ha: 9800.0,
            selling_price_eur_kg: 4.3,
            revenue_eur_ha: 42230.0,
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, d).unwrap()
    }

    // ========================================================================
    // Threshold Tests
    // ========================================================================

    #[test]
    fn test_extreme_heat_threshold() {
        assert!(is_extreme_heat(35.1));
        assert!(!is_extreme_heat(35.0));
        assert!(!is_extreme_heat(20.0));
    }

    #[test]
    fn test_frost_threshold() {
        assert!(is_frost(4.9));
        assert!(is_frost(-3.0));
        assert!(!is_frost(5.0));
    }

    #[test]
    fn test_extreme_rain_threshold() {
        assert!(is_extreme_rain(20.5));
        assert!(!is_extreme_rain(20.0));
        assert!(!is_extreme_rain(0.0));
    }

    #[test]
    fn test_disease_risk_requires_heat_and_humidity() {
        assert!(is_disease_risk(26.0, 85.0));
        assert!(!is_disease_risk(24.0, 85.0));
        assert!(!is_disease_risk(26.0, 75.0));
    }

    // ========================================================================
    // Bounds Tests
    // ========================================================================

    #[test]
    fn test_check_bounds_valid() {
        assert!(check_bounds(&record(day(1))).is_ok());
    }

    #[test]
    fn test_check_bounds_humidity_out_of_range() {
        let mut r = record(day(1));
        r.humidity_percent = 100.5;
        let err = check_bounds(&r).unwrap_err();
        assert_eq!(err.field, "humidity_percent");
    }

    #[test]
    fn test_check_bounds_negative_rain() {
        let mut r = record(day(1));
        r.precipitation_mm = -0.1;
        assert_eq!(check_bounds(&r).unwrap_err().field, "precipitation_mm");
    }

    #[test]
    fn test_check_bounds_rejects_nan() {
        let mut r = record(day(1));
        r.soil_moisture_percent = f64::NAN;
        assert_eq!(check_bounds(&r).unwrap_err().field, "soil_moisture_percent");
    }

    #[test]
    fn test_check_bounds_yield_capped() {
        let mut r = record(day(1));
        r.yield_kg_ha = 15000.01;
        assert_eq!(check_bounds(&r).unwrap_err().field, "yield_kg_ha");
    }

    // ========================================================================
    // Date Sequence Tests
    // ========================================================================

    #[test]
    fn test_check_contiguous_valid() {
        let records: Vec<_> = (1..=5).map(|d| record(day(d))).collect();
        assert!(check_contiguous(&records).is_ok());
    }

    #[test]
    fn test_check_contiguous_empty_and_single() {
        assert!(check_contiguous(&[]).is_ok());
        assert!(check_contiguous(&[record(day(1))]).is_ok());
    }

    #[test]
    fn test_check_contiguous_gap() {
        let records = vec![record(day(1)), record(day(3))];
        assert!(check_contiguous(&records).is_err());
    }

    #[test]
    fn test_check_contiguous_duplicate() {
        let records = vec![record(day(1)), record(day(1))];
        assert!(check_contiguous(&records).is_err());
    }

    #[test]
    fn test_check_contiguous_decreasing() {
        let records = vec![record(day(2)), record(day(1))];
        assert!(check_contiguous(&records).is_err());
    }
}
