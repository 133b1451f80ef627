//! Yearly production and economic metrics
//!
//! Yield, sugar level, cost and price are settled once per calendar year from
//! that year's weather and applied to every day of the year.

use rand::Rng;

use crate::climate::DailyWeather;
use crate::sampling::normal;
use shared::{
    is_disease_risk, is_extreme_heat, is_extreme_rain, is_frost, round2, ProductionMetrics,
    MAX_SELLING_PRICE_EUR_KG, MAX_SUGAR_LEVEL, MAX_YIELD_KG_HA, MIN_PRODUCTION_COST_EUR_HA,
    MIN_SELLING_PRICE_EUR_KG, MIN_SUGAR_LEVEL, MIN_YIELD_KG_HA,
};

/// Weather aggregates of one year that drive production
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearClimate {
    pub mean_temperature_c: f64,
    pub mean_solar_irradiance_w_m2: f64,
    /// Share of days above 35 C or below 5 C
    pub extreme_temperature_ratio: f64,
    /// Share of warm, humid and rainy days
    pub disease_risk_ratio: f64,
    /// Share of days with torrential rain
    pub extreme_rain_ratio: f64,
}

impl YearClimate {
    /// Summarise a year's days; `None` for an empty slice
    pub fn from_days(days: &[DailyWeather]) -> Option<Self> {
        if days.is_empty() {
            return None;
        }
        let n = days.len() as f64;

        Some(Self {
            mean_temperature_c: days.iter().map(|d| d.temperature_c).sum::<f64>() / n,
            mean_solar_irradiance_w_m2: days.iter().map(|d| d.solar_irradiance_w_m2).sum::<f64>()
                / n,
            extreme_temperature_ratio: share(days, |d| {
                is_extreme_heat(d.temperature_c) || is_frost(d.temperature_c)
            }),
            disease_risk_ratio: share(days, |d| {
                is_disease_risk(d.temperature_c, d.humidity_percent) && d.precipitation_mm > 0.0
            }),
            extreme_rain_ratio: share(days, |d| is_extreme_rain(d.precipitation_mm)),
        })
    }
}

fn share(days: &[DailyWeather], pred: impl Fn(&DailyWeather) -> bool) -> f64 {
    days.iter().filter(|d| pred(*d)).count() as f64 / days.len() as f64
}

/// Final yield per hectare for the year
pub fn yield_kg_ha(base_yield: f64, climate: &YearClimate) -> f64 {
    let solar_effect = (climate.mean_solar_irradiance_w_m2 - 200.0) * 15.0;
    let extreme_temp_penalty = climate.extreme_temperature_ratio * 4000.0;
    let disease_penalty = climate.disease_risk_ratio * 3500.0;
    let extreme_rain_penalty = climate.extreme_rain_ratio * 3000.0;

    (base_yield + solar_effect - extreme_temp_penalty - disease_penalty - extreme_rain_penalty)
        .clamp(MIN_YIELD_KG_HA, MAX_YIELD_KG_HA)
}

/// Sugar level, driven by warmth and sunshine
pub fn sugar_level(base_sugar: f64, climate: &YearClimate) -> f64 {
    (base_sugar
        + climate.mean_solar_irradiance_w_m2 / 200.0
        + climate.mean_temperature_c / 20.0)
        .clamp(MIN_SUGAR_LEVEL, MAX_SUGAR_LEVEL)
}

/// Selling price, with a premium or discount for grape quality
pub fn selling_price(base_price: f64, sugar_level: f64) -> f64 {
    (base_price + (sugar_level - 17.5) * 0.5)
        .clamp(MIN_SELLING_PRICE_EUR_KG, MAX_SELLING_PRICE_EUR_KG)
}

/// Draw the year's base values and derive its production metrics
pub fn sample_year<R: Rng>(rng: &mut R, climate: &YearClimate) -> ProductionMetrics {
    let yield_kg_ha = round2(yield_kg_ha(normal(rng, 12000.0, 800.0), climate));
    let grape_sugar_level = round2(sugar_level(normal(rng, 17.0, 0.5), climate));
    let production_cost_eur_ha =
        round2(normal(rng, 10000.0, 1000.0).max(MIN_PRODUCTION_COST_EUR_HA));
    let selling_price_eur_kg = round2(selling_price(normal(rng, 4.0, 0.8), grape_sugar_level));
    let revenue_eur_ha = round2(yield_kg_ha * selling_price_eur_kg - production_cost_eur_ha);

    ProductionMetrics {
        yield_kg_ha,
        grape_sugar_level,
        production_cost_eur_ha,
        selling_price_eur_kg,
        revenue_eur_ha,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn mild_year() -> YearClimate {
        YearClimate {
            mean_temperature_c: 14.0,
            mean_solar_irradiance_w_m2: 200.0,
            extreme_temperature_ratio: 0.0,
            disease_risk_ratio: 0.0,
            extreme_rain_ratio: 0.0,
        }
    }

    fn day(temperature_c: f64, humidity_percent: f64, precipitation_mm: f64) -> DailyWeather {
        DailyWeather {
            temperature_c,
            humidity_percent,
            precipitation_mm,
            solar_irradiance_w_m2: 200.0,
        }
    }

    #[test]
    fn test_year_climate_ratios() {
        let days = [
            day(36.0, 50.0, 0.0),
            day(3.0, 60.0, 25.0),
            day(27.0, 85.0, 1.0),
            day(27.0, 85.0, 0.0),
        ];
        let climate = YearClimate::from_days(&days).unwrap();

        assert_eq!(climate.extreme_temperature_ratio, 0.5);
        assert_eq!(climate.disease_risk_ratio, 0.25);
        assert_eq!(climate.extreme_rain_ratio, 0.25);
        assert_eq!(climate.mean_solar_irradiance_w_m2, 200.0);
    }

    #[test]
    fn test_year_climate_empty() {
        assert!(YearClimate::from_days(&[]).is_none());
    }

    #[test]
    fn test_yield_neutral_year() {
        assert_eq!(yield_kg_ha(12000.0, &mild_year()), 12000.0);
    }

    #[test]
    fn test_yield_penalties_and_clamp() {
        let harsh = YearClimate {
            extreme_temperature_ratio: 1.0,
            disease_risk_ratio: 1.0,
            extreme_rain_ratio: 1.0,
            ..mild_year()
        };
        assert_eq!(yield_kg_ha(12000.0, &harsh), MIN_YIELD_KG_HA);

        let sunny = YearClimate {
            mean_solar_irradiance_w_m2: 500.0,
            ..mild_year()
        };
        assert_eq!(yield_kg_ha(12000.0, &sunny), MAX_YIELD_KG_HA);
    }

    #[test]
    fn test_sugar_level_clamped() {
        assert_eq!(sugar_level(17.0, &mild_year()), 18.7);
        assert_eq!(sugar_level(30.0, &mild_year()), MAX_SUGAR_LEVEL);
        assert_eq!(sugar_level(0.0, &mild_year()), MIN_SUGAR_LEVEL);
    }

    #[test]
    fn test_price_quality_premium() {
        assert!(selling_price(4.0, 19.0) > selling_price(4.0, 16.0));
        assert_eq!(selling_price(10.0, 19.0), MAX_SELLING_PRICE_EUR_KG);
        assert_eq!(selling_price(1.0, 15.0), MIN_SELLING_PRICE_EUR_KG);
    }

    #[test]
    fn test_sample_year_within_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        for _ in 0..200 {
            let m = sample_year(&mut rng, &mild_year());
            assert!((MIN_YIELD_KG_HA..=MAX_YIELD_KG_HA).contains(&m.yield_kg_ha));
            assert!((MIN_SUGAR_LEVEL..=MAX_SUGAR_LEVEL).contains(&m.grape_sugar_level));
            assert!(m.production_cost_eur_ha >= MIN_PRODUCTION_COST_EUR_HA);
            assert!(
                (MIN_SELLING_PRICE_EUR_KG..=MAX_SELLING_PRICE_EUR_KG)
                    .contains(&m.selling_price_eur_kg)
            );
        }
    }
}
