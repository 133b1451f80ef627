//! Daily vineyard record

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// One row of simulated vineyard data for a single calendar day.
///
/// Production and economic fields are yearly values: every row of the same
/// calendar year carries the same yield, sugar level, cost, price and revenue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub temperature_c: f64,
    pub humidity_percent: f64,
    pub precipitation_mm: f64,
    pub solar_irradiance_w_m2: f64,
    pub soil_moisture_percent: f64,
    /// Fraction of the season's growing degree days reached, in [0, 1]
    pub growth_index: f64,
    pub hectares: u32,
    pub yield_kg_ha: f64,
    pub grape_sugar_level: f64,
    pub production_cost_eur_ha: f64,
    pub selling_price_eur_kg: f64,
    /// Net revenue per hectare (yield * price - cost)
    pub revenue_eur_ha: f64,
}

impl DailyRecord {
    /// Column order of the CSV file
    pub const COLUMNS: [&'static str; 13] = [
        "date",
        "temperature_c",
        "humidity_percent",
        "precipitation_mm",
        "solar_irradiance_w_m2",
        "soil_moisture_percent",
        "growth_index",
        "hectares",
        "yield_kg_ha",
        "grape_sugar_level",
        "production_cost_eur_ha",
        "selling_price_eur_kg",
        "revenue_eur_ha",
    ];

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn is_rainy(&self) -> bool {
        self.precipitation_mm > 0.0
    }
}

/// Yearly production and economic values shared by all rows of a year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductionMetrics {
    pub yield_kg_ha: f64,
    pub grape_sugar_level: f64,
    pub production_cost_eur_ha: f64,
    pub selling_price_eur_kg: f64,
    pub revenue_eur_ha: f64,
}

impl ProductionMetrics {
    /// Production values carried by a record
    pub fn of(record: &DailyRecord) -> Self {
        Self {
            yield_kg_ha: record.yield_kg_ha,
            grape_sugar_level: record.grape_sugar_level,
            production_cost_eur_ha: record.production_cost_eur_ha,
            selling_price_eur_kg: record.selling_price_eur_kg,
            revenue_eur_ha: record.revenue_eur_ha,
        }
    }
}

/// Round to the two decimals used in the data file
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_match_serialized_header() {
        let record = DailyRecord {
            date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            temperature_c: 14.2,
            humidity_percent: 70.0,
            precipitation_mm: 0.0,
            solar_irradiance_w_m2: 210.5,
            soil_moisture_percent: 35.0,
            growth_index: 0.1,
            hectares: 600,
            yield_kg_ha: 12000.0,
            grape_sugar_level: 18.0,
            production_cost_eur_ha: 10000.0,
            selling_price_eur_kg: 4.0,
            revenue_eur_ha: 38000.0,
        };

        let mut wtr = csv::Writer::from_writer(vec![]);
        wtr.serialize(&record).unwrap();
        let data = String::from_utf8(wtr.into_inner().unwrap()).unwrap();
        let header = data.lines().next().unwrap();

        assert_eq!(header, DailyRecord::COLUMNS.join(","));
        assert_eq!(record.year(), 2024);
        assert!(!record.is_rainy());
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(12.3456), 12.35);
        assert_eq!(round2(-3.004), -3.0);
        assert_eq!(round2(0.0), 0.0);
    }
}
