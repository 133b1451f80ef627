//! Descriptive statistics of a generated dataset

use serde::Serialize;
use shared::{round2, DailyRecord};

/// Summary of one numeric column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnStats {
    pub column: &'static str,
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

type Extractor = fn(&DailyRecord) -> f64;

const NUMERIC_COLUMNS: [(&str, Extractor); 12] = [
    ("temperature_c", |r| r.temperature_c),
    ("humidity_percent", |r| r.humidity_percent),
    ("precipitation_mm", |r| r.precipitation_mm),
    ("solar_irradiance_w_m2", |r| r.solar_irradiance_w_m2),
    ("soil_moisture_percent", |r| r.soil_moisture_percent),
    ("growth_index", |r| r.growth_index),
    ("hectares", |r| f64::from(r.hectares)),
    ("yield_kg_ha", |r| r.yield_kg_ha),
    ("grape_sugar_level", |r| r.grape_sugar_level),
    ("production_cost_eur_ha", |r| r.production_cost_eur_ha),
    ("selling_price_eur_kg", |r| r.selling_price_eur_kg),
    ("revenue_eur_ha", |r| r.revenue_eur_ha),
];

/// Count, mean, sample standard deviation, min and max of every numeric column.
/// Empty input yields no rows.
pub fn describe(records: &[DailyRecord]) -> Vec<ColumnStats> {
    if records.is_empty() {
        return Vec::new();
    }
    let n = records.len() as f64;

    NUMERIC_COLUMNS
        .iter()
        .map(|&(column, extract)| {
            let values: Vec<f64> = records.iter().map(extract).collect();
            let mean = values.iter().sum::<f64>() / n;
            let variance = if values.len() > 1 {
                values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)
            } else {
                0.0
            };

            ColumnStats {
                column,
                count: values.len(),
                mean,
                std_dev: variance.sqrt(),
                min: values.iter().copied().fold(f64::INFINITY, f64::min),
                max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            }
        })
        .collect()
}

/// Log a short preview and the column statistics
pub fn log_summary(records: &[DailyRecord]) {
    for record in records.iter().take(5) {
        tracing::info!(
            date = %record.date,
            temperature_c = record.temperature_c,
            humidity_percent = record.humidity_percent,
            precipitation_mm = record.precipitation_mm,
            soil_moisture_percent = record.soil_moisture_percent,
            growth_index = record.growth_index,
            "Preview"
        );
    }

    for stats in describe(records) {
        tracing::info!(
            column = stats.column,
            count = stats.count,
            mean = round2(stats.mean),
            std = round2(stats.std_dev),
            min = stats.min,
            max = stats.max,
            "Column statistics"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(day: u32, temperature_c: f64) -> DailyRecord {
        DailyRecord {
            date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            temperature_c,
            humidity_percent: 60.0,
            precipitation_mm: 0.0,
            solar_irradiance_w_m2: 250.0,
            soil_moisture_percent: 30.0,
            growth_index: 0.2,
            hectares: 600,
            yield_kg_ha: 12000.0,
            grape_sugar_level: 18.0,
            production_cost_eur_ha: 10000.0,
            selling_price_eur_kg: 4.0,
            revenue_eur_ha: 38000.0,
        }
    }

    #[test]
    fn test_describe_temperature() {
        let records = vec![record(1, 10.0), record(2, 20.0), record(3, 30.0)];
        let stats = describe(&records);
        let temp = stats.iter().find(|s| s.column == "temperature_c").unwrap();

        assert_eq!(stats.len(), 12);
        assert_eq!(temp.count, 3);
        assert_eq!(temp.mean, 20.0);
        assert_eq!(temp.std_dev, 10.0);
        assert_eq!(temp.min, 10.0);
        assert_eq!(temp.max, 30.0);
    }

    #[test]
    fn test_describe_single_row_has_zero_spread() {
        let stats = describe(&[record(1, 12.5)]);
        assert!(stats.iter().all(|s| s.std_dev == 0.0 && s.min == s.max));
    }

    #[test]
    fn test_describe_empty() {
        assert!(describe(&[]).is_empty());
    }
}
