//! Reporting service for the dashboard
//! Provides the yearly overview, vintage detail and correlation views.
//!
//! Every report is a pure function of the loaded dataset.

use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{DailyRecord, ProductionMetrics};
use crate::services::dataset::Dataset;
use shared::{is_disease_risk, is_extreme_heat, is_extreme_rain, is_frost, DateRange};

/// Window of the trailing temperature average in the vintage detail
pub const ROLLING_WINDOW_DAYS: usize = 7;

/// Number of bins of the precipitation histogram
pub const PRECIPITATION_BINS: usize = 50;

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    dataset: Arc<Dataset>,
}

/// Yearly aggregates shown in the overview
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualSummary {
    pub year: i32,
    /// Vintage label, e.g. "2016/2017"
    pub label: String,
    pub yield_kg_ha: f64,
    pub grape_sugar_level: f64,
    pub revenue_eur_ha: f64,
    pub production_cost_eur_ha: f64,
    pub selling_price_eur_kg: f64,
    pub temperature_c_avg: f64,
    pub precipitation_mm_sum: f64,
    pub solar_irradiance_w_m2_avg: f64,
    pub humidity_percent_avg: f64,
    pub extreme_heat_days: usize,
    pub frost_days: usize,
    pub extreme_rain_days: usize,
    pub disease_risk_days: usize,
    pub total_revenue_eur: f64,
    pub total_cost_eur: f64,
}

/// Totals over the complete vintages of the overview
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonTotals {
    pub vintages: usize,
    pub precipitation_mm: f64,
    pub revenue_eur: f64,
    pub cost_eur: f64,
    pub mean_yield_kg_ha: Option<f64>,
}

/// Selectable vintage
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VintageOption {
    pub year: i32,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Ordinary least squares fit y = slope * x + intercept
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
}

/// Scatter of two yearly variables with its trend line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Correlation {
    pub id: &'static str,
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub points: Vec<Point>,
    pub trend: Option<TrendLine>,
}

/// Everything the overview section needs
#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub hectares: u32,
    pub data_updated_at: Option<DateTime<Local>>,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub vintages: Vec<VintageOption>,
    pub annual: Vec<AnnualSummary>,
    pub totals: SeasonTotals,
    pub correlations: Vec<Correlation>,
}

/// Headline figures of one vintage
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VintageKpis {
    pub yield_kg_ha: f64,
    pub total_revenue_eur: f64,
    pub total_cost_eur: f64,
    pub grape_sugar_level: f64,
    pub extreme_heat_days: usize,
    pub frost_days: usize,
    pub extreme_rain_days: usize,
    pub disease_risk_days: usize,
    pub total_precipitation_mm: f64,
    pub avg_humidity_percent: f64,
}

/// One day of the vintage chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub temperature_c: f64,
    pub temperature_c_rolling: f64,
    pub solar_irradiance_w_m2: f64,
    pub precipitation_mm: f64,
    pub soil_moisture_percent: f64,
    pub growth_index: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Daily detail of one vintage (1 August to 30 September of the next year)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VintageDetail {
    pub year: i32,
    pub label: String,
    pub period: DateRange,
    pub kpis: VintageKpis,
    pub daily: Vec<DailyPoint>,
    pub precipitation_histogram: Vec<HistogramBin>,
    pub rainy_days: usize,
    pub dry_days: usize,
}

/// "2016/2017" for the vintage starting in 2016
pub fn vintage_label(year: i32) -> String {
    format!("{}/{}", year, year + 1)
}

/// Days counted toward a vintage
pub fn vintage_period(year: i32) -> Option<DateRange> {
    Some(DateRange::new(
        NaiveDate::from_ymd_opt(year, 8, 1)?,
        NaiveDate::from_ymd_opt(year + 1, 9, 30)?,
    ))
}

/// Trailing mean over up to `window` values ending at each position
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    let mut sum = 0.0;
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            sum += v;
            if i >= window {
                sum -= values[i - window];
            }
            sum / (i + 1).min(window) as f64
        })
        .collect()
}

/// Least squares fit; `None` with fewer than two points or no spread in x
pub fn linear_trend(points: &[Point]) -> Option<TrendLine> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.x).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.y).sum::<f64>() / n;
    let sxx: f64 = points.iter().map(|p| (p.x - mean_x).powi(2)).sum();
    let sxy: f64 = points
        .iter()
        .map(|p| (p.x - mean_x) * (p.y - mean_y))
        .sum();

    if sxx.abs() < f64::EPSILON {
        return None;
    }
    let slope = sxy / sxx;
    Some(TrendLine {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}

/// Equal-width histogram between the smallest and largest value
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    let (Some(min), Some(max)) = (
        values.iter().copied().reduce(f64::min),
        values.iter().copied().reduce(f64::max),
    ) else {
        return Vec::new();
    };

    if bins == 0 || max <= min {
        return vec![HistogramBin {
            start: min,
            end: max,
            count: values.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0usize; bins];
    for v in values {
        let index = (((v - min) / width).floor() as usize).min(bins - 1);
        counts[index] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: min + width * i as f64,
            end: min + width * (i + 1) as f64,
            count,
        })
        .collect()
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

fn count(records: &[DailyRecord], pred: impl Fn(&DailyRecord) -> bool) -> usize {
    records.iter().filter(|&r| pred(r)).count()
}

impl ReportingService {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    /// One summary per calendar year, leaving out the last (partial) year
    pub fn annual_summaries(&self) -> Vec<AnnualSummary> {
        let hectares = f64::from(self.dataset.hectares());
        let mut years = self.dataset.years();
        years.pop();

        years
            .into_iter()
            .filter_map(|year| {
                let rows = self.dataset.year(year);
                let first = ProductionMetrics::of(rows.first()?);

                Some(AnnualSummary {
                    year,
                    label: vintage_label(year),
                    yield_kg_ha: first.yield_kg_ha,
                    grape_sugar_level: first.grape_sugar_level,
                    revenue_eur_ha: first.revenue_eur_ha,
                    production_cost_eur_ha: first.production_cost_eur_ha,
                    selling_price_eur_kg: first.selling_price_eur_kg,
                    temperature_c_avg: mean(rows.iter().map(|r| r.temperature_c)),
                    precipitation_mm_sum: rows.iter().map(|r| r.precipitation_mm).sum(),
                    solar_irradiance_w_m2_avg: mean(rows.iter().map(|r| r.solar_irradiance_w_m2)),
                    humidity_percent_avg: mean(rows.iter().map(|r| r.humidity_percent)),
                    extreme_heat_days: count(rows, |r| is_extreme_heat(r.temperature_c)),
                    frost_days: count(rows, |r| is_frost(r.temperature_c)),
                    extreme_rain_days: count(rows, |r| is_extreme_rain(r.precipitation_mm)),
                    disease_risk_days: count(rows, |r| {
                        is_disease_risk(r.temperature_c, r.humidity_percent)
                    }),
                    total_revenue_eur: first.revenue_eur_ha * hectares,
                    total_cost_eur: first.production_cost_eur_ha * hectares,
                })
            })
            .collect()
    }

    /// Vintages offered for the detail view: every year but the last
    pub fn available_vintages(&self) -> Vec<VintageOption> {
        let mut years = self.dataset.years();
        years.pop();
        years
            .into_iter()
            .map(|year| VintageOption {
                year,
                label: vintage_label(year),
            })
            .collect()
    }

    /// Totals across the complete vintages
    pub fn season_totals(summaries: &[AnnualSummary]) -> SeasonTotals {
        SeasonTotals {
            vintages: summaries.len(),
            precipitation_mm: summaries.iter().map(|s| s.precipitation_mm_sum).sum(),
            revenue_eur: summaries.iter().map(|s| s.total_revenue_eur).sum(),
            cost_eur: summaries.iter().map(|s| s.total_cost_eur).sum(),
            mean_yield_kg_ha: (!summaries.is_empty())
                .then(|| mean(summaries.iter().map(|s| s.yield_kg_ha))),
        }
    }

    /// Scatter plots relating yearly climate to yield and quality
    pub fn correlations(summaries: &[AnnualSummary]) -> Vec<Correlation> {
        type Axis = fn(&AnnualSummary) -> f64;
        let specs: [(&'static str, &'static str, &'static str, Axis, &'static str, Axis); 6] = [
            (
                "precip-yield",
                "Total precipitation vs. yield",
                "Total precipitation (mm)",
                |s| s.precipitation_mm_sum,
                "Yield (kg/ha)",
                |s| s.yield_kg_ha,
            ),
            (
                "temp-sugar",
                "Mean temperature vs. sugar level",
                "Mean temperature (°C)",
                |s| s.temperature_c_avg,
                "Sugar level (°)",
                |s| s.grape_sugar_level,
            ),
            (
                "solar-yield",
                "Mean solar irradiance vs. yield",
                "Mean irradiance (W/m²)",
                |s| s.solar_irradiance_w_m2_avg,
                "Yield (kg/ha)",
                |s| s.yield_kg_ha,
            ),
            (
                "disease-yield",
                "Disease risk days vs. yield",
                "Disease risk days",
                |s| s.disease_risk_days as f64,
                "Yield (kg/ha)",
                |s| s.yield_kg_ha,
            ),
            (
                "solar-sugar",
                "Mean solar irradiance vs. sugar level",
                "Mean irradiance (W/m²)",
                |s| s.solar_irradiance_w_m2_avg,
                "Sugar level (°)",
                |s| s.grape_sugar_level,
            ),
            (
                "temp-yield",
                "Mean temperature vs. yield",
                "Mean temperature (°C)",
                |s| s.temperature_c_avg,
                "Yield (kg/ha)",
                |s| s.yield_kg_ha,
            ),
        ];

        specs
            .into_iter()
            .map(|(id, title, x_label, x, y_label, y)| {
                let points: Vec<Point> = summaries
                    .iter()
                    .map(|s| Point { x: x(s), y: y(s) })
                    .collect();
                Correlation {
                    id,
                    title,
                    x_label,
                    y_label,
                    trend: linear_trend(&points),
                    points,
                }
            })
            .collect()
    }

    /// Full overview section
    pub fn overview(&self) -> Overview {
        let annual = self.annual_summaries();
        let records = self.dataset.records();

        Overview {
            hectares: self.dataset.hectares(),
            data_updated_at: self.dataset.modified_at(),
            first_date: records.first().map(|r| r.date),
            last_date: records.last().map(|r| r.date),
            vintages: self.available_vintages(),
            totals: Self::season_totals(&annual),
            correlations: Self::correlations(&annual),
            annual,
        }
    }

    /// Daily detail of the vintage starting in `year`
    pub fn vintage_detail(&self, year: i32) -> AppResult<VintageDetail> {
        let period = vintage_period(year)
            .ok_or_else(|| AppError::Validation(format!("Invalid vintage year {}", year)))?;
        let rows = self.dataset.between(period);
        let first = rows
            .first()
            .ok_or_else(|| AppError::NotFound(format!("Vintage {}", vintage_label(year))))?;
        let hectares = f64::from(first.hectares);

        let kpis = VintageKpis {
            yield_kg_ha: first.yield_kg_ha,
            total_revenue_eur: first.revenue_eur_ha * hectares,
            total_cost_eur: first.production_cost_eur_ha * hectares,
            grape_sugar_level: first.grape_sugar_level,
            extreme_heat_days: count(rows, |r| is_extreme_heat(r.temperature_c)),
            frost_days: count(rows, |r| is_frost(r.temperature_c)),
            extreme_rain_days: count(rows, |r| is_extreme_rain(r.precipitation_mm)),
            disease_risk_days: count(rows, |r| {
                is_disease_risk(r.temperature_c, r.humidity_percent)
            }),
            total_precipitation_mm: rows.iter().map(|r| r.precipitation_mm).sum(),
            avg_humidity_percent: mean(rows.iter().map(|r| r.humidity_percent)),
        };

        let temperatures: Vec<f64> = rows.iter().map(|r| r.temperature_c).collect();
        let rolling = rolling_mean(&temperatures, ROLLING_WINDOW_DAYS);
        let daily = rows
            .iter()
            .zip(rolling)
            .map(|(r, temperature_c_rolling)| DailyPoint {
                date: r.date,
                temperature_c: r.temperature_c,
                temperature_c_rolling,
                solar_irradiance_w_m2: r.solar_irradiance_w_m2,
                precipitation_mm: r.precipitation_mm,
                soil_moisture_percent: r.soil_moisture_percent,
                growth_index: r.growth_index,
            })
            .collect();

        let precipitation: Vec<f64> = rows.iter().map(|r| r.precipitation_mm).collect();
        let rainy_days = count(rows, |r| r.is_rainy());

        Ok(VintageDetail {
            year,
            label: vintage_label(year),
            period,
            kpis,
            daily,
            precipitation_histogram: histogram(&precipitation, PRECIPITATION_BINS),
            rainy_days,
            dry_days: rows.len() - rainy_days,
        })
    }

    /// Raw rows as CSV, in the same format the simulator writes
    pub fn export_to_csv(&self) -> AppResult<String> {
        let mut buf = Vec::new();
        shared::write_records(&mut buf, self.dataset.records())
            .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        String::from_utf8(buf)
            .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))
    }

    pub fn records(&self) -> &[DailyRecord] {
        self.dataset.records()
    }
}
