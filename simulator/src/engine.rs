//! Simulation engine
//!
//! Generates the full horizon in three passes: temperature noise for the
//! whole horizon, then each day in order (weather, soil, growth), then the
//! production metrics of each calendar year.

use chrono::{Datelike, NaiveDate};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::ops::Range;
use validator::Validate;

use crate::climate::{sample_day, temperature_noise, DailyWeather};
use crate::config::SimulationConfig;
use crate::error::{SimResult, SimulationError};
use crate::production::{sample_year, YearClimate};
use crate::vine::{GrowthTracker, SoilModel};
use shared::{DailyRecord, ProductionMetrics};

/// Seeded vineyard data generator
pub struct Simulator {
    config: SimulationConfig,
    end_date: NaiveDate,
    seed: u64,
    rng: ChaCha8Rng,
}

/// Weather, soil and growth of one day, before production values are known
#[derive(Debug, Clone, Copy)]
struct SimulatedDay {
    date: NaiveDate,
    weather: DailyWeather,
    soil_moisture_percent: f64,
    growth_index: f64,
}

impl Simulator {
    /// Create a simulator, drawing a seed from OS entropy when none is configured
    pub fn new(config: SimulationConfig) -> SimResult<Self> {
        config.validate()?;
        let end_date = config
            .end_date()
            .ok_or(SimulationError::HorizonOutOfRange {
                start: config.start_date,
                days: config.horizon_days,
            })?;
        let seed = config.seed.unwrap_or_else(rand::random);
        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            config,
            end_date,
            seed,
        })
    }

    /// Seed actually used, for replaying a run
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Last day of the horizon
    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Dates of the horizon, in order
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        self.config
            .start_date
            .iter_days()
            .take(self.config.horizon_days as usize)
    }

    /// Generate one record per day of the horizon
    pub fn run(&mut self) -> Vec<DailyRecord> {
        tracing::info!(
            start = %self.config.start_date,
            end = %self.end_date,
            days = self.config.horizon_days,
            seed = self.seed,
            "Generating environmental data"
        );
        let days = self.simulate_days();

        tracing::info!("Computing yearly production and economic metrics");
        let mut records = Vec::with_capacity(days.len());
        for span in year_spans(&days) {
            let weather: Vec<DailyWeather> = days[span.clone()].iter().map(|d| d.weather).collect();
            let Some(climate) = YearClimate::from_days(&weather) else {
                continue;
            };
            let metrics = sample_year(&mut self.rng, &climate);
            tracing::debug!(
                year = days[span.start].date.year(),
                yield_kg_ha = metrics.yield_kg_ha,
                revenue_eur_ha = metrics.revenue_eur_ha,
                "Year settled"
            );

            records.extend(
                days[span]
                    .iter()
                    .map(|day| self.assemble(day, &metrics)),
            );
        }

        tracing::info!(rows = records.len(), "Simulation completed");
        records
    }

    fn simulate_days(&mut self) -> Vec<SimulatedDay> {
        let horizon = self.config.horizon_days as usize;
        let noise = temperature_noise(&mut self.rng, horizon);
        let soil = SoilModel::new(self.config.soil_decay, self.config.infiltration);
        let mut growth = GrowthTracker::new(self.config.gdd_target);
        let mut soil_moisture = self.config.initial_soil_moisture;

        let dates: Vec<NaiveDate> = self.dates().collect();
        let mut days = Vec::with_capacity(horizon);
        for (date, noise) in dates.into_iter().zip(noise) {
            let weather = sample_day(&mut self.rng, date.ordinal(), noise);
            // day n depends on day n-1, keep this loop sequential
            soil_moisture = soil.next(soil_moisture, weather.precipitation_mm);
            let growth_index = growth.advance(date, weather.temperature_c);

            days.push(SimulatedDay {
                date,
                weather,
                soil_moisture_percent: soil_moisture,
                growth_index,
            });
        }
        days
    }

    fn assemble(&self, day: &SimulatedDay, metrics: &ProductionMetrics) -> DailyRecord {
        DailyRecord {
            date: day.date,
            temperature_c: day.weather.temperature_c,
            humidity_percent: day.weather.humidity_percent,
            precipitation_mm: day.weather.precipitation_mm,
            solar_irradiance_w_m2: day.weather.solar_irradiance_w_m2,
            soil_moisture_percent: day.soil_moisture_percent,
            growth_index: day.growth_index,
            hectares: self.config.hectares,
            yield_kg_ha: metrics.yield_kg_ha,
            grape_sugar_level: metrics.grape_sugar_level,
            production_cost_eur_ha: metrics.production_cost_eur_ha,
            selling_price_eur_kg: metrics.selling_price_eur_kg,
            revenue_eur_ha: metrics.revenue_eur_ha,
        }
    }
}

/// Index ranges of consecutive days sharing a calendar year
fn year_spans(days: &[SimulatedDay]) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut start = 0;
    for i in 1..=days.len() {
        if i == days.len() || days[i].date.year() != days[start].date.year() {
            if start < i {
                spans.push(start..i);
            }
            start = i;
        }
    }
    spans
}
