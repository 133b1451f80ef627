//! Daily weather model
//!
//! Each field is a seasonal sinusoid of the day of year plus noise, with two
//! small couplings: irradiance warms the air and warm air dries it.

use rand::Rng;
use std::f64::consts::PI;

use crate::sampling::{chance, exponential, normal};
use shared::{round2, MIN_SOLAR_IRRADIANCE_W_M2};

/// Baseline annual mean air temperature
pub const MEAN_ANNUAL_TEMPERATURE_C: f64 = 12.0;

/// Standard deviation of the raw daily temperature noise
pub const TEMPERATURE_NOISE_STD_C: f64 = 3.0;

/// Width of the centred window used to smooth temperature noise
pub const NOISE_SMOOTHING_WINDOW: usize = 7;

/// Mean rainfall on a rainy day
pub const MEAN_RAIN_MM: f64 = 7.0;

const DAYS_PER_YEAR: f64 = 365.0;

fn seasonal_wave(day_of_year: u32, phase_days: f64) -> f64 {
    (2.0 * PI * (f64::from(day_of_year) - phase_days) / DAYS_PER_YEAR).sin()
}

/// Seasonal mean temperature before noise and irradiance warming, peaking in late July
pub fn seasonal_temperature(day_of_year: u32) -> f64 {
    MEAN_ANNUAL_TEMPERATURE_C + 10.0 * seasonal_wave(day_of_year, 110.0) + 3.0
}

/// Probability of rain, higher in spring and early summer
pub fn rain_probability(day_of_year: u32) -> f64 {
    0.25 + 0.2 * seasonal_wave(day_of_year, 60.0)
}

/// Seasonal mean solar irradiance
pub fn seasonal_irradiance(day_of_year: u32) -> f64 {
    180.0 + 150.0 * seasonal_wave(day_of_year, 80.0)
}

/// Centred rolling mean; edge windows average whatever values they cover
pub fn smooth_centered(values: &[f64], window: usize) -> Vec<f64> {
    let half = window / 2;
    (0..values.len())
        .map(|i| {
            let lo = i.saturating_sub(half);
            let hi = (i + half + 1).min(values.len());
            let slice = &values[lo..hi];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect()
}

/// Draw the temperature noise for a whole horizon, already smoothed
pub fn temperature_noise<R: Rng>(rng: &mut R, days: usize) -> Vec<f64> {
    let raw: Vec<f64> = (0..days)
        .map(|_| normal(rng, 0.0, TEMPERATURE_NOISE_STD_C))
        .collect();
    smooth_centered(&raw, NOISE_SMOOTHING_WINDOW)
}

/// Environmental readings for one day, rounded to file precision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyWeather {
    pub temperature_c: f64,
    pub humidity_percent: f64,
    pub precipitation_mm: f64,
    pub solar_irradiance_w_m2: f64,
}

/// Sample one day's weather given its day of year and smoothed temperature noise
pub fn sample_day<R: Rng>(rng: &mut R, day_of_year: u32, temperature_noise: f64) -> DailyWeather {
    let precipitation_mm = if chance(rng, rain_probability(day_of_year)) {
        exponential(rng, MEAN_RAIN_MM)
    } else {
        0.0
    };

    let solar_irradiance_w_m2 = (seasonal_irradiance(day_of_year) + normal(rng, 0.0, 40.0))
        .max(MIN_SOLAR_IRRADIANCE_W_M2);

    let temperature_c =
        seasonal_temperature(day_of_year) + temperature_noise + solar_irradiance_w_m2 * 0.005;

    let humidity_percent =
        (normal(rng, 75.0, 12.0).clamp(0.0, 100.0) - temperature_c * 0.5).clamp(0.0, 100.0);

    DailyWeather {
        temperature_c: round2(temperature_c),
        humidity_percent: round2(humidity_percent),
        precipitation_mm: round2(precipitation_mm),
        solar_irradiance_w_m2: round2(solar_irradiance_w_m2),
    }
}
