//! Vineyard data simulator
//!
//! Produces one `DailyRecord` per simulated day (weather, soil, vine growth,
//! yield and economics) and writes the whole horizon to a CSV file that the
//! dashboard reads later.

pub mod climate;
pub mod config;
pub mod engine;
pub mod error;
pub mod production;
pub mod sampling;
pub mod stats;
pub mod vine;
pub mod writer;

use chrono::NaiveDate;
use std::path::PathBuf;

pub use config::{Config, SimulationConfig};
pub use engine::Simulator;
pub use error::{SimResult, SimulationError};
pub use writer::write_dataset;

/// Outcome of a generation run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub path: PathBuf,
    pub rows: usize,
    pub seed: u64,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

/// Generate the configured horizon and overwrite the dataset file
pub fn run(config: &Config) -> SimResult<RunSummary> {
    let mut simulator = Simulator::new(config.simulation.clone())?;
    tracing::info!(
        hectares = config.simulation.hectares,
        start = %config.simulation.start_date,
        end = %simulator.end_date(),
        "Starting simulation"
    );

    let records = simulator.run();
    stats::log_summary(&records);
    write_dataset(&config.data.path, &records)?;

    Ok(RunSummary {
        path: config.data.path.clone(),
        rows: records.len(),
        seed: simulator.seed(),
        first_date: records.first().map(|r| r.date),
        last_date: records.last().map(|r| r.date),
    })
}
