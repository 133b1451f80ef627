//! Error handling for the vineyard simulator

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

use shared::CodecError;

/// Simulator error types
#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Invalid simulation configuration: {0}")]
    InvalidConfig(#[from] validator::ValidationErrors),

    #[error("Simulation horizon of {days} days from {start} runs past the last representable date")]
    HorizonOutOfRange { start: NaiveDate, days: u32 },

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Failed to write dataset to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: CodecError,
    },
}

/// Result type alias for simulator operations
pub type SimResult<T> = Result<T, SimulationError>;
