//! Shared types and models for the vineyard simulation workspace
//!
//! This crate contains the daily record model, its CSV file format and the
//! plausibility checks used by both the simulator and the dashboard.

pub mod codec;
pub mod models;
pub mod types;
pub mod validation;

pub use codec::*;
pub use models::*;
pub use types::*;
pub use validation::*;
