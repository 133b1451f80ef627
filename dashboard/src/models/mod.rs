//! Data models for the dashboard
//!
//! Re-exports the record types shared with the simulator.

pub use shared::models::*;
