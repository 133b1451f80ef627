//! Domain models for the vineyard simulation

mod record;

pub use record::*;
