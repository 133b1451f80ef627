//! HTTP handlers for the vineyard dashboard

pub mod health;
pub mod page;
pub mod records;
pub mod reporting;

pub use health::*;
pub use page::*;
pub use records::*;
pub use reporting::*;
