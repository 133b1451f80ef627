//! Read-only services over the loaded dataset

pub mod dataset;
pub mod reporting;

pub use dataset::Dataset;
pub use reporting::ReportingService;
