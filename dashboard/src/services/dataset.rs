//! Loading the simulated dataset
//!
//! The dataset is read once at startup and shared read-only by every request.

use chrono::{DateTime, Datelike, Local};
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};
use crate::models::DailyRecord;
use shared::{check_bounds, check_contiguous, read_records, DateRange};

/// Immutable rows loaded from the simulator's output file
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<DailyRecord>,
    source: Option<PathBuf>,
    modified_at: Option<DateTime<Local>>,
}

impl Dataset {
    /// Load and check the dataset file
    pub fn load(path: &Path) -> AppResult<Self> {
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => AppError::MissingData {
                path: path.to_path_buf(),
            },
            _ => AppError::Io(e),
        })?;
        let modified_at = file
            .metadata()
            .and_then(|m| m.modified())
            .ok()
            .map(DateTime::<Local>::from);

        let records = read_records(BufReader::new(file))
            .map_err(|e| AppError::from_codec(path.to_path_buf(), e))?;

        let mut dataset = Self::from_records(records)?;
        dataset.source = Some(path.to_path_buf());
        dataset.modified_at = modified_at;

        tracing::info!(
            path = %path.display(),
            rows = dataset.records.len(),
            "Dataset loaded"
        );
        Ok(dataset)
    }

    /// Wrap already parsed records, enforcing a non-empty, gap-free sequence
    /// of physically plausible rows
    pub fn from_records(records: Vec<DailyRecord>) -> AppResult<Self> {
        if records.is_empty() {
            return Err(AppError::InvalidDataset("no rows".to_string()));
        }
        check_contiguous(&records).map_err(|msg| AppError::InvalidDataset(msg.to_string()))?;
        for record in &records {
            check_bounds(record).map_err(|v| AppError::InvalidDataset(v.to_string()))?;
        }

        Ok(Self {
            records,
            source: None,
            modified_at: None,
        })
    }

    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Last modification time of the source file
    pub fn modified_at(&self) -> Option<DateTime<Local>> {
        self.modified_at
    }

    /// Simulated surface, taken from the first row
    pub fn hectares(&self) -> u32 {
        self.records.first().map(|r| r.hectares).unwrap_or_default()
    }

    /// Calendar years present, ascending
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.records.iter().map(|r| r.date.year()).collect();
        years.dedup();
        years
    }

    /// Rows whose date falls within `range`
    pub fn between(&self, range: DateRange) -> &[DailyRecord] {
        let lo = self.records.partition_point(|r| r.date < range.start);
        let hi = self.records.partition_point(|r| r.date <= range.end);
        &self.records[lo..hi.max(lo)]
    }

    /// Rows of one calendar year
    pub fn year(&self, year: i32) -> &[DailyRecord] {
        let lo = self.records.partition_point(|r| r.date.year() < year);
        let hi = self.records.partition_point(|r| r.date.year() <= year);
        &self.records[lo..hi]
    }
}
