//! CSV file format for the simulated dataset
//!
//! One header row naming each `DailyRecord` field, then one row per day.
//! Dates are ISO-8601, floats carry at most two decimals.

use std::io::{Read, Write};
use thiserror::Error;

use crate::models::DailyRecord;

/// Errors raised while reading or writing the dataset file
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Dataset is empty")]
    Empty,

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Malformed row at line {line}: {message}")]
    MalformedRow { line: u64, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Write the header and all records, in order
pub fn write_records<W: Write>(writer: W, records: &[DailyRecord]) -> Result<(), CodecError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(DailyRecord::COLUMNS)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Parse a full dataset, failing on the first row that does not fit
pub fn read_records<R: Read>(reader: R) -> Result<Vec<DailyRecord>, CodecError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = match rdr.headers() {
        Ok(headers) => headers.clone(),
        Err(e) if e.is_io_error() => return Err(CodecError::Csv(e)),
        Err(e) => {
            return Err(CodecError::MalformedRow {
                line: 1,
                message: e.to_string(),
            })
        }
    };
    if headers.is_empty() {
        return Err(CodecError::Empty);
    }

    let missing: Vec<String> = DailyRecord::COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|h| h == **column))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(CodecError::MissingColumns(missing));
    }

    let mut records = Vec::new();
    for (index, result) in rdr.deserialize::<DailyRecord>().enumerate() {
        let record = result.map_err(|e| CodecError::MalformedRow {
            // header is line 1
            line: e
                .position()
                .map(|p| p.line())
                .unwrap_or(index as u64 + 2),
            message: e.to_string(),
        })?;
        records.push(record);
    }

    if records.is_empty() {
        return Err(CodecError::Empty);
    }
    Ok(records)
}
