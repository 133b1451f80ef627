//! Dataset persistence

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::{SimResult, SimulationError};
use shared::{write_records, CodecError, DailyRecord};

/// Write the dataset, replacing any previous file at `path`
pub fn write_dataset(path: &Path, records: &[DailyRecord]) -> SimResult<()> {
    let wrap = |source: CodecError| SimulationError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(|e| wrap(CodecError::Io(e)))?;
    write_records(BufWriter::new(file), records).map_err(wrap)?;

    tracing::info!(path = %path.display(), rows = records.len(), "Dataset written");
    Ok(())
}
