use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};

use crate::error::BenchError;
use crate::timer::Measurement;

pub const CSV_HEADER: [&str; 2] = ["Request Number", "Response Time (ms)"];

/// Writes a header row and one row per measurement, truncating any existing file.
pub fn write_csv(measurements: &[Measurement], path: &Path) -> Result<(), BenchError> {
    ensure_parent_dir(path)?;
    let file = fs::File::create(path).map_err(|e| BenchError::io(path, e))?;
    // The header is written by hand so an empty run still gets one.
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(file);
    wtr.write_record(CSV_HEADER)
        .map_err(|e| BenchError::io(path, e))?;
    for m in measurements {
        wtr.serialize(m).map_err(|e| BenchError::io(path, e))?;
    }
    wtr.flush().map_err(|e| BenchError::io(path, e))?;
    Ok(())
}

/// Parses a file produced by [`write_csv`].
pub fn read_csv(path: &Path) -> Result<Vec<Measurement>, BenchError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| BenchError::io(path, e))?;
    rdr.deserialize::<Measurement>()
        .map(|row| row.map_err(|e| BenchError::io(path, e)))
        .collect()
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), BenchError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|e| BenchError::io(dir, e))
        }
        _ => Ok(()),
    }
}
