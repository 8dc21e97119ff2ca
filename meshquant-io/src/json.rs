//! JSON persistence for metadata, error reports and vertex statistics
//!
//! Floats are written in shortest round-trip form and parsed back exactly, so a
//! metadata file reproduces the in-memory values bit for bit.

use meshquant_compression::{ErrorReport, NormalizationMetadata, VertexStats};
use meshquant_core::{Error, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Serialize any value as pretty-printed JSON to a file
pub fn write_json<T: Serialize, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .map_err(|e| Error::Serialization(e.to_string()))?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Deserialize a value from a JSON file
pub fn read_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let file = File::open(path)?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| Error::Serialization(e.to_string()))
}

/// Save normalization metadata, tagged by its `method`
pub fn save_metadata<P: AsRef<Path>>(metadata: &NormalizationMetadata, path: P) -> Result<()> {
    write_json(metadata, path)
}

/// Load normalization metadata written by [`save_metadata`]
pub fn load_metadata<P: AsRef<Path>>(path: P) -> Result<NormalizationMetadata> {
    read_json(path)
}

/// Save a reconstruction error report
pub fn save_error_report<P: AsRef<Path>>(report: &ErrorReport, path: P) -> Result<()> {
    write_json(report, path)
}

/// Save vertex statistics
pub fn save_stats<P: AsRef<Path>>(stats: &VertexStats, path: P) -> Result<()> {
    write_json(stats, path)
}
