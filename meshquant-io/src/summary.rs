//! Batch summary table
//!
//! One row per processed mesh, in processing order.

use meshquant_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Column names of the summary table
pub const SUMMARY_HEADER: [&str; 7] = [
    "mesh",
    "vertices",
    "bins",
    "mse_minmax",
    "mae_minmax",
    "mse_unitsphere",
    "mae_unitsphere",
];

/// Reconstruction results of one mesh under both normalization strategies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshSummary {
    pub mesh: String,
    pub vertices: usize,
    pub bins: u32,
    pub mse_minmax: f64,
    pub mae_minmax: f64,
    pub mse_unitsphere: f64,
    pub mae_unitsphere: f64,
}

/// Write the summary table as CSV
///
/// The header is written even when there are no rows.
pub fn write_summary_csv<P: AsRef<Path>>(rows: &[MeshSummary], path: P) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_error)?;

    writer.write_record(SUMMARY_HEADER).map_err(csv_error)?;
    for row in rows {
        writer.serialize(row).map_err(csv_error)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a summary table written by [`write_summary_csv`]
pub fn read_summary_csv<P: AsRef<Path>>(path: P) -> Result<Vec<MeshSummary>> {
    let mut reader = csv::Reader::from_path(path).map_err(csv_error)?;
    reader
        .deserialize::<MeshSummary>()
        .map(|row| row.map_err(csv_error))
        .collect()
}

fn csv_error(e: csv::Error) -> Error {
    if e.is_io_error() {
        match e.into_kind() {
            csv::ErrorKind::Io(io) => Error::Io(io),
            other => Error::Serialization(format!("{:?}", other)),
        }
    } else {
        Error::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, mse: f64) -> MeshSummary {
        MeshSummary {
            mesh: name.to_string(),
            vertices: 8,
            bins: 1024,
            mse_minmax: mse,
            mae_minmax: mse.sqrt(),
            mse_unitsphere: mse * 2.0,
            mae_unitsphere: 0.125,
        }
    }

    #[test]
    fn test_summary_round_trip_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        let rows = vec![row("cube", 1.5e-7), row("bunny", 3.0e-8), row("girl", 0.1 + 0.2)];

        write_summary_csv(&rows, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("mesh,vertices,bins,mse_minmax,mae_minmax,mse_unitsphere,mae_unitsphere\n"));

        let loaded = read_summary_csv(&path).unwrap();
        assert_eq!(loaded, rows);
    }

    #[test]
    fn test_empty_summary_has_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        write_summary_csv(&[], &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap().trim_end(), SUMMARY_HEADER.join(","));
        assert!(read_summary_csv(&path).unwrap().is_empty());
    }
}
