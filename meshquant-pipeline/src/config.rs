//! Pipeline configuration

use meshquant_compression::{validate_bins, DEFAULT_BINS};
use meshquant_core::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the compression pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Directory searched for input meshes in batch mode
    pub data_dir: PathBuf,
    /// Directory receiving all artifacts; created when missing
    pub output_dir: PathBuf,
    /// Quantization bins per axis (at least 2)
    pub bins: u32,
    /// Process meshes of a batch concurrently
    pub parallel: bool,
    /// Persist quantized and reconstructed buffers
    pub save_buffers: bool,
    /// Export reconstructed meshes as OBJ
    pub export_meshes: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("outputs"),
            bins: DEFAULT_BINS,
            parallel: false,
            save_buffers: true,
            export_meshes: true,
        }
    }
}

impl PipelineConfig {
    /// Check the configuration before any work starts
    pub fn validate(&self) -> Result<()> {
        validate_bins(self.bins)
    }

    pub fn with_data_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_output_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_bins(mut self, bins: u32) -> Self {
        self.bins = bins;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_save_buffers(mut self, save: bool) -> Self {
        self.save_buffers = save;
        self
    }

    pub fn with_export_meshes(mut self, export: bool) -> Self {
        self.export_meshes = export;
        self
    }

    /// Directory for per-mesh error reports
    pub fn reports_dir(&self) -> PathBuf {
        self.output_dir.join("reports")
    }

    /// Path of the batch summary table
    pub fn summary_path(&self) -> PathBuf {
        self.output_dir.join("summary.csv")
    }
}
