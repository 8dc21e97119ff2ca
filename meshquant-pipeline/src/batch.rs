//! Batch processing over a directory of meshes
//!
//! Meshes are independent: each one is processed to completion with its own
//! buffers and metadata, so a batch can fan out across threads. A mesh that
//! fails is recorded and skipped; it never affects the rows of other meshes.

use crate::config::PipelineConfig;
use crate::process::process_mesh;
use meshquant_core::{Error, Result};
use meshquant_io::{write_summary_csv, MeshSummary};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// A mesh the batch could not process
#[derive(Debug, Clone)]
pub struct MeshFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Result of processing one mesh in a batch
#[derive(Debug)]
pub enum MeshOutcome<'a> {
    Processed(&'a MeshSummary),
    Failed(&'a MeshFailure),
}

/// Outcome of a whole batch
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Summary rows of successful meshes, in discovery order
    pub summaries: Vec<MeshSummary>,
    /// Meshes that failed, in discovery order
    pub failures: Vec<MeshFailure>,
    /// Where the summary table was written
    pub summary_path: PathBuf,
}

impl BatchReport {
    pub fn processed(&self) -> usize {
        self.summaries.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// List the `.obj` files of a directory, sorted by file name
pub fn discover_meshes<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut meshes = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_obj = path
            .extension()
            .and_then(|s| s.to_str())
            .map_or(false, |ext| ext.eq_ignore_ascii_case("obj"));
        if is_obj && path.is_file() {
            meshes.push(path);
        }
    }

    if meshes.is_empty() {
        return Err(Error::invalid_input(format!("no .obj files found in {}", dir.display())));
    }

    meshes.sort();
    Ok(meshes)
}

/// Process every mesh in `config.data_dir` and write the summary table
pub fn run_batch(config: &PipelineConfig) -> Result<BatchReport> {
    run_batch_with(config, |_| {})
}

/// Like [`run_batch`], calling `on_mesh` after each mesh finishes
///
/// With `config.parallel` the callback runs on worker threads, in completion order.
pub fn run_batch_with<F>(config: &PipelineConfig, on_mesh: F) -> Result<BatchReport>
where
    F: Fn(MeshOutcome<'_>) + Sync,
{
    config.validate()?;
    let meshes = discover_meshes(&config.data_dir)?;
    tracing::info!(
        meshes = meshes.len(),
        bins = config.bins,
        parallel = config.parallel,
        "starting batch"
    );

    let run_one = |path: &PathBuf| -> std::result::Result<MeshSummary, MeshFailure> {
        let result = process_mesh(path, config).map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "mesh failed");
            MeshFailure {
                path: path.clone(),
                error: e.to_string(),
            }
        });
        match &result {
            Ok(summary) => on_mesh(MeshOutcome::Processed(summary)),
            Err(failure) => on_mesh(MeshOutcome::Failed(failure)),
        }
        result
    };

    let results: Vec<_> = if config.parallel {
        meshes.par_iter().map(run_one).collect()
    } else {
        meshes.iter().map(run_one).collect()
    };

    let mut report = BatchReport {
        summary_path: config.summary_path(),
        ..Default::default()
    };
    for result in results {
        match result {
            Ok(summary) => report.summaries.push(summary),
            Err(failure) => report.failures.push(failure),
        }
    }

    std::fs::create_dir_all(&config.output_dir)?;
    write_summary_csv(&report.summaries, &report.summary_path)?;

    tracing::info!(
        processed = report.processed(),
        failed = report.failures.len(),
        summary = %report.summary_path.display(),
        "batch finished"
    );

    Ok(report)
}
