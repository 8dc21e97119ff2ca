//! meshquant command line interface

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use meshquant_compression::{VertexStats, DEFAULT_BINS};
use meshquant_core::AXIS_NAMES;
use meshquant_pipeline::{process_mesh, run_batch_with, MeshOutcome, PipelineConfig};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "meshquant")]
#[command(about = "Normalize, quantize and reconstruct mesh vertices", long_about = None)]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process every .obj mesh in a directory and write a summary table
    Run {
        /// Directory containing input meshes
        #[arg(short, long, default_value = "data")]
        data_dir: PathBuf,

        #[command(flatten)]
        pipeline: PipelineArgs,

        /// Process meshes concurrently
        #[arg(long)]
        parallel: bool,
    },

    /// Process a single mesh
    Process {
        /// Mesh file (.obj or .ply)
        mesh: PathBuf,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Print vertex statistics of a mesh
    Stats {
        /// Mesh file (.obj or .ply)
        mesh: PathBuf,
    },
}

#[derive(Args)]
struct PipelineArgs {
    /// Directory receiving artifacts
    #[arg(short, long, default_value = "outputs")]
    output_dir: PathBuf,

    /// Quantization bins per axis (at least 2)
    #[arg(short, long, default_value_t = DEFAULT_BINS)]
    bins: u32,

    /// Skip writing quantized and reconstructed buffers
    #[arg(long)]
    no_buffers: bool,

    /// Skip exporting reconstructed meshes
    #[arg(long)]
    no_export: bool,
}

impl PipelineArgs {
    fn into_config(self) -> PipelineConfig {
        PipelineConfig::default()
            .with_output_dir(self.output_dir)
            .with_bins(self.bins)
            .with_save_buffers(!self.no_buffers)
            .with_export_meshes(!self.no_export)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Run { data_dir, pipeline, parallel } => {
            let config = pipeline
                .into_config()
                .with_data_dir(data_dir)
                .with_parallel(parallel);
            run(&config)
        }
        Commands::Process { mesh, pipeline } => {
            let config = pipeline.into_config();
            let summary = process_mesh(&mesh, &config)
                .with_context(|| format!("failed to process {}", mesh.display()))?;
            println!("{}: {} vertices, {} bins", summary.mesh, summary.vertices, summary.bins);
            println!("  MSE-MinMax: {:.6e}, MAE-MinMax: {:.6e}", summary.mse_minmax, summary.mae_minmax);
            println!(
                "  MSE-UnitSphere: {:.6e}, MAE-UnitSphere: {:.6e}",
                summary.mse_unitsphere, summary.mae_unitsphere
            );
            Ok(())
        }
        Commands::Stats { mesh } => {
            let loaded = meshquant_io::read_mesh(&mesh)
                .with_context(|| format!("failed to read {}", mesh.display()))?;
            let stats = VertexStats::from_vertices(&loaded.vertices)?;
            println!("{}: {} vertices, {} faces", mesh.display(), stats.num_vertices, loaded.face_count());
            for (axis, name) in AXIS_NAMES.iter().enumerate() {
                println!(
                    "  {}: min {:.6} max {:.6} mean {:.6} std {:.6}",
                    name, stats.min[axis], stats.max[axis], stats.mean[axis], stats.std[axis]
                );
            }
            Ok(())
        }
    }
}

fn run(config: &PipelineConfig) -> Result<()> {
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Processing all meshes: [{bar:30}] {pos}/{len} {msg}")
            .context("invalid progress bar template")?,
    );
    if let Ok(entries) = meshquant_pipeline::discover_meshes(&config.data_dir) {
        pb.set_length(entries.len() as u64);
    }

    let report = run_batch_with(config, |outcome| {
        if let MeshOutcome::Processed(summary) = outcome {
            pb.set_message(summary.mesh.clone());
        }
        pb.inc(1);
    })
    .with_context(|| format!("batch over {} failed", config.data_dir.display()))?;
    pb.finish_and_clear();

    for row in &report.summaries {
        println!(
            "{:<24} {:>8} vertices  MSE-MinMax {:.6e}  MSE-UnitSphere {:.6e}",
            row.mesh, row.vertices, row.mse_minmax, row.mse_unitsphere
        );
    }
    println!("Summary saved to {}", report.summary_path.display());

    if !report.is_success() {
        for failure in &report.failures {
            eprintln!("failed: {}: {}", failure.path.display(), failure.error);
        }
        bail!("{} of {} meshes failed", report.failures.len(), report.failures.len() + report.processed());
    }
    Ok(())
}
