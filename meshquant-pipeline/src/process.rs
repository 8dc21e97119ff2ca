//! Single-mesh processing

use crate::config::PipelineConfig;
use meshquant_compression::{
    compute_errors, normalize, quantize, reconstruct, ErrorReport, NormalizationMetadata,
    NormalizationMethod, VertexStats,
};
use meshquant_core::{Error, Point3d, QuantizedBuffer, Result, VertexBuffer};
use meshquant_io::{
    read_mesh, save_error_report, save_metadata, save_stats, write_mesh, write_quantized_buffer,
    write_vertex_buffer, MeshSummary,
};
use std::path::{Path, PathBuf};

/// Everything one strategy produced for a vertex buffer
#[derive(Debug, Clone)]
pub struct MethodOutcome {
    pub method: NormalizationMethod,
    pub metadata: NormalizationMetadata,
    pub normalized: VertexBuffer,
    pub codes: QuantizedBuffer,
    pub reconstructed: VertexBuffer,
    pub errors: ErrorReport,
}

/// Run normalize → quantize → dequantize → denormalize → error evaluation
pub fn compress_vertices(
    vertices: &[Point3d],
    method: NormalizationMethod,
    bins: u32,
) -> Result<MethodOutcome> {
    let (normalized, metadata) = normalize(vertices, method)?;
    let codes = quantize(&normalized, bins)?;
    let reconstructed = reconstruct(&codes, bins, &metadata)?;
    let errors = compute_errors(vertices, &reconstructed)?;

    Ok(MethodOutcome {
        method,
        metadata,
        normalized,
        codes,
        reconstructed,
        errors,
    })
}

/// File names of the artifacts written for one mesh
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    output_dir: PathBuf,
    reports_dir: PathBuf,
    mesh_name: String,
}

impl ArtifactPaths {
    pub fn new(config: &PipelineConfig, mesh_name: &str) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            reports_dir: config.reports_dir(),
            mesh_name: mesh_name.to_string(),
        }
    }

    fn file(&self, suffix: &str) -> PathBuf {
        self.output_dir.join(format!("{}_{}", self.mesh_name, suffix))
    }

    pub fn stats(&self) -> PathBuf {
        self.file("stats.json")
    }

    pub fn metadata(&self, method: NormalizationMethod) -> PathBuf {
        match method {
            NormalizationMethod::MinMax => self.file("minmax_meta.json"),
            NormalizationMethod::UnitSphere => self.file("unit_meta.json"),
        }
    }

    pub fn normalized(&self, method: NormalizationMethod) -> PathBuf {
        match method {
            NormalizationMethod::MinMax => self.file("minmax.mqb"),
            NormalizationMethod::UnitSphere => self.file("unitsphere.mqb"),
        }
    }

    pub fn quantized(&self, method: NormalizationMethod) -> PathBuf {
        match method {
            NormalizationMethod::MinMax => self.file("minmax_quantized.mqb"),
            NormalizationMethod::UnitSphere => self.file("unitsphere_quantized.mqb"),
        }
    }

    pub fn reconstructed_buffer(&self, method: NormalizationMethod) -> PathBuf {
        match method {
            NormalizationMethod::MinMax => self.file("recon_minmax.mqb"),
            NormalizationMethod::UnitSphere => self.file("recon_unit.mqb"),
        }
    }

    pub fn reconstructed_mesh(&self, method: NormalizationMethod) -> PathBuf {
        match method {
            NormalizationMethod::MinMax => self.file("recon_minmax.obj"),
            NormalizationMethod::UnitSphere => self.file("recon_unitsphere.obj"),
        }
    }

    pub fn error_report(&self, method: NormalizationMethod) -> PathBuf {
        let suffix = match method {
            NormalizationMethod::MinMax => "error_minmax.json",
            NormalizationMethod::UnitSphere => "error_unitsphere.json",
        };
        self.reports_dir.join(format!("{}_{}", self.mesh_name, suffix))
    }
}

/// Name a mesh after its file stem
pub fn mesh_name(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .ok_or_else(|| Error::invalid_input(format!("cannot derive a mesh name from {}", path.display())))
}

/// Load one mesh, compress it with both strategies and write every artifact
///
/// Both strategies run before anything is written, so a mesh that fails to
/// compress leaves no files behind. An I/O error part way through writing can
/// still leave a partial set.
pub fn process_mesh<P: AsRef<Path>>(path: P, config: &PipelineConfig) -> Result<MeshSummary> {
    let path = path.as_ref();
    config.validate()?;

    let name = mesh_name(path)?;
    let _span = tracing::info_span!("mesh", name = %name).entered();

    let mesh = read_mesh(path)?;
    if mesh.is_empty() {
        return Err(Error::invalid_input(format!("{} has no vertices", path.display())));
    }

    let stats = VertexStats::from_vertices(&mesh.vertices)?;
    let minmax = compress_vertices(&mesh.vertices, NormalizationMethod::MinMax, config.bins)?;
    let unit_sphere = compress_vertices(&mesh.vertices, NormalizationMethod::UnitSphere, config.bins)?;

    let paths = ArtifactPaths::new(config, &name);
    std::fs::create_dir_all(&config.output_dir)?;
    std::fs::create_dir_all(config.reports_dir())?;

    save_stats(&stats, paths.stats())?;
    for outcome in [&minmax, &unit_sphere] {
        let method = outcome.method;
        save_metadata(&outcome.metadata, paths.metadata(method))?;
        save_error_report(&outcome.errors, paths.error_report(method))?;
        if config.save_buffers {
            write_vertex_buffer(&outcome.normalized, paths.normalized(method))?;
            write_quantized_buffer(&outcome.codes, paths.quantized(method))?;
            write_vertex_buffer(&outcome.reconstructed, paths.reconstructed_buffer(method))?;
        }
        if config.export_meshes {
            let reconstructed = mesh.with_vertices(outcome.reconstructed.clone())?;
            write_mesh(&reconstructed, paths.reconstructed_mesh(method))?;
        }
        tracing::debug!(%method, mse = outcome.errors.mse, mae = outcome.errors.mae, "strategy done");
    }

    tracing::info!(
        vertices = mesh.vertex_count(),
        mse_minmax = minmax.errors.mse,
        mse_unitsphere = unit_sphere.errors.mse,
        "processed mesh"
    );

    Ok(MeshSummary {
        mesh: name,
        vertices: mesh.vertex_count(),
        bins: config.bins,
        mse_minmax: minmax.errors.mse,
        mae_minmax: minmax.errors.mae,
        mse_unitsphere: unit_sphere.errors.mse,
        mae_unitsphere: unit_sphere.errors.mae,
    })
}
