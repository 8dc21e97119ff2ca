//! Round-trip demo for meshquant
//! 
//! This demo walks one small mesh through every stage:
//! - Normalizing with both strategies
//! - Quantizing and dequantizing
//! - Reconstructing and measuring the error
//! - Exporting the reconstructed mesh

use meshquant_compression::*;
use meshquant_core::{Point3d, TriangleMesh, AXIS_NAMES};

fn main() -> anyhow::Result<()> {
    println!("meshquant round-trip demo");
    println!("=========================");

    // A unit-height pyramid over a 4 x 2 base
    let vertices = vec![
        Point3d::new(-2.0, -1.0, 0.0),
        Point3d::new(2.0, -1.0, 0.0),
        Point3d::new(2.0, 1.0, 0.0),
        Point3d::new(-2.0, 1.0, 0.0),
        Point3d::new(0.0, 0.0, 1.0),
    ];
    let faces = vec![[0, 2, 1], [0, 3, 2], [0, 1, 4], [1, 2, 4], [2, 3, 4], [3, 0, 4]];
    let mesh = TriangleMesh::from_vertices_and_faces(vertices, faces);
    println!("Mesh with {} vertices and {} faces", mesh.vertex_count(), mesh.face_count());

    let stats = VertexStats::from_vertices(&mesh.vertices)?;
    println!("Extent: {:?}", stats.extent());

    for method in NormalizationMethod::ALL {
        let (normalized, meta) = normalize(&mesh.vertices, method)?;
        let codes = quantize(&normalized, DEFAULT_BINS)?;
        let restored = reconstruct(&codes, DEFAULT_BINS, &meta)?;
        let report = compute_errors(&mesh.vertices, &restored)?;

        println!("\n{}:", method);
        println!("  metadata: {:?}", meta);
        println!("  first codes: {:?}", &codes[..2]);
        for (axis, name) in AXIS_NAMES.iter().enumerate() {
            println!("  {} MSE {:.3e} MAE {:.3e}", name, report.mse_axis[axis], report.mae_axis[axis]);
        }
        println!("  overall MSE {:.3e} MAE {:.3e}", report.mse, report.mae);

        let out = std::env::temp_dir().join(format!("pyramid_recon_{}.obj", method));
        meshquant_io::write_mesh(&mesh.with_vertices(restored)?, &out)?;
        println!("  exported {}", out.display());
    }

    Ok(())
}
