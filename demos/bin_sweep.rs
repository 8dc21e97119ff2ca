//! Bin-count sweep
//!
//! Shows how reconstruction error falls as the lattice gets finer, for a mesh
//! given on the command line or a generated sphere.

use meshquant_compression::*;
use meshquant_core::Point3d;

fn sphere(rings: usize, segments: usize, radius: f64) -> Vec<Point3d> {
    let mut vertices = Vec::with_capacity(rings * segments);
    for r in 0..rings {
        let phi = std::f64::consts::PI * (r as f64 + 0.5) / rings as f64;
        for s in 0..segments {
            let theta = std::f64::consts::TAU * s as f64 / segments as f64;
            vertices.push(Point3d::new(
                radius * phi.sin() * theta.cos() + 5.0,
                radius * phi.sin() * theta.sin() - 2.0,
                radius * phi.cos(),
            ));
        }
    }
    vertices
}

fn main() -> anyhow::Result<()> {
    let vertices = match std::env::args().nth(1) {
        Some(path) => meshquant_io::read_mesh(&path)?.vertices,
        None => sphere(32, 64, 3.0),
    };
    println!("{} vertices", vertices.len());
    println!("{:>8} {:>14} {:>14}", "bins", "mse_minmax", "mse_unitsphere");

    for bits in [4u32, 6, 8, 10, 12, 16] {
        let bins = 1u32 << bits;
        let mut row = Vec::new();
        for method in NormalizationMethod::ALL {
            let (normalized, meta) = normalize(&vertices, method)?;
            let restored = reconstruct(&quantize(&normalized, bins)?, bins, &meta)?;
            row.push(compute_errors(&vertices, &restored)?.mse);
        }
        println!("{:>8} {:>14.6e} {:>14.6e}", bins, row[0], row[1]);
    }

    Ok(())
}
