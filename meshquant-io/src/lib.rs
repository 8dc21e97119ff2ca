//! I/O operations for meshes and compression artifacts
//! 
//! This crate reads and writes everything the meshquant pipeline touches on
//! disk: OBJ/PLY meshes, normalization metadata and reports as JSON, raw
//! vertex and code buffers, and the batch summary CSV.

pub mod ply;
pub mod obj;
pub mod json;
pub mod buffer;
pub mod summary;

pub use json::*;
pub use buffer::*;
pub use summary::*;

use meshquant_core::{TriangleMesh, Result};

/// Trait for reading meshes from files
pub trait MeshReader {
    fn read_mesh<P: AsRef<std::path::Path>>(path: P) -> Result<TriangleMesh>;
}

/// Trait for writing meshes to files
pub trait MeshWriter {
    fn write_mesh<P: AsRef<std::path::Path>>(mesh: &TriangleMesh, path: P) -> Result<()>;
}

/// File extensions accepted by [`read_mesh`]
pub const MESH_EXTENSIONS: [&str; 2] = ["obj", "ply"];

/// Auto-detect format and read mesh
pub fn read_mesh<P: AsRef<std::path::Path>>(path: P) -> Result<TriangleMesh> {
    let path = path.as_ref();
    match extension_of(path).as_deref() {
        Some("obj") => obj::ObjReader::read_mesh(path),
        Some("ply") => ply::PlyReader::read_mesh(path),
        _ => Err(meshquant_core::Error::UnsupportedFormat(
            format!("Unsupported mesh format: {:?}", path.extension())
        )),
    }
}

/// Auto-detect format and write mesh
pub fn write_mesh<P: AsRef<std::path::Path>>(mesh: &TriangleMesh, path: P) -> Result<()> {
    let path = path.as_ref();
    match extension_of(path).as_deref() {
        Some("obj") => obj::ObjWriter::write_mesh(mesh, path),
        Some("ply") => ply::PlyWriter::write_mesh(mesh, path),
        _ => Err(meshquant_core::Error::UnsupportedFormat(
            format!("Unsupported mesh format: {:?}", path.extension())
        )),
    }
}

fn extension_of(path: &std::path::Path) -> Option<String> {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
}

#[cfg(test)]
mod tests;
