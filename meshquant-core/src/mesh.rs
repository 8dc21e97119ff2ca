//! Mesh data structures and functionality

use crate::point::*;
use serde::{Deserialize, Serialize};

/// A triangle mesh with double precision vertices and faces
///
/// Faces are opaque to the compression pipeline: they are carried from the
/// loader to the exporter unchanged while only the vertices are transformed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: VertexBuffer,
    pub faces: Vec<[usize; 3]>,
}

impl TriangleMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh from vertices and faces
    pub fn from_vertices_and_faces(vertices: VertexBuffer, faces: Vec<[usize; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh has no vertices
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Add a vertex to the mesh
    pub fn add_vertex(&mut self, vertex: Point3d) -> usize {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    /// Add a face to the mesh
    pub fn add_face(&mut self, face: [usize; 3]) {
        self.faces.push(face);
    }

    /// Build a mesh sharing this mesh's topology but with new vertex positions
    ///
    /// Used to export reconstructed geometry; the replacement buffer must be
    /// parallel to the original one.
    pub fn with_vertices(&self, vertices: VertexBuffer) -> crate::Result<Self> {
        if vertices.len() != self.vertices.len() {
            return Err(crate::Error::invalid_input(format!(
                "replacement vertex buffer has {} vertices, mesh has {}",
                vertices.len(),
                self.vertices.len()
            )));
        }
        Ok(Self {
            vertices,
            faces: self.faces.clone(),
        })
    }

    /// Check that every face references an existing vertex
    pub fn validate_faces(&self) -> crate::Result<()> {
        let n = self.vertices.len();
        for (i, face) in self.faces.iter().enumerate() {
            if face.iter().any(|&idx| idx >= n) {
                return Err(crate::Error::InvalidData(format!(
                    "face {} references vertex out of range {:?} (vertex count {})",
                    i, face, n
                )));
            }
        }
        Ok(())
    }
}

impl Default for TriangleMesh {
    fn default() -> Self {
        Self::new()
    }
}
