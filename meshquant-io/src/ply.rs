//! PLY format support

use crate::{MeshReader, MeshWriter};
use meshquant_core::{Error, Point3d, Result, TriangleMesh};
use std::path::Path;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use ply_rs::{
    parser::Parser,
    writer::Writer,
    ply::{Property, PropertyDef, PropertyType, ScalarType, ElementDef, Ply, Addable, DefaultElement},
};

pub struct PlyReader;
pub struct PlyWriter;

impl MeshReader for PlyReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        
        // Parse PLY header and payload
        let parser = Parser::<DefaultElement>::new();
        let ply = parser.read_ply(&mut reader)?;
        
        // Extract vertices
        let mut vertices = Vec::new();
        if let Some(vertex_element) = ply.payload.get("vertex") {
            for vertex in vertex_element {
                let x = extract_property_value(vertex, "x")?;
                let y = extract_property_value(vertex, "y")?;
                let z = extract_property_value(vertex, "z")?;
                
                vertices.push(Point3d::new(x, y, z));
            }
        }
        
        // Extract faces, fan-triangulating polygons
        let mut faces = Vec::new();
        if let Some(face_element) = ply.payload.get("face") {
            for face in face_element {
                let indices = extract_face_indices(face)?;
                for k in 1..indices.len().saturating_sub(1) {
                    faces.push([indices[0], indices[k], indices[k + 1]]);
                }
            }
        }
        
        let mesh = TriangleMesh::from_vertices_and_faces(vertices, faces);
        mesh.validate_faces()?;
        Ok(mesh)
    }
}

impl MeshWriter for PlyWriter {
    fn write_mesh<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        
        // Create PLY structure
        let mut ply = Ply::<DefaultElement>::new();
        
        // Vertex element, stored as doubles so reconstructed coordinates keep full precision
        let mut vertex_element = ElementDef::new("vertex".to_string());
        vertex_element.count = mesh.vertices.len();
        for name in ["x", "y", "z"] {
            vertex_element.properties.add(PropertyDef::new(
                name.to_string(),
                PropertyType::Scalar(ScalarType::Double),
            ));
        }
        ply.header.elements.add(vertex_element);
        
        // Define face element
        let mut face_element = ElementDef::new("face".to_string());
        face_element.count = mesh.faces.len();
        face_element.properties.add(PropertyDef::new(
            "vertex_indices".to_string(),
            PropertyType::List(ScalarType::UChar, ScalarType::UInt),
        ));
        ply.header.elements.add(face_element);
        
        // Add vertex data
        let vertices = mesh
            .vertices
            .iter()
            .map(|vertex| {
                let mut element = DefaultElement::new();
                element.insert("x".to_string(), Property::Double(vertex.x));
                element.insert("y".to_string(), Property::Double(vertex.y));
                element.insert("z".to_string(), Property::Double(vertex.z));
                element
            })
            .collect();
        ply.payload.insert("vertex".to_string(), vertices);
        
        // Add face data
        let mut faces = Vec::with_capacity(mesh.faces.len());
        for face in &mesh.faces {
            let indices = face
                .iter()
                .map(|&idx| {
                    u32::try_from(idx).map_err(|_| {
                        Error::InvalidData(format!("face index {} does not fit a PLY uint", idx))
                    })
                })
                .collect::<Result<Vec<u32>>>()?;
            let mut element = DefaultElement::new();
            element.insert("vertex_indices".to_string(), Property::ListUInt(indices));
            faces.push(element);
        }
        ply.payload.insert("face".to_string(), faces);
        
        // Write PLY file
        let writer_instance = Writer::new();
        writer_instance.write_ply(&mut writer, &mut ply)?;
        writer.flush()?;
        
        Ok(())
    }
}

/// Extract a property value as f64 from a PLY element
fn extract_property_value(element: &DefaultElement, name: &str) -> Result<f64> {
    match element.get(name) {
        Some(Property::Float(val)) => Ok(f64::from(*val)),
        Some(Property::Double(val)) => Ok(*val),
        Some(Property::Int(val)) => Ok(f64::from(*val)),
        Some(Property::UInt(val)) => Ok(f64::from(*val)),
        _ => Err(Error::InvalidData(
            format!("Property '{}' not found or invalid type", name)
        )),
    }
}

/// Extract face indices from a PLY face element
fn extract_face_indices(element: &DefaultElement) -> Result<Vec<usize>> {
    match element.get("vertex_indices").or_else(|| element.get("vertex_index")) {
        Some(Property::ListInt(indices)) => indices
            .iter()
            .map(|&idx| {
                usize::try_from(idx)
                    .map_err(|_| Error::InvalidData(format!("negative face index {}", idx)))
            })
            .collect(),
        Some(Property::ListUInt(indices)) => {
            Ok(indices.iter().map(|&idx| idx as usize).collect())
        }
        _ => Err(Error::InvalidData(
            "Face indices not found".to_string()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ply_quad_is_triangulated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quad.ply");
        let content = "ply\nformat ascii 1.0\nelement vertex 4\nproperty float x\nproperty float y\nproperty float z\nelement face 1\nproperty list uchar int vertex_indices\nend_header\n0 0 0\n1 0 0\n1 1 0\n0 1 0\n4 0 1 2 3\n";
        std::fs::write(&path, content).unwrap();

        let mesh = PlyReader::read_mesh(&path).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.faces, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn test_ply_round_trip_keeps_f64() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tri.ply");
        let mesh = TriangleMesh::from_vertices_and_faces(
            vec![
                Point3d::new(0.1, 0.2, 0.3),
                Point3d::new(1.0 / 3.0, -7.25, 1e-9),
                Point3d::new(123456.789, 0.0, -0.5),
            ],
            vec![[0, 1, 2]],
        );

        PlyWriter::write_mesh(&mesh, &path).unwrap();
        let loaded = PlyReader::read_mesh(&path).unwrap();
        assert_eq!(loaded, mesh);
    }
}
