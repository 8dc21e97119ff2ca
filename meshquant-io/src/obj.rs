//! OBJ format support
//!
//! Faces are read through the `obj` crate. Polygons with more than three
//! corners are fan-triangulated around their first corner. The crate stores
//! positions as `f32`, so `v` records are parsed a second time as `f64` to keep
//! the file's full precision. Writing emits plain `v`/`f` records with shortest
//! round-trip float formatting, so no precision is lost beyond what `f64` holds.

use crate::{MeshReader, MeshWriter};
use meshquant_core::{Error, Point3d, Result, TriangleMesh};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub struct ObjReader;
pub struct ObjWriter;

impl MeshReader for ObjReader {
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let data = obj::ObjData::load_buf(text.as_bytes())
            .map_err(|e| Error::InvalidData(format!("Failed to parse OBJ {}: {}", path.display(), e)))?;

        let vertices = parse_positions(&text)?;
        if vertices.len() != data.position.len() {
            return Err(Error::InvalidData(format!(
                "OBJ {} has {} positions but {} were parsed",
                path.display(),
                data.position.len(),
                vertices.len()
            )));
        }

        let mut faces = Vec::new();
        for object in &data.objects {
            for group in &object.groups {
                for poly in &group.polys {
                    let corners: Vec<usize> = poly.0.iter().map(|tuple| tuple.0).collect();
                    triangulate_fan(&corners, &mut faces);
                }
            }
        }

        let mesh = TriangleMesh::from_vertices_and_faces(vertices, faces);
        mesh.validate_faces()?;

        tracing::debug!(
            path = %path.display(),
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            "read OBJ mesh"
        );

        Ok(mesh)
    }
}

/// Parse every `v` record of OBJ text as double precision
///
/// Only the first three components are kept; an optional `w` or vertex color
/// that follows them is ignored.
pub fn parse_positions(text: &str) -> Result<Vec<Point3d>> {
    let mut positions = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let mut tokens = line.split_whitespace();
        if tokens.next() != Some("v") {
            continue;
        }

        let mut xyz = [0.0; 3];
        for value in xyz.iter_mut() {
            let token = tokens.next().ok_or_else(|| {
                Error::InvalidData(format!("line {}: vertex needs three coordinates", line_no + 1))
            })?;
            *value = token.parse::<f64>().map_err(|e| {
                Error::InvalidData(format!("line {}: bad coordinate {:?}: {}", line_no + 1, token, e))
            })?;
        }
        positions.push(Point3d::new(xyz[0], xyz[1], xyz[2]));
    }
    Ok(positions)
}

impl MeshWriter for ObjWriter {
    fn write_mesh<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        write_obj(mesh, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// Write a mesh as OBJ text to any writer
pub fn write_obj<W: Write>(mesh: &TriangleMesh, writer: &mut W) -> Result<()> {
    writeln!(writer, "# meshquant")?;
    writeln!(writer, "# vertices: {} faces: {}", mesh.vertex_count(), mesh.face_count())?;
    for v in &mesh.vertices {
        writeln!(writer, "v {} {} {}", v.x, v.y, v.z)?;
    }
    for face in &mesh.faces {
        // OBJ indices are 1-based
        writeln!(writer, "f {} {} {}", face[0] + 1, face[1] + 1, face[2] + 1)?;
    }
    Ok(())
}

fn triangulate_fan(corners: &[usize], faces: &mut Vec<[usize; 3]>) {
    if corners.len() < 3 {
        return;
    }
    for k in 1..corners.len() - 1 {
        faces.push([corners[0], corners[k], corners[k + 1]]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangulate_fan() {
        let mut faces = Vec::new();
        triangulate_fan(&[4, 5, 6, 7, 8], &mut faces);
        assert_eq!(faces, vec![[4, 5, 6], [4, 6, 7], [4, 7, 8]]);

        faces.clear();
        triangulate_fan(&[0, 1], &mut faces);
        assert!(faces.is_empty());
    }

    #[test]
    fn test_parse_positions_full_precision() {
        let text = "# header\nv 0.1 123456.789 1.0000001\nvn 0 0 1\nv -2.5e-3 7 8 1.0\nvt 0.5 0.5\nf 1 2 1\n";
        let positions = parse_positions(text).unwrap();
        assert_eq!(
            positions,
            vec![Point3d::new(0.1, 123456.789, 1.0000001), Point3d::new(-2.5e-3, 7.0, 8.0)]
        );
    }

    #[test]
    fn test_parse_positions_rejects_short_record() {
        let err = parse_positions("v 1 2\n").unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
        assert!(parse_positions("v 1 x 2\n").is_err());
    }

    #[test]
    fn test_write_obj_text() {
        let mesh = TriangleMesh::from_vertices_and_faces(
            vec![
                Point3d::new(0.0, 0.0, 0.0),
                Point3d::new(1.5, 0.0, 0.0),
                Point3d::new(0.0, -2.25, 0.1),
            ],
            vec![[0, 1, 2]],
        );
        let mut out = Vec::new();
        write_obj(&mesh, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("v 1.5 0 0\n"));
        assert!(text.contains("v 0 -2.25 0.1\n"));
        assert!(text.contains("f 1 2 3\n"));
    }
}
