//! Point and vertex buffer types

use nalgebra::{Point3, Vector3};

/// A 3D point with double precision coordinates
pub type Point3d = Point3<f64>;

/// A 3D vector with double precision components
pub type Vector3d = Vector3<f64>;

/// An ordered, read-only sequence of mesh vertex positions
pub type VertexBuffer = Vec<Point3d>;

/// A quantized vertex: one integer lattice code per axis
pub type QuantizedVertex = [u32; 3];

/// An ordered sequence of quantized vertices, parallel to the vertex buffer it came from
pub type QuantizedBuffer = Vec<QuantizedVertex>;

/// Number of coordinate channels per vertex
pub const AXES: usize = 3;

/// Axis labels, in channel order
pub const AXIS_NAMES: [&str; AXES] = ["X", "Y", "Z"];

/// Check that every coordinate of every point is finite
///
/// Returns the index of the first offending point, if any.
pub fn first_non_finite(points: &[Point3d]) -> Option<usize> {
    points
        .iter()
        .position(|p| !(p.x.is_finite() && p.y.is_finite() && p.z.is_finite()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_non_finite() {
        let points = vec![
            Point3d::new(0.0, 1.0, 2.0),
            Point3d::new(0.0, f64::NAN, 2.0),
            Point3d::new(f64::INFINITY, 1.0, 2.0),
        ];
        assert_eq!(first_non_finite(&points), Some(1));
        assert_eq!(first_non_finite(&points[..1]), None);
        assert_eq!(first_non_finite(&[]), None);
    }
}
