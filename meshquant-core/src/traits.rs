//! Core traits for meshquant

use crate::{mesh::TriangleMesh, point::*};

/// Trait for geometry with an axis-aligned extent
pub trait Bounded {
    /// Get the per-axis minimum and maximum, or `None` when there are no points
    fn bounding_box(&self) -> Option<(Point3d, Point3d)>;
}

impl Bounded for [Point3d] {
    fn bounding_box(&self) -> Option<(Point3d, Point3d)> {
        let first = *self.first()?;
        let mut min = first;
        let mut max = first;

        for vertex in self {
            min.x = min.x.min(vertex.x);
            min.y = min.y.min(vertex.y);
            min.z = min.z.min(vertex.z);

            max.x = max.x.max(vertex.x);
            max.y = max.y.max(vertex.y);
            max.z = max.z.max(vertex.z);
        }

        Some((min, max))
    }
}

impl Bounded for TriangleMesh {
    fn bounding_box(&self) -> Option<(Point3d, Point3d)> {
        self.vertices.as_slice().bounding_box()
    }
}
