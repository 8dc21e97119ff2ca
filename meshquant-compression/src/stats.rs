//! Summary statistics of a vertex buffer

use meshquant_core::{Bounded, Error, Point3d, Result, AXES};
use serde::{Deserialize, Serialize};

/// Per-axis descriptive statistics of a vertex buffer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VertexStats {
    pub num_vertices: usize,
    pub min: [f64; 3],
    pub max: [f64; 3],
    pub mean: [f64; 3],
    /// Population standard deviation
    pub std: [f64; 3],
}

impl VertexStats {
    /// Compute statistics for a non-empty buffer
    pub fn from_vertices(vertices: &[Point3d]) -> Result<Self> {
        let (min, max) = vertices
            .bounding_box()
            .ok_or_else(|| Error::invalid_input("cannot compute statistics of an empty vertex buffer"))?;

        let n = vertices.len() as f64;
        let mut mean = [0.0; AXES];
        for v in vertices {
            for axis in 0..AXES {
                mean[axis] += v[axis];
            }
        }
        mean = mean.map(|s| s / n);

        let mut var = [0.0; AXES];
        for v in vertices {
            for axis in 0..AXES {
                let d = v[axis] - mean[axis];
                var[axis] += d * d;
            }
        }

        Ok(Self {
            num_vertices: vertices.len(),
            min: [min.x, min.y, min.z],
            max: [max.x, max.y, max.z],
            mean,
            std: var.map(|s| (s / n).sqrt()),
        })
    }

    /// Per-axis extent `max - min`
    pub fn extent(&self) -> [f64; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }
}
