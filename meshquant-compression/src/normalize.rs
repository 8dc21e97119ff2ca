//! Vertex normalization strategies
//!
//! Two interchangeable strategies map raw vertex positions into a bounded
//! range and return the metadata needed to invert the mapping later:
//!
//! - **Min-max**: per-axis linear rescale of `[vmin, vmax]` onto `[0, 1]`
//! - **Unit-sphere**: translate the centroid to the origin and scale uniformly so
//!   the farthest vertex lies on the unit sphere
//!
//! Both operate on the whole buffer at once and are deterministic.

use meshquant_core::{first_non_finite, Bounded, Error, Point3d, Result, VertexBuffer, AXES};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalization strategy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NormalizationMethod {
    /// Per-axis rescale to `[0, 1]`
    #[serde(rename = "minmax")]
    MinMax,
    /// Center on the centroid and fit inside the unit ball
    #[serde(rename = "unit_sphere")]
    UnitSphere,
}

impl NormalizationMethod {
    /// Every strategy, in the order the pipeline runs them
    pub const ALL: [NormalizationMethod; 2] = [NormalizationMethod::MinMax, NormalizationMethod::UnitSphere];

    /// Tag used in persisted metadata
    pub fn as_str(&self) -> &'static str {
        match self {
            NormalizationMethod::MinMax => "minmax",
            NormalizationMethod::UnitSphere => "unit_sphere",
        }
    }
}

impl fmt::Display for NormalizationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters required to invert a normalization
///
/// Produced once per normalization call and never mutated. It must travel with
/// the normalized (or quantized) buffer: original-space coordinates cannot be
/// recovered without it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method")]
pub enum NormalizationMetadata {
    /// Observed per-axis bounds of the source buffer (`vmax[i] >= vmin[i]`)
    #[serde(rename = "minmax")]
    MinMax { vmin: [f64; 3], vmax: [f64; 3] },
    /// Centroid of the source buffer and the radius used to scale it
    ///
    /// `scale` is the largest centered vertex norm, or `1.0` when every vertex
    /// coincides with the centroid.
    #[serde(rename = "unit_sphere")]
    UnitSphere { centroid: [f64; 3], scale: f64 },
}

impl NormalizationMetadata {
    /// The strategy that produced this metadata
    pub fn method(&self) -> NormalizationMethod {
        match self {
            NormalizationMetadata::MinMax { .. } => NormalizationMethod::MinMax,
            NormalizationMetadata::UnitSphere { .. } => NormalizationMethod::UnitSphere,
        }
    }
}

/// Normalize a vertex buffer with the given strategy
pub fn normalize(
    vertices: &[Point3d],
    method: NormalizationMethod,
) -> Result<(VertexBuffer, NormalizationMetadata)> {
    match method {
        NormalizationMethod::MinMax => min_max_normalize(vertices),
        NormalizationMethod::UnitSphere => unit_sphere_normalize(vertices),
    }
}

/// Rescale each axis independently onto `[0, 1]`
///
/// An axis on which every vertex has the same coordinate has a zero range; the
/// denominator for that axis is replaced by `1.0`, so the axis normalizes to
/// `(c - vmin) / 1 = 0`. The stored bounds keep `vmax == vmin`, which makes the
/// inverse collapse every reconstructed value on that axis back to `vmin`.
pub fn min_max_normalize(vertices: &[Point3d]) -> Result<(VertexBuffer, NormalizationMetadata)> {
    ensure_normalizable(vertices)?;

    let (lo, hi) = vertices
        .bounding_box()
        .ok_or_else(|| Error::invalid_input("cannot normalize an empty vertex buffer"))?;
    let vmin = [lo.x, lo.y, lo.z];
    let vmax = [hi.x, hi.y, hi.z];

    let mut denom = [0.0; AXES];
    for axis in 0..AXES {
        let d = vmax[axis] - vmin[axis];
        if !d.is_finite() {
            return Err(Error::invalid_input(format!(
                "range of axis {} overflows: [{}, {}]",
                axis, vmin[axis], vmax[axis]
            )));
        }
        denom[axis] = if d == 0.0 { 1.0 } else { d };
    }

    let normalized = vertices
        .iter()
        .map(|v| {
            Point3d::new(
                (v.x - vmin[0]) / denom[0],
                (v.y - vmin[1]) / denom[1],
                (v.z - vmin[2]) / denom[2],
            )
        })
        .collect();

    tracing::debug!(?vmin, ?vmax, vertices = vertices.len(), "min-max normalized");

    Ok((normalized, NormalizationMetadata::MinMax { vmin, vmax }))
}

/// Center on the centroid and scale uniformly into the unit ball
///
/// When all vertices coincide with the centroid the radius is zero and is
/// replaced by `1.0`; the buffer then normalizes to the origin.
pub fn unit_sphere_normalize(vertices: &[Point3d]) -> Result<(VertexBuffer, NormalizationMetadata)> {
    ensure_normalizable(vertices)?;

    let n = vertices.len() as f64;
    let mut sum = [0.0; AXES];
    for v in vertices {
        for axis in 0..AXES {
            sum[axis] += v[axis];
        }
    }
    let centroid = Point3d::new(sum[0] / n, sum[1] / n, sum[2] / n);
    if first_non_finite(&[centroid]).is_some() {
        return Err(Error::invalid_input(format!("centroid overflows: {:?}", centroid)));
    }

    let centered: Vec<_> = vertices.iter().map(|v| v - centroid).collect();
    let max_dist = centered.iter().map(|c| c.norm()).fold(0.0_f64, f64::max);
    if !max_dist.is_finite() {
        return Err(Error::invalid_input("distance from the centroid overflows"));
    }
    let scale = if max_dist == 0.0 { 1.0 } else { max_dist };

    let normalized = centered.iter().map(|c| Point3d::from(c / scale)).collect();

    tracing::debug!(centroid = ?centroid.coords.as_slice(), scale, "unit-sphere normalized");

    Ok((
        normalized,
        NormalizationMetadata::UnitSphere {
            centroid: [centroid.x, centroid.y, centroid.z],
            scale,
        },
    ))
}

/// Reject buffers the normalizers cannot handle: empty or non-finite input
fn ensure_normalizable(vertices: &[Point3d]) -> Result<()> {
    if vertices.is_empty() {
        return Err(Error::invalid_input("cannot normalize an empty vertex buffer"));
    }
    if let Some(index) = first_non_finite(vertices) {
        return Err(Error::invalid_input(format!(
            "vertex {} has a non-finite coordinate: {:?}",
            index, vertices[index]
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> VertexBuffer {
        vec![
            Point3d::new(-1.0, 2.0, 10.0),
            Point3d::new(3.0, 4.0, 12.0),
            Point3d::new(1.0, 8.0, 11.0),
        ]
    }

    #[test]
    fn test_min_max_range_and_metadata() {
        let (normalized, meta) = min_max_normalize(&sample()).unwrap();

        assert_eq!(
            meta,
            NormalizationMetadata::MinMax {
                vmin: [-1.0, 2.0, 10.0],
                vmax: [3.0, 8.0, 12.0],
            }
        );
        assert_relative_eq!(normalized[0], Point3d::new(0.0, 0.0, 0.0));
        assert_relative_eq!(normalized[1], Point3d::new(1.0, 1.0 / 3.0, 1.0));
        assert_relative_eq!(normalized[2], Point3d::new(0.5, 1.0, 0.5));
    }

    #[test]
    fn test_min_max_degenerate_axis() {
        let vertices = vec![
            Point3d::new(0.0, 5.0, -2.0),
            Point3d::new(2.0, 5.0, -2.0),
        ];
        let (normalized, meta) = min_max_normalize(&vertices).unwrap();

        assert_eq!(
            meta,
            NormalizationMetadata::MinMax {
                vmin: [0.0, 5.0, -2.0],
                vmax: [2.0, 5.0, -2.0],
            }
        );
        for p in &normalized {
            assert_eq!(p.y, 0.0);
            assert_eq!(p.z, 0.0);
        }
        assert_eq!(normalized[1].x, 1.0);
    }

    #[test]
    fn test_unit_sphere_fits_unit_ball() {
        let (normalized, meta) = unit_sphere_normalize(&sample()).unwrap();

        let max_norm = normalized.iter().map(|p| p.coords.norm()).fold(0.0, f64::max);
        assert_relative_eq!(max_norm, 1.0, epsilon = 1e-12);

        let mean = normalized.iter().fold(nalgebra::Vector3::zeros(), |acc, p| acc + p.coords)
            / normalized.len() as f64;
        assert_relative_eq!(mean.norm(), 0.0, epsilon = 1e-12);

        match meta {
            NormalizationMetadata::UnitSphere { centroid, scale } => {
                assert_relative_eq!(centroid[0], 1.0);
                assert_relative_eq!(centroid[1], 14.0 / 3.0);
                assert_relative_eq!(centroid[2], 11.0);
                assert!(scale > 0.0);
            }
            other => panic!("unexpected metadata {:?}", other),
        }
    }

    #[test]
    fn test_unit_sphere_single_point() {
        let vertices = vec![Point3d::new(4.0, -1.0, 2.5); 5];
        let (normalized, meta) = unit_sphere_normalize(&vertices).unwrap();

        assert_eq!(
            meta,
            NormalizationMetadata::UnitSphere {
                centroid: [4.0, -1.0, 2.5],
                scale: 1.0,
            }
        );
        assert!(normalized.iter().all(|p| *p == Point3d::origin()));
    }

    #[test]
    fn test_empty_buffer_rejected() {
        for method in NormalizationMethod::ALL {
            let err = normalize(&[], method).unwrap_err();
            assert!(err.is_invalid_input(), "{} accepted an empty buffer", method);
        }
    }

    #[test]
    fn test_non_finite_rejected() {
        let vertices = vec![Point3d::new(0.0, 0.0, 0.0), Point3d::new(f64::NAN, 1.0, 1.0)];
        assert!(min_max_normalize(&vertices).unwrap_err().is_invalid_input());
        assert!(unit_sphere_normalize(&vertices).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_min_max_range_overflow_rejected() {
        let vertices = vec![Point3d::new(-1e308, 0.0, 0.0), Point3d::new(1e308, 0.0, 0.0)];
        let err = min_max_normalize(&vertices).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_unit_sphere_radius_overflow_rejected() {
        // The centroid is exact but the squared norm of 1e200 overflows.
        let vertices = vec![Point3d::new(-1e200, 0.0, 0.0), Point3d::new(1e200, 0.0, 0.0)];
        let err = unit_sphere_normalize(&vertices).unwrap_err();
        assert!(err.is_invalid_input());

        // Summing the coordinates overflows before the division by N.
        let vertices = vec![Point3d::new(1.5e308, 0.0, 0.0); 2];
        assert!(unit_sphere_normalize(&vertices).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_large_finite_input_accepted() {
        let vertices = vec![Point3d::new(-1e150, 0.0, 0.0), Point3d::new(1e150, 2.0, 0.0)];
        for method in NormalizationMethod::ALL {
            let (normalized, _) = normalize(&vertices, method).unwrap();
            assert!(first_non_finite(&normalized).is_none());
        }
    }

    #[test]
    fn test_deterministic() {
        let vertices = sample();
        for method in NormalizationMethod::ALL {
            let a = normalize(&vertices, method).unwrap();
            let b = normalize(&vertices, method).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_metadata_json_tags() {
        let (_, meta) = min_max_normalize(&sample()).unwrap();
        let json = serde_json::to_value(meta).unwrap();
        assert_eq!(json["method"], "minmax");
        assert_eq!(json["vmin"][0], -1.0);

        let (_, meta) = unit_sphere_normalize(&sample()).unwrap();
        let json = serde_json::to_string(&meta).unwrap();
        let back: NormalizationMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(back, meta);
        assert_eq!(back.method(), NormalizationMethod::UnitSphere);
        assert!(json.contains("\"method\":\"unit_sphere\""));
    }
}
