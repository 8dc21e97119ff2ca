//! Inverse normalization and full reconstruction
//!
//! The inverse of each strategy is driven entirely by the metadata the forward
//! pass produced. Dispatch is exhaustive over [`NormalizationMetadata`], so a new
//! strategy cannot be added without its inverse.

use crate::normalize::{NormalizationMetadata, NormalizationMethod};
use crate::quantize::dequantize;
use meshquant_core::{Error, Point3d, QuantizedVertex, Result, VertexBuffer};

/// Map normalized (or dequantized) values back to the original coordinate space
pub fn denormalize(values: &[Point3d], metadata: &NormalizationMetadata) -> VertexBuffer {
    match *metadata {
        NormalizationMetadata::MinMax { vmin, vmax } => invert_min_max(values, vmin, vmax),
        NormalizationMetadata::UnitSphere { centroid, scale } => invert_unit_sphere(values, centroid, scale),
    }
}

/// Like [`denormalize`], but fail unless `metadata` came from `expected`
///
/// Use this when the strategy is known independently of the metadata, for
/// instance when metadata is read back from disk next to a named buffer.
pub fn denormalize_as(
    values: &[Point3d],
    metadata: &NormalizationMetadata,
    expected: NormalizationMethod,
) -> Result<VertexBuffer> {
    if metadata.method() != expected {
        return Err(Error::invalid_input(format!(
            "cannot invert {} normalization with {} metadata",
            expected,
            metadata.method()
        )));
    }
    Ok(denormalize(values, metadata))
}

/// Reverse min-max normalization: `value * (vmax - vmin) + vmin` per axis
///
/// This is not the exact inverse on a degenerate axis: the forward pass divided
/// by `1.0` there, while the range used here is `0`, so every value on that axis
/// reconstructs to exactly `vmin`.
pub fn denormalize_min_max(values: &[Point3d], metadata: &NormalizationMetadata) -> Result<VertexBuffer> {
    denormalize_as(values, metadata, NormalizationMethod::MinMax)
}

/// Reverse unit-sphere normalization: `value * scale + centroid`
pub fn denormalize_unit_sphere(values: &[Point3d], metadata: &NormalizationMetadata) -> Result<VertexBuffer> {
    denormalize_as(values, metadata, NormalizationMethod::UnitSphere)
}

/// Dequantize lattice codes and invert the normalization in one step
pub fn reconstruct(
    codes: &[QuantizedVertex],
    bins: u32,
    metadata: &NormalizationMetadata,
) -> Result<VertexBuffer> {
    let values = dequantize(codes, bins)?;
    Ok(denormalize(&values, metadata))
}

fn invert_min_max(values: &[Point3d], vmin: [f64; 3], vmax: [f64; 3]) -> VertexBuffer {
    let range = [vmax[0] - vmin[0], vmax[1] - vmin[1], vmax[2] - vmin[2]];
    values
        .iter()
        .map(|v| {
            Point3d::new(
                v.x * range[0] + vmin[0],
                v.y * range[1] + vmin[1],
                v.z * range[2] + vmin[2],
            )
        })
        .collect()
}

fn invert_unit_sphere(values: &[Point3d], centroid: [f64; 3], scale: f64) -> VertexBuffer {
    values
        .iter()
        .map(|v| {
            Point3d::new(
                v.x * scale + centroid[0],
                v.y * scale + centroid[1],
                v.z * scale + centroid[2],
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{min_max_normalize, normalize, unit_sphere_normalize};
    use crate::quantize::quantize;
    use approx::assert_relative_eq;

    fn sample() -> VertexBuffer {
        vec![
            Point3d::new(-3.5, 0.25, 7.0),
            Point3d::new(12.0, -4.0, 7.5),
            Point3d::new(0.0, 9.75, -1.0),
            Point3d::new(2.0, 2.0, 2.0),
        ]
    }

    #[test]
    fn test_exact_inverse_without_quantization() {
        let vertices = sample();
        for method in NormalizationMethod::ALL {
            let (normalized, meta) = normalize(&vertices, method).unwrap();
            let restored = denormalize(&normalized, &meta);
            for (a, b) in vertices.iter().zip(&restored) {
                assert_relative_eq!(*a, *b, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_degenerate_axis_collapses_to_vmin() {
        let vertices = vec![
            Point3d::new(0.0, 0.0, 3.0),
            Point3d::new(2.0, 0.0, 3.0),
        ];
        let (normalized, meta) = min_max_normalize(&vertices).unwrap();
        let codes = quantize(&normalized, 1024).unwrap();
        assert_eq!(codes[0][0], 0);
        assert_eq!(codes[1][0], 1023);

        let restored = reconstruct(&codes, 1024, &meta).unwrap();
        assert_eq!(restored[0].x, 0.0);
        assert_relative_eq!(restored[1].x, 2.0, epsilon = 2.0 / 1023.0);
        for p in &restored {
            assert_eq!(p.y, 0.0);
            assert_eq!(p.z, 3.0);
        }

        // Any value on a zero-range axis maps back to vmin.
        let arbitrary = vec![Point3d::new(0.5, 0.9, 0.1)];
        let out = denormalize_min_max(&arbitrary, &meta).unwrap();
        assert_eq!(out[0].y, 0.0);
        assert_eq!(out[0].z, 3.0);
    }

    #[test]
    fn test_single_point_unit_sphere_recovers_centroid() {
        let vertices = vec![Point3d::new(-2.0, 5.0, 1.5); 4];
        let (normalized, meta) = unit_sphere_normalize(&vertices).unwrap();
        let codes = quantize(&normalized, 1024).unwrap();
        let restored = reconstruct(&codes, 1024, &meta).unwrap();
        for p in restored {
            assert_eq!(p, Point3d::new(-2.0, 5.0, 1.5));
        }
    }

    #[test]
    fn test_mismatched_metadata_rejected() {
        let vertices = sample();
        let (normalized, minmax_meta) = min_max_normalize(&vertices).unwrap();
        let (_, sphere_meta) = unit_sphere_normalize(&vertices).unwrap();

        assert!(denormalize_unit_sphere(&normalized, &minmax_meta).unwrap_err().is_invalid_input());
        assert!(denormalize_min_max(&normalized, &sphere_meta).unwrap_err().is_invalid_input());
        assert!(denormalize_min_max(&normalized, &minmax_meta).is_ok());
    }

    #[test]
    fn test_reconstruct_propagates_bin_errors() {
        let (_, meta) = min_max_normalize(&sample()).unwrap();
        assert!(reconstruct(&[[0, 0, 0]], 1, &meta).unwrap_err().is_invalid_input());
    }
}
