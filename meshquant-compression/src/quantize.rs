//! Fixed-width lattice quantization
//!
//! Normalized components are mapped onto the integer lattice `0..bins` with
//! `floor(v * (bins - 1))` and clamped; dequantization maps a code back with
//! `code / (bins - 1)`. The round trip loses at most `1 / (bins - 1)` per component.

use meshquant_core::{first_non_finite, Error, Point3d, QuantizedBuffer, QuantizedVertex, Result, VertexBuffer};

/// Default number of quantization bins per axis (10 bits)
pub const DEFAULT_BINS: u32 = 1024;

/// Slack around `[0, 1]` before a component counts as out of range
pub const RANGE_TOLERANCE: f64 = 1e-6;

/// Check that a bin count describes a usable lattice
pub fn validate_bins(bins: u32) -> Result<()> {
    if bins < 2 {
        return Err(Error::invalid_input(format!(
            "bin count must be at least 2, got {}",
            bins
        )));
    }
    Ok(())
}

/// Largest difference between a value in `[0, 1]` and its dequantized code
pub fn quantization_step(bins: u32) -> Result<f64> {
    validate_bins(bins)?;
    Ok(1.0 / f64::from(bins - 1))
}

/// Quantize a normalized vertex buffer
///
/// Components are expected in `[0, 1]`. Anything else is clamped into
/// `[0, bins - 1]` after flooring; the number of components lying further than
/// [`RANGE_TOLERANCE`] outside the unit interval is reported with a warning.
/// Non-finite components are rejected.
pub fn quantize(normalized: &[Point3d], bins: u32) -> Result<QuantizedBuffer> {
    validate_bins(bins)?;
    if let Some(index) = first_non_finite(normalized) {
        return Err(Error::invalid_input(format!(
            "cannot quantize non-finite vertex {}: {:?}",
            index, normalized[index]
        )));
    }

    let max_code = bins - 1;
    let levels = f64::from(max_code);
    let mut out_of_range = 0usize;

    let codes: QuantizedBuffer = normalized
        .iter()
        .map(|p| {
            let mut code: QuantizedVertex = [0; 3];
            for (axis, slot) in code.iter_mut().enumerate() {
                let v = p[axis];
                if !(-RANGE_TOLERANCE..=1.0 + RANGE_TOLERANCE).contains(&v) {
                    out_of_range += 1;
                }
                *slot = quantize_component(v, levels, max_code);
            }
            code
        })
        .collect();

    if out_of_range > 0 {
        tracing::warn!(
            out_of_range,
            components = normalized.len() * 3,
            bins,
            "clamped components outside [0, 1] during quantization"
        );
    }

    Ok(codes)
}

/// Map quantized codes back to `[0, 1]`
///
/// Codes above `bins - 1` cannot have come from [`quantize`] with the same bin
/// count and are rejected.
pub fn dequantize(codes: &[QuantizedVertex], bins: u32) -> Result<VertexBuffer> {
    validate_bins(bins)?;
    let max_code = bins - 1;
    let levels = f64::from(max_code);

    if let Some((index, code)) = codes
        .iter()
        .enumerate()
        .find(|(_, code)| code.iter().any(|&c| c > max_code))
    {
        return Err(Error::invalid_input(format!(
            "code {:?} at vertex {} exceeds the lattice maximum {} for {} bins",
            code, index, max_code, bins
        )));
    }

    Ok(codes
        .iter()
        .map(|c| {
            Point3d::new(
                f64::from(c[0]) / levels,
                f64::from(c[1]) / levels,
                f64::from(c[2]) / levels,
            )
        })
        .collect())
}

#[inline]
fn quantize_component(v: f64, levels: f64, max_code: u32) -> u32 {
    let scaled = (v * levels).floor();
    if scaled <= 0.0 {
        0
    } else if scaled >= levels {
        max_code
    } else {
        scaled as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_bins_below_two_rejected() {
        let points = vec![Point3d::new(0.5, 0.5, 0.5)];
        for bins in [0, 1] {
            assert!(quantize(&points, bins).unwrap_err().is_invalid_input());
            assert!(dequantize(&[[0, 0, 0]], bins).unwrap_err().is_invalid_input());
            assert!(quantization_step(bins).is_err());
        }
    }

    #[test]
    fn test_quantize_endpoints() {
        let points = vec![Point3d::new(0.0, 1.0, 0.5)];
        let codes = quantize(&points, 1024).unwrap();
        // 0.5 * 1023 = 511.5 floors to 511
        assert_eq!(codes, vec![[0, 1023, 511]]);
    }

    #[test]
    fn test_quantize_clamps_out_of_range() {
        let points = vec![
            Point3d::new(-0.25, 1.75, -1e9),
            Point3d::new(1e9, -0.0, 1.0 + 1e-12),
        ];
        let codes = quantize(&points, 16).unwrap();
        assert_eq!(codes, vec![[0, 15, 0], [15, 0, 15]]);
    }

    #[test]
    fn test_quantize_rejects_non_finite() {
        let points = vec![Point3d::new(0.1, f64::INFINITY, 0.2)];
        assert!(quantize(&points, 1024).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_two_bins() {
        let points = vec![Point3d::new(0.0, 0.999, 1.0)];
        let codes = quantize(&points, 2).unwrap();
        assert_eq!(codes, vec![[0, 0, 1]]);
        let values = dequantize(&codes, 2).unwrap();
        assert_eq!(values[0], Point3d::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_dequantize_values() {
        let values = dequantize(&[[0, 1023, 341]], 1024).unwrap();
        assert_eq!(values[0].x, 0.0);
        assert_eq!(values[0].y, 1.0);
        assert_abs_diff_eq!(values[0].z, 1.0 / 3.0, epsilon = 1e-15);
    }

    #[test]
    fn test_dequantize_rejects_codes_beyond_lattice() {
        let err = dequantize(&[[0, 1024, 0]], 1024).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_round_trip_error_bound() {
        let bins = 256;
        let step = quantization_step(bins).unwrap();
        let points: Vec<_> = (0..=100)
            .map(|i| {
                let t = i as f64 / 100.0;
                Point3d::new(t, 1.0 - t, (t * 7.0).fract())
            })
            .collect();

        let restored = dequantize(&quantize(&points, bins).unwrap(), bins).unwrap();
        for (p, r) in points.iter().zip(&restored) {
            for axis in 0..3 {
                assert!((p[axis] - r[axis]).abs() <= step);
            }
        }
    }

    #[test]
    fn test_empty_buffer() {
        assert!(quantize(&[], 8).unwrap().is_empty());
        assert!(dequantize(&[], 8).unwrap().is_empty());
    }
}
