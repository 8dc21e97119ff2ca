//! Reconstruction error metrics
//!
//! Compares an original vertex buffer with its reconstruction, point by point.

use meshquant_core::{Error, Point3d, Result, AXES, AXIS_NAMES};
use serde::{Deserialize, Serialize};

/// Per-axis and overall reconstruction error
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Mean squared error for each axis
    pub mse_axis: [f64; 3],
    /// Mean absolute error for each axis
    pub mae_axis: [f64; 3],
    /// Mean squared error over every (point, axis) pair
    pub mse: f64,
    /// Mean absolute error over every (point, axis) pair
    pub mae: f64,
}

impl ErrorReport {
    /// Root mean squared error over every (point, axis) pair
    pub fn rmse(&self) -> f64 {
        self.mse.sqrt()
    }

    /// Axis with the largest mean squared error, as `(label, mse)`
    pub fn worst_axis(&self) -> (&'static str, f64) {
        let mut worst = 0;
        for axis in 1..AXES {
            if self.mse_axis[axis] > self.mse_axis[worst] {
                worst = axis;
            }
        }
        (AXIS_NAMES[worst], self.mse_axis[worst])
    }
}

/// Compute MSE and MAE between two parallel vertex buffers
///
/// Both buffers must be non-empty and of equal length. The overall figures are
/// taken jointly over all `3 * N` components, which equals the mean of the three
/// per-axis figures since every axis has the same number of points.
pub fn compute_errors(original: &[Point3d], reconstructed: &[Point3d]) -> Result<ErrorReport> {
    if original.len() != reconstructed.len() {
        return Err(Error::invalid_input(format!(
            "buffer length mismatch: original has {} vertices, reconstruction has {}",
            original.len(),
            reconstructed.len()
        )));
    }
    if original.is_empty() {
        return Err(Error::invalid_input("cannot compute errors over empty buffers"));
    }

    let mut sq = [0.0_f64; AXES];
    let mut abs = [0.0_f64; AXES];
    for (o, r) in original.iter().zip(reconstructed) {
        let diff = o - r;
        for axis in 0..AXES {
            sq[axis] += diff[axis] * diff[axis];
            abs[axis] += diff[axis].abs();
        }
    }

    let n = original.len() as f64;
    let mse_axis = sq.map(|s| s / n);
    let mae_axis = abs.map(|s| s / n);
    let total = n * AXES as f64;

    Ok(ErrorReport {
        mse_axis,
        mae_axis,
        mse: sq.iter().sum::<f64>() / total,
        mae: abs.iter().sum::<f64>() / total,
    })
}
