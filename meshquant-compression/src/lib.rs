//! Vertex compression for triangle meshes
//! 
//! This crate implements the numerical core of the meshquant pipeline:
//! - Min-max and unit-sphere normalization with invertible metadata
//! - Fixed-width lattice quantization and dequantization
//! - Reconstruction back to the original coordinate space
//! - Reconstruction error metrics and vertex statistics
//!
//! Every operation is a pure function over explicit buffers, so meshes can be
//! processed independently (and in parallel) without shared state.
//!
//! ```rust
//! use meshquant_compression::*;
//! use meshquant_core::Point3d;
//!
//! let vertices = vec![Point3d::new(0.0, 0.0, 0.0), Point3d::new(2.0, 1.0, 0.5)];
//! let (normalized, meta) = normalize(&vertices, NormalizationMethod::MinMax).unwrap();
//! let codes = quantize(&normalized, DEFAULT_BINS).unwrap();
//! let restored = reconstruct(&codes, DEFAULT_BINS, &meta).unwrap();
//! let report = compute_errors(&vertices, &restored).unwrap();
//! assert!(report.mse < 1e-5);
//! ```

pub mod normalize;
pub mod quantize;
pub mod reconstruct;
pub mod metrics;
pub mod stats;

pub use normalize::*;
pub use quantize::*;
pub use reconstruct::*;
pub use metrics::*;
pub use stats::*;
