//! Core data structures and traits for meshquant
//! 
//! This crate provides the fundamental types shared by the compression, I/O
//! and pipeline crates: double precision points, vertex buffers, triangle
//! meshes and the common error type.

pub mod point;
pub mod mesh;
pub mod traits;
pub mod error;

pub use point::*;
pub use mesh::*;
pub use traits::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3};

