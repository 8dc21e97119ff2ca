//! Compression pipeline driver
//!
//! Runs both normalization strategies end to end over one mesh or a directory
//! of meshes, persists every intermediate artifact and collects the per-mesh
//! error figures into a summary table.
//!
//! - [`compress_vertices`]: the in-memory round trip for one strategy
//! - [`process_mesh`]: load, compress with both strategies, write artifacts
//! - [`run_batch`]: every `.obj` in a directory, with failure isolation

pub mod config;
pub mod process;
pub mod batch;

pub use config::*;
pub use process::*;
pub use batch::*;
