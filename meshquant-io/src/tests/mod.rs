//! Test modules for meshquant-io
//!
//! Round-trip tests across the mesh formats and the compression artifacts
//! written next to them.
