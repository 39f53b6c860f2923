//! Filesystem utilities for assetgen.
//!
//! Outputs are the only durable state the pipeline has: a file at an output
//! path means "done". Writes therefore go through [`write_output`], which can
//! stage content in a temp file so an interrupted run never leaves a
//! truncated file at the gated path.

pub mod atomic;

pub use atomic::{atomic_write, write_output};
