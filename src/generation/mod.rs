//! Sound generation module.
//!
//! Provides the per-sound pipeline and the run report.

pub mod pipeline;

// Re-export commonly used items
pub use pipeline::{prepare_output_dir, produce, produce_all, RunReport, SoundKind, SoundReport};
