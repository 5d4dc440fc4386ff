//! Core aggregation logic for stagediff.
//!
//! This crate turns raw k6 CSV output into per-stage latency statistics and
//! derives a sync-vs-async comparison verdict. It is deliberately free of
//! any rendering or CLI concerns; the `stagediff` binary consumes it.

pub mod compare;
pub mod sample;
pub mod stage;

// Re-export main types for convenience
pub use compare::{compare, stage_rows, ComparisonVerdict, StageRow};
pub use sample::{load_samples, parse_samples, Sample, TARGET_METRIC};
pub use stage::{aggregate, StageDefinition, StageStats, PEAK_STAGE_INDEX, STAGES};
