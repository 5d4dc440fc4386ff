//! stagediff: sync vs async load-test comparison reports.
//!
//! This crate wraps the aggregation core in a CLI: it loads the raw CSV
//! output of two k6 runs, aggregates each into per-stage latency
//! statistics, derives the peak-load verdict, and renders the result to
//! the terminal and optionally to HTML or JSON.

pub mod cli;
pub mod config;
pub mod hardware;
pub mod report;

// Re-export core types for convenience
pub use stagediff_core::{
    aggregate, compare, load_samples, parse_samples, stage_rows, ComparisonVerdict, Sample,
    StageDefinition, StageRow, StageStats, PEAK_STAGE_INDEX, STAGES, TARGET_METRIC,
};

// Re-export main types from this crate
pub use cli::Cli;
pub use config::Config;
pub use hardware::HardwareInfo;
pub use report::{
    HtmlReporter, JsonReporter, ReportData, ReportError, Reporter, RunReport, TerminalReporter,
};
