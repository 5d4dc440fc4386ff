use serde::Serialize;
use thiserror::Error;

use stagediff_core::{compare, stage_rows, ComparisonVerdict, StageRow, StageStats};

use crate::hardware::HardwareInfo;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One run's contribution to the report: its display label and per-stage
/// statistics.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub label: String,
    pub stages: Vec<StageStats>,
}

/// Everything a renderer needs: both runs, the derived verdict, the paired
/// trend rows, the host descriptors and the status thresholds.
#[derive(Debug, Clone, Serialize)]
pub struct ReportData {
    pub sync_run: RunReport,
    pub async_run: RunReport,
    pub verdict: ComparisonVerdict,
    pub rows: Vec<StageRow>,
    pub hardware: HardwareInfo,
    pub warn_threshold_ms: f64,
    pub critical_threshold_ms: f64,
}

/// Health classification of a stage, keyed off the sync path's p95.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    Stable,
    Warning,
    Critical,
}

impl StageStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            StageStatus::Stable => "STABLE",
            StageStatus::Warning => "WARNING",
            StageStatus::Critical => "CRITICAL",
        }
    }
}

impl ReportData {
    /// Assemble the report inputs, deriving the verdict and trend rows at
    /// the fixed peak stage.
    pub fn build(
        sync_run: RunReport,
        async_run: RunReport,
        hardware: HardwareInfo,
        warn_threshold_ms: f64,
        critical_threshold_ms: f64,
    ) -> Self {
        let verdict = compare(
            &sync_run.stages,
            &async_run.stages,
            stagediff_core::PEAK_STAGE_INDEX,
            &sync_run.label,
            &async_run.label,
        );
        let rows = stage_rows(&sync_run.stages, &async_run.stages);

        Self {
            sync_run,
            async_run,
            verdict,
            rows,
            hardware,
            warn_threshold_ms,
            critical_threshold_ms,
        }
    }

    /// Classify a stage by its sync-path p95.
    pub fn status_for(&self, sync_p95: f64) -> StageStatus {
        if sync_p95 > self.critical_threshold_ms {
            StageStatus::Critical
        } else if sync_p95 > self.warn_threshold_ms {
            StageStatus::Warning
        } else {
            StageStatus::Stable
        }
    }
}

pub trait Reporter: Send + Sync {
    fn report(&self, data: &ReportData) -> Result<(), ReportError>;
}

mod html;
mod json;
mod terminal;

pub use html::HtmlReporter;
pub use json::JsonReporter;
pub use terminal::TerminalReporter;
