//! Deriving the headline sync-vs-async verdict from aggregated stage stats.

use serde::Serialize;

use crate::stage::StageStats;

/// The headline outcome of one report: which path held up better at peak
/// load, and by how much.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonVerdict {
    /// Label of the winning path.
    pub winner_label: String,
    /// Relative p95 improvement of the async path over the sync path at the
    /// peak stage, in percent. Positive means async was faster.
    pub improvement_percent: f64,
}

/// One per-stage pairing of the two runs' p95 latencies, as consumed by the
/// trend chart and the stage table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageRow {
    pub label: String,
    pub sync_p95: f64,
    pub async_p95: f64,
}

/// Compare the two runs at the designated peak stage.
///
/// Reads the p95 at `peak_stage_index` from each stats sequence, falling
/// back to `0.0` when a sequence is too short (or empty) — a run whose
/// source file was missing still produces a verdict.
///
/// The improvement is `(sync_p95 - async_p95) / sync_p95 * 100`. When the
/// sync p95 is zero the improvement is reported as `0.0`; that is a
/// division-by-zero policy, not a claim that the paths performed equally.
/// The async path wins only on a strict `async_p95 < sync_p95`; ties go to
/// sync.
pub fn compare(
    sync_stats: &[StageStats],
    async_stats: &[StageStats],
    peak_stage_index: usize,
    sync_label: &str,
    async_label: &str,
) -> ComparisonVerdict {
    let sync_p95 = peak_p95(sync_stats, peak_stage_index);
    let async_p95 = peak_p95(async_stats, peak_stage_index);

    let improvement_percent = if sync_p95 > 0.0 {
        (sync_p95 - async_p95) / sync_p95 * 100.0
    } else {
        0.0
    };

    let winner_label = if async_p95 < sync_p95 {
        async_label.to_string()
    } else {
        sync_label.to_string()
    };

    ComparisonVerdict {
        winner_label,
        improvement_percent,
    }
}

fn peak_p95(stats: &[StageStats], peak_stage_index: usize) -> f64 {
    stats.get(peak_stage_index).map_or(0.0, |s| s.p95)
}

/// Pair the two runs' stage stats for the trend chart.
///
/// The terminal cooldown stage carries no load and is excluded from trend
/// output; only the escalation stages are paired. Labels are taken from the
/// sync run's stats.
pub fn stage_rows(sync_stats: &[StageStats], async_stats: &[StageStats]) -> Vec<StageRow> {
    let paired = sync_stats.len().min(async_stats.len());
    sync_stats
        .iter()
        .zip(async_stats.iter())
        .take(paired.saturating_sub(1))
        .map(|(sync, asynchronous)| StageRow {
            label: sync.label.clone(),
            sync_p95: sync.p95,
            async_p95: asynchronous.p95,
        })
        .collect()
}
