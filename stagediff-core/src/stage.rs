//! Partitioning samples into load stages and summarizing each window.

use serde::Serialize;

use crate::sample::Sample;

/// One step of the benchmark's load ramp.
///
/// Stage definitions are configuration, not data: the window layout is
/// determined purely by the configured durations, never by which windows
/// happen to contain samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageDefinition {
    /// How long the stage runs, in seconds.
    pub duration_secs: i64,
    /// The virtual-user level the load generator holds during the stage.
    pub target_load: u32,
    /// Human-readable stage name, carried through to the report.
    pub label: &'static str,
}

impl StageDefinition {
    /// Create a new stage definition.
    pub const fn new(duration_secs: i64, target_load: u32, label: &'static str) -> Self {
        Self {
            duration_secs,
            target_load,
            label,
        }
    }
}

/// The fixed step-stress ramp both runs are driven with: four 30-second
/// escalation steps followed by a cooldown.
pub const STAGES: [StageDefinition; 5] = [
    StageDefinition::new(30, 100, "Warm-up (0-100 VU)"),
    StageDefinition::new(30, 500, "Load (100-500 VU)"),
    StageDefinition::new(30, 1000, "Stress (500-1000 VU)"),
    StageDefinition::new(30, 1500, "Spike (1000-1500 VU)"),
    StageDefinition::new(30, 0, "Cooldown"),
];

/// Index of the spike stage within [`STAGES`]; the headline comparison is
/// taken at this stage, not at the terminal cooldown.
pub const PEAK_STAGE_INDEX: usize = 3;

/// Summary statistics for one stage window of one run.
///
/// An all-zero entry (count, average, p95 and max all zero) is the defined
/// representation for "no data in this window", not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageStats {
    pub label: String,
    pub target_load: u32,
    pub sample_count: usize,
    /// Arithmetic mean latency in milliseconds.
    pub average: f64,
    /// Nearest-rank 95th percentile latency in milliseconds.
    pub p95: f64,
    /// Maximum latency in milliseconds.
    pub max: f64,
}

impl StageStats {
    /// The zero-valued stats reported for a window without samples.
    fn empty(definition: &StageDefinition) -> Self {
        Self {
            label: definition.label.to_string(),
            target_load: definition.target_load,
            sample_count: 0,
            average: 0.0,
            p95: 0.0,
            max: 0.0,
        }
    }
}

/// Partition `samples` into the contiguous windows described by `stages`
/// and summarize each window.
///
/// Stage `i` owns offsets in `[sum(durations[0..i]), sum(durations[0..=i]))`,
/// so every sample lands in exactly one window or none (offsets past the
/// final window are dropped). The output has one entry per stage
/// definition, in definition order, regardless of how the samples are
/// distributed — including the case of no samples at all.
///
/// The percentile is the nearest-rank approximation at the truncated index
/// `count * 0.95`: for 20 sorted values that selects index 19, the largest
/// value. Downstream consumers compare against historical reports computed
/// this way, so the indexing is load-bearing and must not be swapped for an
/// interpolated percentile.
pub fn aggregate(samples: &[Sample], stages: &[StageDefinition]) -> Vec<StageStats> {
    let mut stats = Vec::with_capacity(stages.len());
    let mut window_start: i64 = 0;

    for definition in stages {
        let window_end = window_start + definition.duration_secs;

        let mut values: Vec<f64> = samples
            .iter()
            .filter(|s| window_start <= s.offset_secs && s.offset_secs < window_end)
            .map(|s| s.value_ms)
            .collect();
        values.sort_by(|a, b| a.total_cmp(b));

        if values.is_empty() {
            stats.push(StageStats::empty(definition));
        } else {
            let count = values.len();
            stats.push(StageStats {
                label: definition.label.to_string(),
                target_load: definition.target_load,
                sample_count: count,
                average: values.iter().sum::<f64>() / count as f64,
                p95: values[(count as f64 * 0.95) as usize],
                max: values[count - 1],
            });
        }

        // Windows advance even when the stage had no samples.
        window_start = window_end;
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_samples(start: i64, count: usize, value: f64) -> Vec<Sample> {
        (0..count)
            .map(|i| Sample::new(start + i as i64, value))
            .collect()
    }

    #[test]
    fn test_empty_input_yields_zero_stats_per_stage() {
        let stats = aggregate(&[], &STAGES);

        assert_eq!(stats.len(), STAGES.len());
        for (stat, definition) in stats.iter().zip(STAGES.iter()) {
            assert_eq!(stat.label, definition.label);
            assert_eq!(stat.target_load, definition.target_load);
            assert_eq!(stat.sample_count, 0);
            assert_eq!(stat.average, 0.0);
            assert_eq!(stat.p95, 0.0);
            assert_eq!(stat.max, 0.0);
        }
    }

    #[test]
    fn test_samples_partition_by_window() {
        let stages = [
            StageDefinition::new(10, 100, "first"),
            StageDefinition::new(10, 200, "second"),
        ];
        let samples = vec![
            Sample::new(0, 1.0),
            Sample::new(9, 2.0),
            Sample::new(10, 3.0), // window boundary belongs to the next stage
            Sample::new(19, 4.0),
            Sample::new(20, 5.0), // past the last window, dropped
        ];

        let stats = aggregate(&samples, &stages);

        assert_eq!(stats[0].sample_count, 2);
        assert_eq!(stats[0].max, 2.0);
        assert_eq!(stats[1].sample_count, 2);
        assert_eq!(stats[1].max, 4.0);
    }

    #[test]
    fn test_count_conservation() {
        let samples = uniform_samples(0, 200, 5.0);
        let stats = aggregate(&samples, &STAGES);

        let total: usize = stats.iter().map(|s| s.sample_count).sum();
        assert!(total <= samples.len());
        // 150 seconds of windows, one sample per second from offset 0.
        assert_eq!(total, 150);
    }

    #[test]
    fn test_windows_advance_past_empty_stages() {
        // No samples in the first window; the second window must still
        // start at t=10.
        let stages = [
            StageDefinition::new(10, 100, "empty"),
            StageDefinition::new(10, 200, "busy"),
        ];
        let samples = vec![Sample::new(12, 7.0), Sample::new(15, 9.0)];

        let stats = aggregate(&samples, &stages);

        assert_eq!(stats[0].sample_count, 0);
        assert_eq!(stats[0].p95, 0.0);
        assert_eq!(stats[1].sample_count, 2);
        assert_eq!(stats[1].average, 8.0);
    }

    #[test]
    fn test_p95_nearest_rank_index() {
        // 20 values 1..=20 in one window: index (20 * 0.95) = 19, the
        // largest value.
        let stages = [StageDefinition::new(30, 100, "only")];
        let samples: Vec<Sample> = (0..20)
            .map(|i| Sample::new(i, (i + 1) as f64))
            .collect();

        let stats = aggregate(&samples, &stages);

        assert_eq!(stats[0].sample_count, 20);
        assert_eq!(stats[0].p95, 20.0);
        assert_eq!(stats[0].max, 20.0);
        assert_eq!(stats[0].average, 10.5);
    }

    #[test]
    fn test_p95_single_sample() {
        let stages = [StageDefinition::new(30, 100, "only")];
        let stats = aggregate(&[Sample::new(0, 123.0)], &stages);

        // (1 * 0.95) truncates to index 0.
        assert_eq!(stats[0].p95, 123.0);
        assert_eq!(stats[0].max, 123.0);
    }

    #[test]
    fn test_values_sorted_within_window() {
        let stages = [StageDefinition::new(30, 100, "only")];
        let samples = vec![
            Sample::new(0, 30.0),
            Sample::new(1, 10.0),
            Sample::new(2, 20.0),
        ];

        let stats = aggregate(&samples, &stages);

        // (3 * 0.95) truncates to index 2 of the sorted values.
        assert_eq!(stats[0].p95, 30.0);
        assert_eq!(stats[0].max, 30.0);
        assert_eq!(stats[0].average, 20.0);
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let samples = uniform_samples(0, 100, 42.0);
        let first = aggregate(&samples, &STAGES);
        let second = aggregate(&samples, &STAGES);
        assert_eq!(first, second);
    }

    #[test]
    fn test_negative_offsets_fall_outside_all_windows() {
        let stages = [StageDefinition::new(10, 100, "only")];
        let stats = aggregate(&[Sample::new(-5, 1.0)], &stages);
        assert_eq!(stats[0].sample_count, 0);
    }

    #[test]
    fn test_fixed_ramp_shape() {
        assert_eq!(STAGES.len(), 5);
        assert_eq!(STAGES[PEAK_STAGE_INDEX].label, "Spike (1000-1500 VU)");
        assert_eq!(STAGES[PEAK_STAGE_INDEX].target_load, 1500);
        assert_eq!(STAGES[4].target_load, 0);
        let total: i64 = STAGES.iter().map(|s| s.duration_secs).sum();
        assert_eq!(total, 150);
    }
}
