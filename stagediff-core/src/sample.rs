//! Metric loading from k6 raw CSV output.
//!
//! k6 writes one row per metric emission; this module filters to the HTTP
//! request duration metric and normalizes timestamps to run-relative
//! offsets. Loading degrades gracefully: a missing or unusable source
//! yields an empty sample sequence so that one absent benchmark run never
//! takes down the report for the other.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

/// The metric name retained by the loader; rows for any other metric are
/// discarded.
pub const TARGET_METRIC: &str = "http_req_duration";

/// A single latency observation, normalized to the run's own timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Whole seconds elapsed since the first retained row of this run.
    pub offset_secs: i64,
    /// Observed request duration in milliseconds.
    pub value_ms: f64,
}

impl Sample {
    /// Create a new sample.
    pub fn new(offset_secs: i64, value_ms: f64) -> Self {
        Self {
            offset_secs,
            value_ms,
        }
    }
}

/// Load samples for [`TARGET_METRIC`] from a CSV file on disk.
///
/// A missing or unreadable file yields an empty sequence rather than an
/// error; callers are statically guaranteed a usable (possibly empty)
/// sample list.
pub fn load_samples(path: &Path) -> Vec<Sample> {
    match File::open(path) {
        Ok(file) => parse_samples(BufReader::new(file)),
        Err(_) => Vec::new(),
    }
}

/// Parse samples for [`TARGET_METRIC`] from CSV text.
///
/// The header row must name `metric_name`, `timestamp` and `metric_value`
/// columns (in any order; extra columns are ignored) — if any is absent the
/// whole source is treated as unavailable and an empty sequence is
/// returned. Timestamps are parsed as (possibly fractional) seconds and
/// truncated to whole seconds; the first retained row anchors offset zero.
/// Rows that are too short or carry an unparseable number are skipped
/// individually; a reader-level record error abandons the source entirely.
///
/// Rows are emitted in input order. The source is assumed to be
/// time-ordered already; no re-sort happens here.
pub fn parse_samples<R: io::Read>(reader: R) -> Vec<Sample> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = match csv_reader.headers() {
        Ok(headers) => headers,
        Err(_) => return Vec::new(),
    };
    let idx_metric = headers.iter().position(|name| name == "metric_name");
    let idx_time = headers.iter().position(|name| name == "timestamp");
    let idx_value = headers.iter().position(|name| name == "metric_value");
    let (Some(idx_metric), Some(idx_time), Some(idx_value)) = (idx_metric, idx_time, idx_value)
    else {
        return Vec::new();
    };

    let mut samples = Vec::new();
    let mut anchor: Option<i64> = None;

    for record in csv_reader.records() {
        let record = match record {
            Ok(record) => record,
            // Total parse failure of the source: short-circuit to empty.
            Err(_) => return Vec::new(),
        };

        let (Some(metric), Some(raw_time), Some(raw_value)) = (
            record.get(idx_metric),
            record.get(idx_time),
            record.get(idx_value),
        ) else {
            // Row too short for the required columns.
            continue;
        };

        if metric != TARGET_METRIC {
            continue;
        }

        let Ok(timestamp) = raw_time.trim().parse::<f64>() else {
            continue;
        };
        let Ok(value_ms) = raw_value.trim().parse::<f64>() else {
            continue;
        };
        if !timestamp.is_finite() || !value_ms.is_finite() {
            continue;
        }

        // Truncate fractional seconds toward zero.
        let timestamp = timestamp as i64;
        let anchor_ts = *anchor.get_or_insert(timestamp);
        samples.push(Sample::new(timestamp - anchor_ts, value_ms));
    }

    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(csv_text: &str) -> Vec<Sample> {
        parse_samples(csv_text.as_bytes())
    }

    #[test]
    fn test_offsets_anchor_to_first_retained_row() {
        let samples = parse(
            "metric_name,timestamp,metric_value\n\
             http_req_duration,100,12.5\n\
             http_req_duration,103,15.0\n\
             http_req_duration,110,9.25\n",
        );

        let offsets: Vec<i64> = samples.iter().map(|s| s.offset_secs).collect();
        assert_eq!(offsets, vec![0, 3, 10]);
        assert_eq!(samples[0].value_ms, 12.5);
    }

    #[test]
    fn test_fractional_timestamps_truncate_to_seconds() {
        let samples = parse(
            "metric_name,timestamp,metric_value\n\
             http_req_duration,100.9,1.0\n\
             http_req_duration,102.1,2.0\n",
        );

        assert_eq!(samples[0].offset_secs, 0);
        assert_eq!(samples[1].offset_secs, 2);
    }

    #[test]
    fn test_other_metrics_are_discarded() {
        let samples = parse(
            "metric_name,timestamp,metric_value\n\
             vus,100,500\n\
             http_req_duration,100,42.0\n\
             http_reqs,101,1\n\
             http_req_duration,101,43.0\n",
        );

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].value_ms, 42.0);
        assert_eq!(samples[1].value_ms, 43.0);
    }

    #[test]
    fn test_anchor_ignores_discarded_leading_rows() {
        // The non-target row at t=50 must not anchor the run.
        let samples = parse(
            "metric_name,timestamp,metric_value\n\
             vus,50,100\n\
             http_req_duration,100,1.0\n\
             http_req_duration,105,2.0\n",
        );

        assert_eq!(samples[0].offset_secs, 0);
        assert_eq!(samples[1].offset_secs, 5);
    }

    #[test]
    fn test_header_order_does_not_matter() {
        let samples = parse(
            "timestamp,extra,metric_value,metric_name\n\
             100,x,7.5,http_req_duration\n",
        );

        assert_eq!(samples, vec![Sample::new(0, 7.5)]);
    }

    #[test]
    fn test_missing_required_column_yields_empty() {
        let samples = parse(
            "metric_name,time,metric_value\n\
             http_req_duration,100,1.0\n",
        );
        assert!(samples.is_empty());
    }

    #[test]
    fn test_malformed_rows_are_skipped_individually() {
        let samples = parse(
            "metric_name,timestamp,metric_value\n\
             http_req_duration,100,1.0\n\
             http_req_duration,not-a-number,2.0\n\
             http_req_duration,102,oops\n\
             http_req_duration,103\n\
             http_req_duration,104,4.0\n",
        );

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1], Sample::new(4, 4.0));
    }

    #[test]
    fn test_empty_source_yields_empty() {
        assert!(parse("").is_empty());
        assert!(parse("metric_name,timestamp,metric_value\n").is_empty());
    }

    #[test]
    fn test_missing_file_yields_empty() {
        let samples = load_samples(Path::new("/nonexistent/path/sync_raw.csv"));
        assert!(samples.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            b"metric_name,timestamp,metric_value\n\
              http_req_duration,1000,250.0\n\
              http_req_duration,1001,275.5\n",
        )
        .unwrap();

        let samples = load_samples(file.path());
        assert_eq!(
            samples,
            vec![Sample::new(0, 250.0), Sample::new(1, 275.5)]
        );
    }
}
