use std::io;

use super::{ReportData, ReportError, Reporter};

/// A reporter that prints the full report data as pretty JSON to stdout,
/// for machine consumption or ad-hoc inspection with jq.
#[derive(Debug, Clone, Default)]
pub struct JsonReporter;

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }

    fn write_report(&self, writer: &mut impl io::Write, data: &ReportData) -> Result<(), ReportError> {
        serde_json::to_writer_pretty(&mut *writer, data)?;
        writeln!(writer)?;
        Ok(())
    }
}

impl Reporter for JsonReporter {
    fn report(&self, data: &ReportData) -> Result<(), ReportError> {
        let stdout = io::stdout();
        let mut writer = stdout.lock();
        self.write_report(&mut writer, data)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::fixture_data;
    use super::*;

    #[test]
    fn test_json_output_roundtrips() {
        let reporter = JsonReporter::new();
        let data = fixture_data(1000.0, 400.0);

        let mut buffer = Vec::new();
        reporter.write_report(&mut buffer, &data).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["verdict"]["winner_label"], "Async");
        assert_eq!(value["verdict"]["improvement_percent"], 60.0);
        assert_eq!(value["rows"].as_array().unwrap().len(), 4);
        assert_eq!(value["sync_run"]["stages"].as_array().unwrap().len(), 5);
    }
}
