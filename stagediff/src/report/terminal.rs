use std::io::{self, Write};

use colored::Colorize;

use super::{ReportData, ReportError, Reporter, StageStatus};

/// A reporter that prints the stage table and verdict to the terminal.
#[derive(Debug, Clone, Default)]
pub struct TerminalReporter {
    /// Whether to use colors in output (defaults to true).
    use_colors: bool,
}

impl TerminalReporter {
    /// Create a new terminal reporter with default settings.
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    /// Create a terminal reporter with color output disabled.
    pub fn without_colors() -> Self {
        Self { use_colors: false }
    }

    /// Format a latency in milliseconds.
    fn format_latency(ms: f64) -> String {
        format!("{:.1} ms", ms)
    }

    /// Format the status column with appropriate coloring.
    fn format_status(&self, status: StageStatus) -> String {
        let text = status.as_str();
        if !self.use_colors {
            return text.to_string();
        }
        match status {
            StageStatus::Stable => text.green().to_string(),
            StageStatus::Warning => text.yellow().to_string(),
            StageStatus::Critical => text.red().bold().to_string(),
        }
    }

    /// Print the table header.
    fn print_header(&self, writer: &mut impl Write, data: &ReportData) -> io::Result<()> {
        writeln!(writer)?;
        let header = format!(
            "{:<28} {:>10} {:>14} {:>14} {:>10}",
            "Stage",
            "Target VU",
            data.sync_run.label.as_str(),
            data.async_run.label.as_str(),
            "Status"
        );
        if self.use_colors {
            writeln!(writer, "{}", header.bold())?;
        } else {
            writeln!(writer, "{}", header)?;
        }
        writeln!(writer, "{}", "-".repeat(80))?;
        Ok(())
    }

    /// Print one stage row (p95 latencies side by side).
    fn print_row(
        &self,
        writer: &mut impl Write,
        data: &ReportData,
        index: usize,
    ) -> io::Result<()> {
        let row = &data.rows[index];
        let target_load = data
            .sync_run
            .stages
            .get(index)
            .map_or(0, |s| s.target_load);
        let status = data.status_for(row.sync_p95);

        // The colored status string may carry ANSI codes; pad manually from
        // the visible width.
        let status_text = self.format_status(status);
        let status_padding = 10_usize.saturating_sub(status.as_str().len());

        writeln!(
            writer,
            "{:<28} {:>10} {:>14} {:>14} {:>width$}{}",
            row.label,
            target_load,
            Self::format_latency(row.sync_p95),
            Self::format_latency(row.async_p95),
            "",
            status_text,
            width = status_padding,
        )?;
        Ok(())
    }

    /// Print the verdict banner.
    fn print_verdict(&self, writer: &mut impl Write, data: &ReportData) -> io::Result<()> {
        writeln!(writer, "{}", "-".repeat(80))?;

        let banner = format!(
            "Peak load winner: {} ({:.1}% p95 improvement)",
            data.verdict.winner_label, data.verdict.improvement_percent
        );
        if self.use_colors {
            writeln!(writer, "{}", banner.green().bold())?;
        } else {
            writeln!(writer, "{}", banner)?;
        }
        writeln!(writer)?;
        Ok(())
    }

    fn write_report(&self, writer: &mut impl Write, data: &ReportData) -> io::Result<()> {
        self.print_header(writer, data)?;
        for index in 0..data.rows.len() {
            self.print_row(writer, data, index)?;
        }
        self.print_verdict(writer, data)?;
        Ok(())
    }
}

impl Reporter for TerminalReporter {
    fn report(&self, data: &ReportData) -> Result<(), ReportError> {
        let stdout = io::stdout();
        let mut writer = stdout.lock();
        self.write_report(&mut writer, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::fixture_data;
    use super::*;

    #[test]
    fn test_format_latency() {
        assert_eq!(TerminalReporter::format_latency(1234.56), "1234.6 ms");
        assert_eq!(TerminalReporter::format_latency(0.0), "0.0 ms");
    }

    #[test]
    fn test_report_to_buffer() {
        let reporter = TerminalReporter::without_colors();
        let data = fixture_data(1000.0, 400.0);

        let mut buffer = Vec::new();
        reporter.write_report(&mut buffer, &data).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("Stage"));
        assert!(output.contains("Warm-up (0-100 VU)"));
        assert!(output.contains("Spike (1000-1500 VU)"));
        assert!(!output.contains("Cooldown"));
        assert!(output.contains("1000.0 ms"));
        assert!(output.contains("400.0 ms"));
        assert!(output.contains("Peak load winner: Async (60.0% p95 improvement)"));
        assert!(output.contains("STABLE"));
    }

    #[test]
    fn test_critical_status_rendered() {
        let reporter = TerminalReporter::without_colors();
        let data = fixture_data(6000.0, 400.0);

        let mut buffer = Vec::new();
        reporter.write_report(&mut buffer, &data).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("CRITICAL"));
    }
}
