use std::fs;
use std::path::PathBuf;

use super::{ReportData, ReportError, Reporter, StageStatus};

/// A reporter that writes a self-contained HTML page: hardware and scenario
/// cards, a p95 trend chart over the escalation stages, the per-stage table
/// and the winner banner. Styling comes from CDN-hosted Tailwind and
/// Chart.js, so the file renders without any local assets.
#[derive(Debug, Clone)]
pub struct HtmlReporter {
    /// Destination path; parent directories are created as needed.
    output: PathBuf,
}

impl HtmlReporter {
    /// Create a reporter writing to the given path.
    pub fn new(output: PathBuf) -> Self {
        Self { output }
    }

    /// Path the report will be written to.
    pub fn output_path(&self) -> &PathBuf {
        &self.output
    }

    fn round2(value: f64) -> f64 {
        (value * 100.0).round() / 100.0
    }

    fn status_badge_classes(status: StageStatus) -> &'static str {
        match status {
            StageStatus::Stable => "bg-green-100 text-green-800",
            StageStatus::Warning => "bg-yellow-100 text-yellow-800",
            StageStatus::Critical => "bg-red-100 text-red-800",
        }
    }

    fn table_rows(data: &ReportData) -> String {
        let mut rows = String::new();
        for row in &data.rows {
            let status = data.status_for(row.sync_p95);
            rows.push_str("<tr class=\"bg-white border-b hover:bg-gray-50\">");
            rows.push_str(&format!(
                "<td class=\"px-6 py-4 font-medium text-gray-900\">{}</td>",
                row.label
            ));
            rows.push_str(&format!(
                "<td class=\"px-6 py-4\">{:.1} ms</td>",
                row.sync_p95
            ));
            rows.push_str(&format!(
                "<td class=\"px-6 py-4 text-indigo-600 font-bold\">{:.1} ms</td>",
                row.async_p95
            ));
            rows.push_str(&format!(
                "<td class=\"px-6 py-4\"><span class=\"{} text-xs font-medium px-2.5 py-0.5 rounded\">{}</span></td>",
                Self::status_badge_classes(status),
                status.as_str()
            ));
            rows.push_str("</tr>");
        }
        rows
    }

    /// Render the full page.
    fn render(data: &ReportData) -> Result<String, ReportError> {
        let labels: Vec<&str> = data.rows.iter().map(|r| r.label.as_str()).collect();
        let sync_p95: Vec<f64> = data.rows.iter().map(|r| Self::round2(r.sync_p95)).collect();
        let async_p95: Vec<f64> = data.rows.iter().map(|r| Self::round2(r.async_p95)).collect();

        let labels_json = serde_json::to_string(&labels)?;
        let sync_json = serde_json::to_string(&sync_p95)?;
        let async_json = serde_json::to_string(&async_p95)?;

        let max_load = data
            .sync_run
            .stages
            .iter()
            .map(|s| s.target_load)
            .max()
            .unwrap_or(0);
        let total_secs: i64 = stagediff_core::STAGES.iter().map(|s| s.duration_secs).sum();
        let ramp: Vec<String> = data
            .rows
            .iter()
            .zip(data.sync_run.stages.iter())
            .map(|(_, s)| s.target_load.to_string())
            .collect();

        let mut page = String::new();
        page.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"UTF-8\"><title>High-Load Performance Report</title>");
        page.push_str("<script src=\"https://cdn.tailwindcss.com\"></script><script src=\"https://cdn.jsdelivr.net/npm/chart.js\"></script>");
        page.push_str("<style>body { font-family: sans-serif; background: #f3f4f6; } .card { background: white; border-radius: 1rem; box-shadow: 0 4px 6px -1px rgb(0 0 0 / 0.1); }</style></head>");
        page.push_str("<body class=\"p-6 md:p-12\"><div class=\"max-w-6xl mx-auto\"><header class=\"mb-12 text-center\">");
        page.push_str("<h1 class=\"text-4xl font-extrabold text-gray-900 tracking-tight\">High-Load Performance Report</h1>");
        page.push_str(&format!(
            "<p class=\"text-gray-500 mt-3 text-lg\">Spike scenario: {} vs {} stability comparison</p>",
            data.sync_run.label, data.async_run.label
        ));
        page.push_str("<p class=\"text-gray-400 mt-2 text-sm max-w-2xl mx-auto\">Step stress test; per-stage statistics re-aggregated from raw CSV logs.</p>");
        page.push_str(&format!(
            "<div class=\"mt-6 px-6 py-2 bg-indigo-600 text-white rounded-full inline-block font-bold shadow-lg\">Peak Load Winner: {} ({:.1}% latency improvement)</div></header>",
            data.verdict.winner_label, data.verdict.improvement_percent
        ));

        // Hardware and scenario cards.
        page.push_str("<div class=\"mb-12 grid grid-cols-1 md:grid-cols-2 gap-6\"><div class=\"p-6 bg-gray-50 rounded-xl border border-gray-200\"><h3 class=\"text-sm font-bold text-gray-500 uppercase tracking-wider mb-4 border-b pb-2\">Hardware Spec</h3>");
        page.push_str(&format!(
            "<div class=\"space-y-3 text-sm\"><div class=\"flex justify-between\"><span class=\"text-gray-400\">Processor</span><span class=\"font-semibold text-gray-700\">{}</span></div>",
            data.hardware.processor
        ));
        page.push_str(&format!(
            "<div class=\"flex justify-between\"><span class=\"text-gray-400\">Memory (RAM)</span><span class=\"font-semibold text-gray-700\">{}</span></div></div></div>",
            data.hardware.memory
        ));
        page.push_str("<div class=\"p-6 bg-gray-50 rounded-xl border border-gray-200\"><h3 class=\"text-sm font-bold text-gray-500 uppercase tracking-wider mb-4 border-b pb-2\">Test Scenario (Step Stress)</h3>");
        page.push_str(&format!(
            "<div class=\"space-y-3 text-sm\"><div class=\"flex justify-between\"><span class=\"text-gray-400\">Max VUs</span><span class=\"font-semibold text-gray-700\">{} Users</span></div>",
            max_load
        ));
        page.push_str(&format!(
            "<div class=\"flex justify-between\"><span class=\"text-gray-400\">Duration</span><span class=\"font-semibold text-gray-700\">{}m {}s</span></div>",
            total_secs / 60,
            total_secs % 60
        ));
        page.push_str(&format!(
            "<div class=\"flex justify-between\"><span class=\"text-gray-400\">Stages</span><span class=\"font-semibold text-gray-700\">{} VU</span></div></div></div></div>",
            ramp.join(" -> ")
        ));

        // Trend chart.
        page.push_str("<div class=\"card p-8 mb-12\"><h3 class=\"text-xl font-bold text-gray-800 mb-2\">Latency trend under increasing load</h3>");
        page.push_str("<p class=\"text-sm text-gray-400 mb-6\">P95 request duration per stage; lower is better.</p>");
        page.push_str("<div class=\"h-96\"><canvas id=\"trendChart\"></canvas></div></div>");

        // Stage table.
        page.push_str("<div class=\"card p-8 overflow-hidden\"><h3 class=\"text-lg font-bold text-gray-800 mb-6\">Per-stage detail (P95 latency)</h3>");
        page.push_str(&format!(
            "<div class=\"overflow-x-auto\"><table class=\"min-w-full text-sm text-left text-gray-500\"><thead class=\"text-xs text-gray-700 uppercase bg-gray-50\"><tr><th class=\"px-6 py-3\">Stage (Load)</th><th class=\"px-6 py-3\">{}</th><th class=\"px-6 py-3\">{}</th><th class=\"px-6 py-3\">Status</th></tr></thead><tbody>{}</tbody></table></div></div></div>",
            data.sync_run.label,
            data.async_run.label,
            Self::table_rows(data)
        ));

        // Chart.js wiring.
        page.push_str("<script>const ctx = document.getElementById(\"trendChart\").getContext(\"2d\"); new Chart(ctx, { type: \"line\", data: {");
        page.push_str(&format!("labels: {}, datasets: [", labels_json));
        page.push_str(&format!(
            "{{ label: {}, data: {}, borderColor: \"#ef4444\", backgroundColor: \"#ef4444\", tension: 0.3, pointRadius: 6, pointHoverRadius: 8 }},",
            serde_json::to_string(&data.sync_run.label)?,
            sync_json
        ));
        page.push_str(&format!(
            "{{ label: {}, data: {}, borderColor: \"#6366f1\", backgroundColor: \"#6366f1\", tension: 0.3, pointRadius: 6, pointHoverRadius: 8 }}",
            serde_json::to_string(&data.async_run.label)?,
            async_json
        ));
        page.push_str("]}, options: { responsive: true, maintainAspectRatio: false, scales: { y: { beginAtZero: true, title: { display: true, text: \"Latency (ms)\" }, grid: { color: \"#f3f4f6\" } }, x: { grid: { display: false } } },");
        page.push_str("plugins: { tooltip: { mode: \"index\", intersect: false, padding: 10, backgroundColor: \"rgba(0,0,0,0.8)\" }, legend: { position: \"top\", labels: { usePointStyle: true, padding: 20 } } } } });");
        page.push_str("</script></body></html>");

        Ok(page)
    }
}

impl Reporter for HtmlReporter {
    fn report(&self, data: &ReportData) -> Result<(), ReportError> {
        if let Some(parent) = self.output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let page = Self::render(data)?;
        fs::write(&self.output, page)?;
        Ok(())
    }
}
