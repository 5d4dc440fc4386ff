use anyhow::{Context, Result};
use clap::Parser;
use stagediff::{
    aggregate, load_samples, Cli, Config, HardwareInfo, HtmlReporter, JsonReporter, ReportData,
    Reporter, RunReport, TerminalReporter, STAGES,
};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config and apply CLI overrides
    let mut config = if cli.config == Path::new(".stagediff.toml") {
        Config::load_or_default()?
    } else {
        Config::load(&cli.config)?
    };
    cli.apply_to_config(&mut config);

    if cli.verbose {
        eprintln!("Configuration: {:?}", config);
    }

    // 1. Load both runs. The loads are independent and degrade to empty
    //    sample sequences on any source problem, so neither can abort the
    //    report for the other.
    eprintln!("Loading samples...");
    let sync_path = config.runs.sync_csv.clone();
    let async_path = config.runs.async_csv.clone();
    let (sync_samples, async_samples) = tokio::join!(
        tokio::task::spawn_blocking(move || load_samples(&sync_path)),
        tokio::task::spawn_blocking(move || load_samples(&async_path)),
    );
    let sync_samples = sync_samples.context("Sync load task panicked")?;
    let async_samples = async_samples.context("Async load task panicked")?;

    if cli.verbose {
        eprintln!(
            "Loaded {} sync samples, {} async samples",
            sync_samples.len(),
            async_samples.len()
        );
    }

    // 2. Aggregate each run over the fixed stage ramp
    eprintln!("Aggregating stages...");
    let sync_run = RunReport {
        label: config.runs.sync_label.clone(),
        stages: aggregate(&sync_samples, &STAGES),
    };
    let async_run = RunReport {
        label: config.runs.async_label.clone(),
        stages: aggregate(&async_samples, &STAGES),
    };

    // 3. Derive the verdict and assemble the report inputs
    let data = ReportData::build(
        sync_run,
        async_run,
        HardwareInfo::detect(),
        config.report.warn_threshold_ms,
        config.report.critical_threshold_ms,
    );

    // 4. Render
    let terminal = if cli.no_color {
        TerminalReporter::without_colors()
    } else {
        TerminalReporter::new()
    };
    terminal
        .report(&data)
        .context("Failed to render terminal report")?;

    if cli.json {
        JsonReporter::new()
            .report(&data)
            .context("Failed to render JSON report")?;
    }

    if cli.wants_html() {
        let reporter = HtmlReporter::new(config.report.html_output.clone());
        reporter
            .report(&data)
            .context("Failed to write HTML report")?;
        eprintln!("Report written to {}", reporter.output_path().display());
    }

    Ok(())
}
