//! Command-line interface for stagediff.

use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "stagediff")]
#[command(about = "Sync vs async load-test comparison reports from k6 raw CSV output")]
#[command(version)]
pub struct Cli {
    /// Raw CSV of the synchronous-path run (overrides config)
    #[arg(short, long, value_name = "PATH")]
    pub sync: Option<PathBuf>,

    /// Raw CSV of the asynchronous-path run (overrides config)
    #[arg(short = 'a', long = "async", value_name = "PATH")]
    pub async_csv: Option<PathBuf>,

    /// Write the HTML report (to the configured path unless --output is given)
    #[arg(long)]
    pub html: bool,

    /// Path for the HTML report (implies --html)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print the full report data as JSON to stdout
    #[arg(long)]
    pub json: bool,

    /// Disable colored terminal output
    #[arg(long)]
    pub no_color: bool,

    /// Path to config file
    #[arg(long, default_value = ".stagediff.toml")]
    pub config: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Whether an HTML report should be written.
    pub fn wants_html(&self) -> bool {
        self.html || self.output.is_some()
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI arguments take precedence over config file values.
    /// Only non-None optional values will override the config.
    pub fn apply_to_config(&self, config: &mut Config) {
        if let Some(sync) = &self.sync {
            config.runs.sync_csv = sync.clone();
        }

        if let Some(async_csv) = &self.async_csv {
            config.runs.async_csv = async_csv.clone();
        }

        if let Some(output) = &self.output {
            config.report.html_output = output.clone();
        }
    }
}
