//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `seo_analyzer` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Printing the rendered reports
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use seo_analyzer::initialization::init_logger_with;
use seo_analyzer::{render_reports, run_analysis, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments into Config
    let config = Config::parse();

    // Initialize logger based on config
    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    let format = config.format;
    let max_recommendations = config.max_recommendations;

    match run_analysis(config).await {
        Ok(run) => {
            if !run.reports.is_empty() {
                let rendered = render_reports(&run.reports, format, max_recommendations)
                    .context("Failed to render reports")?;
                println!("{rendered}");
            }
            // Partial success still prints what was analyzed
            if run.successful == 0 {
                eprintln!("seo_analyzer error: no page could be analyzed");
                process::exit(1);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("seo_analyzer error: {:#}", e);
            process::exit(1);
        }
    }
}
