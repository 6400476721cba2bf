//! Superstore Report - Sales KPIs & Static Charts
//!
//! Loads `superstore_sales.csv`, cleans it, prints three KPIs and writes four
//! chart images to `figures/`.

mod charts;
mod config;
mod data;
mod report;
mod stats;

use config::ReportConfig;
use log::info;

fn main() -> anyhow::Result<()> {
    // Errors only unless RUST_LOG says otherwise
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();

    let config = ReportConfig::default();
    let mut stdout = std::io::stdout().lock();
    let report = report::run(&config, &mut stdout)?;
    info!("report covers {} clean records", report.record_count);

    Ok(())
}
