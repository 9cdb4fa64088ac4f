//! Stock Profile - renders the Netflix 2017 charts and deck.
//!
//! Reads `NFLX.csv`, `DJI.csv` and `NFLX_daily_by_quarter.csv` from the
//! working directory unless `stock_profile.json` says otherwise.

use anyhow::Context;
use std::path::Path;
use stock_profile::config::{ReportConfig, CONFIG_FILE};
use stock_profile::{logging, report};
use tracing::info;

fn main() -> anyhow::Result<()> {
    logging::init();

    let config = ReportConfig::load_or_default(Path::new(CONFIG_FILE))
        .context("failed to load report configuration")?;

    let summary = report::run(&config).context("stock profile report failed")?;

    info!(
        charts = summary.charts.len(),
        deck = summary.deck.as_ref().map(|p| p.display().to_string()).unwrap_or_default(),
        "done"
    );
    Ok(())
}
