//! Report pipeline: load the three tables, render the charts, write the files.

use crate::charts::{
    render_dual_line_comparison, render_earnings_comparison, render_quarterly_distribution,
    render_revenue_and_earnings_bars, ChartImage, ChartKind, RenderError,
};
use crate::config::ReportConfig;
use crate::data::{
    load_table, netflix_eps_2017, netflix_revenue_and_earnings, normalize, DailyBar,
    DataLoadError, EarningsPoint, PriceBar, PriceTable, RevenueEarningsPoint, SeriesLayout,
};
use crate::output::{write_atomically, OutputError};
use crate::ppt::{DeckError, PptGenerator};
use rayon::prelude::*;
use std::path::PathBuf;
use std::time::Instant;
use thiserror::Error;
use tracing::{error, info};

#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Load(#[from] DataLoadError),
    #[error(transparent)]
    Output(#[from] OutputError),
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error("{} of {} charts failed: {}", .failed.len(), .total, chart_list(.failed))]
    ChartsFailed { failed: Vec<ChartKind>, total: usize },
}

fn chart_list(kinds: &[ChartKind]) -> String {
    kinds.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// Everything the four charts are drawn from.
#[derive(Debug, Clone)]
pub struct StockData {
    pub netflix_monthly: Vec<PriceBar>,
    pub dow_jones_monthly: Vec<PriceBar>,
    pub netflix_daily: Vec<DailyBar>,
    pub earnings: Vec<EarningsPoint>,
    pub revenue: Vec<RevenueEarningsPoint>,
}

/// Files produced by a successful run.
#[derive(Debug, Clone, Default)]
pub struct ReportSummary {
    pub charts: Vec<PathBuf>,
    pub deck: Option<PathBuf>,
}

fn load_normalized(config: &ReportConfig, file: &str, layout: SeriesLayout) -> Result<PriceTable, DataLoadError> {
    let table = load_table(config.input_path(file), layout)?;
    Ok(normalize(table))
}

/// Load and normalize the three CSVs, then project them into typed rows.
pub fn load_stock_data(config: &ReportConfig) -> Result<StockData, DataLoadError> {
    let inputs = &config.inputs;
    let netflix = load_normalized(config, &inputs.netflix_monthly, SeriesLayout::Monthly)?;
    let dow_jones = load_normalized(config, &inputs.dow_jones_monthly, SeriesLayout::Monthly)?;
    let daily = load_normalized(config, &inputs.netflix_daily, SeriesLayout::DailyQuarterly)?;

    Ok(StockData {
        netflix_monthly: netflix.monthly_series()?,
        dow_jones_monthly: dow_jones.monthly_series()?,
        netflix_daily: daily.daily_series()?,
        earnings: netflix_eps_2017(),
        revenue: netflix_revenue_and_earnings(),
    })
}

pub fn render_chart(kind: ChartKind, data: &StockData, size: (u32, u32)) -> Result<ChartImage, RenderError> {
    match kind {
        ChartKind::QuarterlyDistribution => render_quarterly_distribution(&data.netflix_daily, size),
        ChartKind::EarningsComparison => render_earnings_comparison(&data.earnings, size),
        ChartKind::RevenueAndEarnings => render_revenue_and_earnings_bars(&data.revenue, size),
        ChartKind::DualLineComparison => {
            render_dual_line_comparison(&data.netflix_monthly, &data.dow_jones_monthly, size)
        }
    }
}

/// Render every chart in parallel; results come back in `ChartKind::ALL` order.
pub fn render_charts(data: &StockData, size: (u32, u32)) -> Vec<Result<ChartImage, RenderError>> {
    ChartKind::ALL[..]
        .par_iter()
        .map(|&kind| render_chart(kind, data, size))
        .collect()
}

/// Run the whole report.
///
/// A load error stops the run before anything is drawn. A chart that fails
/// to render is skipped; the others (and the deck) are still written and
/// the run ends with `ReportError::ChartsFailed`.
pub fn run(config: &ReportConfig) -> Result<ReportSummary, ReportError> {
    let start = Instant::now();
    let data = load_stock_data(config)?;
    info!(
        netflix_rows = data.netflix_monthly.len(),
        dow_jones_rows = data.dow_jones_monthly.len(),
        daily_rows = data.netflix_daily.len(),
        "loaded stock data"
    );

    let mut summary = ReportSummary::default();
    let mut images = Vec::new();
    let mut failed = Vec::new();

    for result in render_charts(&data, config.image_size()) {
        match result {
            Ok(image) => {
                let path = config.chart_path(image.kind);
                write_atomically(&path, &image.png)?;
                info!(chart = %image.kind, file = %path.display(), "wrote chart");
                summary.charts.push(path);
                images.push(image);
            }
            Err(e) => {
                error!(chart = %e.chart(), error = %e, "chart skipped");
                failed.push(e.chart());
            }
        }
    }

    if config.deck.enabled && !images.is_empty() {
        let deck = PptGenerator::build_deck(&config.deck.title, &config.deck.subtitle, &images)?;
        let path = config.deck_path();
        write_atomically(&path, &deck)?;
        info!(file = %path.display(), slides = images.len() + 2, "wrote deck");
        summary.deck = Some(path);
    }

    info!(
        written = summary.charts.len(),
        failed = failed.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "report finished"
    );

    if failed.is_empty() {
        Ok(summary)
    } else {
        Err(ReportError::ChartsFailed {
            failed,
            total: ChartKind::ALL.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charts_failed_lists_every_chart() {
        let err = ReportError::ChartsFailed {
            failed: vec![ChartKind::QuarterlyDistribution, ChartKind::DualLineComparison],
            total: 4,
        };
        assert_eq!(
            err.to_string(),
            "2 of 4 charts failed: quarterly distribution, dual line comparison"
        );
    }

    #[test]
    fn literal_charts_render_without_csv_input() {
        let data = StockData {
            netflix_monthly: Vec::new(),
            dow_jones_monthly: Vec::new(),
            netflix_daily: Vec::new(),
            earnings: netflix_eps_2017(),
            revenue: netflix_revenue_and_earnings(),
        };

        let results = render_charts(&data, (600, 400));
        let kinds: Vec<ChartKind> = results
            .iter()
            .map(|r| match r {
                Ok(image) => image.kind,
                Err(e) => e.chart(),
            })
            .collect();
        assert_eq!(kinds, ChartKind::ALL.to_vec());

        assert!(matches!(results[0], Err(RenderError::EmptyData { .. })));
        assert!(results[1].is_ok());
        assert!(results[2].is_ok());
        assert!(matches!(results[3], Err(RenderError::EmptyData { .. })));
    }
}
