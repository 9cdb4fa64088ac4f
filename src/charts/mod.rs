//! Charts module - Static chart rendering
//!
//! Every chart is built in two steps: a plan holding the exact geometry that
//! will be drawn, and a render pass that draws the plan with plotters into an
//! in-memory RGB buffer and encodes it as PNG.

mod bars;
mod lines;
mod scatter;
mod violin;

pub use bars::{
    bar_center, plan_revenue_and_earnings_bars, render_revenue_and_earnings_bars, Bar, BarPlan,
    BarSeries, BAR_WIDTH, GROUP_SPACING,
};
pub use lines::{plan_dual_line_comparison, render_dual_line_comparison, DualLinePlan, LinePanel};
pub use scatter::{
    plan_earnings_comparison, render_earnings_comparison, ScatterPlan, ScatterSeries,
};
pub use violin::{
    plan_quarterly_distribution, render_quarterly_distribution, Violin, ViolinPlan, ViolinShape,
    VIOLIN_WIDTH,
};

use image::{ImageFormat, RgbImage};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::fmt;
use std::io::Cursor;
use std::ops::Range;
use thiserror::Error;

pub(crate) type DrawResult = Result<(), Box<dyn std::error::Error>>;

pub(crate) type Canvas<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

pub(crate) const FONT: &str = "sans-serif";
pub(crate) const TITLE_SIZE: u32 = 28;
pub(crate) const LABEL_SIZE: u32 = 18;
pub(crate) const TICK_SIZE: u32 = 14;

// Category palette (seaborn "deep")
pub const PALETTE: [RGBColor; 4] = [
    RGBColor(76, 114, 176),  // Blue
    RGBColor(221, 132, 82),  // Orange
    RGBColor(85, 168, 104),  // Green
    RGBColor(196, 78, 82),   // Red
];

/// The four charts of the stock profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    QuarterlyDistribution,
    EarningsComparison,
    RevenueAndEarnings,
    DualLineComparison,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::QuarterlyDistribution,
        ChartKind::EarningsComparison,
        ChartKind::RevenueAndEarnings,
        ChartKind::DualLineComparison,
    ];

    /// Heading used for the chart's slide.
    pub fn slide_title(self) -> &'static str {
        match self {
            ChartKind::QuarterlyDistribution => "Netflix Stock Price Distribution, 2017",
            ChartKind::EarningsComparison => "Actual vs. Estimated Earnings Per Share",
            ChartKind::RevenueAndEarnings => "Revenue and Earnings, Last Four Quarters",
            ChartKind::DualLineComparison => "Netflix vs. Dow Jones, 2017",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChartKind::QuarterlyDistribution => "quarterly distribution",
            ChartKind::EarningsComparison => "earnings comparison",
            ChartKind::RevenueAndEarnings => "revenue and earnings",
            ChartKind::DualLineComparison => "dual line comparison",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("{chart}: no data to plot")]
    EmptyData { chart: ChartKind },
    #[error("{chart}: drawing failed: {message}")]
    Draw { chart: ChartKind, message: String },
    #[error("{chart}: PNG encoding failed: {source}")]
    Encode {
        chart: ChartKind,
        #[source]
        source: image::ImageError,
    },
}

impl RenderError {
    pub fn chart(&self) -> ChartKind {
        match self {
            RenderError::EmptyData { chart }
            | RenderError::Draw { chart, .. }
            | RenderError::Encode { chart, .. } => *chart,
        }
    }
}

/// A rendered chart, PNG-encoded.
#[derive(Debug, Clone)]
pub struct ChartImage {
    pub kind: ChartKind,
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

/// Draw onto a white `size` canvas and encode the result as PNG.
pub(crate) fn render_png<F>(kind: ChartKind, size: (u32, u32), draw: F) -> Result<ChartImage, RenderError>
where
    F: FnOnce(&Canvas<'_>) -> DrawResult,
{
    let (width, height) = size;
    let draw_error = |message: String| RenderError::Draw {
        chart: kind,
        message,
    };

    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, size).into_drawing_area();
        root.fill(&WHITE).map_err(|e| draw_error(e.to_string()))?;
        draw(&root).map_err(|e| draw_error(e.to_string()))?;
        root.present().map_err(|e| draw_error(e.to_string()))?;
    }

    let image = RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| draw_error("pixel buffer does not match canvas size".to_string()))?;
    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|source| RenderError::Encode {
            chart: kind,
            source,
        })?;

    Ok(ChartImage {
        kind,
        width,
        height,
        png,
    })
}

/// Write category labels centered under their x positions.
///
/// Plotters picks its own tick positions on a numeric axis, so charts that
/// place categories at fixed coordinates draw their labels here instead.
pub(crate) fn draw_category_labels(
    root: &Canvas<'_>,
    chart: &ChartContext<'_, BitMapBackend<'_>, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    ticks: &[(f64, String)],
    baseline: f64,
) -> DrawResult {
    let style = TextStyle::from((FONT, TICK_SIZE).into_font()).pos(Pos::new(HPos::Center, VPos::Top));
    for (x, label) in ticks {
        let (px, py) = chart.backend_coord(&(*x, baseline));
        root.draw(&Text::new(label.as_str(), (px, py + 8), style.clone()))?;
    }
    Ok(())
}

/// Value range covering `values`, padded by `pad` of its span on both ends.
pub(crate) fn padded_range(values: impl IntoIterator<Item = f64>, pad: f64) -> Option<Range<f64>> {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            None => Some((v, v)),
        })?;

    let span = hi - lo;
    let margin = if span > 0.0 { span * pad } else { lo.abs().max(1.0) * pad };
    Some((lo - margin)..(hi + margin))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_range_spreads_both_ends() {
        let range = padded_range([2.0, 4.0, 3.0], 0.1).unwrap();
        assert!((range.start - 1.8).abs() < 1e-12);
        assert!((range.end - 4.2).abs() < 1e-12);
    }

    #[test]
    fn padded_range_never_collapses() {
        let range = padded_range([5.0], 0.1).unwrap();
        assert!(range.start < 5.0 && range.end > 5.0);
        assert!(padded_range(std::iter::empty(), 0.1).is_none());
        assert!(padded_range([f64::NAN], 0.1).is_none());
    }

    #[test]
    fn render_error_names_its_chart() {
        let err = RenderError::EmptyData {
            chart: ChartKind::RevenueAndEarnings,
        };
        assert_eq!(err.chart(), ChartKind::RevenueAndEarnings);
        assert_eq!(err.to_string(), "revenue and earnings: no data to plot");
    }
}
