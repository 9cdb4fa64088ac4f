//! Side-by-side revenue and earnings bars per fiscal quarter.

use super::{
    draw_category_labels, render_png, Canvas, ChartImage, ChartKind, DrawResult, RenderError,
    FONT, LABEL_SIZE, PALETTE, TITLE_SIZE,
};
use crate::data::RevenueEarningsPoint;
use plotters::prelude::*;
use std::ops::Range;

/// Width of each bar in axis units.
pub const BAR_WIDTH: f64 = 0.8;

/// Distance between the starts of consecutive period groups (one slot per series).
pub const GROUP_SPACING: f64 = 2.0;

const TITLE: &str = "Netflix Revenue and Earnings in $ Billions";
const Y_LABEL: &str = "Billions of Dollars";

/// Center of a bar for period `period_index` (0-based) and series `series_index` (1-based).
pub fn bar_center(period_index: usize, series_index: usize) -> f64 {
    period_index as f64 * GROUP_SPACING + BAR_WIDTH * series_index as f64
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub center: f64,
    pub height: f64,
}

impl Bar {
    pub fn left(&self) -> f64 {
        self.center - BAR_WIDTH / 2.0
    }

    pub fn right(&self) -> f64 {
        self.center + BAR_WIDTH / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub label: &'static str,
    pub color: RGBColor,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarPlan {
    pub series: Vec<BarSeries>,
    /// Period labels, centered between each period's bar pair.
    pub ticks: Vec<(f64, String)>,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
}

/// Lay out revenue (series 1) and earnings (series 2) bars per period.
pub fn plan_revenue_and_earnings_bars(
    points: &[RevenueEarningsPoint],
) -> Result<BarPlan, RenderError> {
    if points.is_empty() {
        return Err(RenderError::EmptyData {
            chart: ChartKind::RevenueAndEarnings,
        });
    }

    let revenue = bar_series(points, "Revenue", PALETTE[0], 1, |p| p.revenue_billions);
    let earnings = bar_series(points, "Earnings", PALETTE[1], 2, |p| p.earnings_billions);

    let ticks = points
        .iter()
        .enumerate()
        .map(|(i, p)| ((bar_center(i, 1) + bar_center(i, 2)) / 2.0, p.period.to_string()))
        .collect();

    let last = points.len() - 1;
    let x_range = (bar_center(0, 1) - BAR_WIDTH)..(bar_center(last, 2) + BAR_WIDTH);

    let heights = || {
        points
            .iter()
            .flat_map(|p| [p.revenue_billions, p.earnings_billions])
    };
    let top = heights().fold(0.0, f64::max);
    let bottom = heights().fold(0.0, f64::min);
    let y_end = if top > 0.0 { top * 1.15 } else { 1.0 };
    let y_range = (bottom * 1.15)..y_end;

    Ok(BarPlan {
        series: vec![revenue, earnings],
        ticks,
        x_range,
        y_range,
    })
}

fn bar_series(
    points: &[RevenueEarningsPoint],
    label: &'static str,
    color: RGBColor,
    series_index: usize,
    value: impl Fn(&RevenueEarningsPoint) -> f64,
) -> BarSeries {
    BarSeries {
        label,
        color,
        bars: points
            .iter()
            .enumerate()
            .map(|(i, p)| Bar {
                center: bar_center(i, series_index),
                height: value(p),
            })
            .collect(),
    }
}

/// Render the grouped revenue/earnings bars as a PNG.
pub fn render_revenue_and_earnings_bars(
    points: &[RevenueEarningsPoint],
    size: (u32, u32),
) -> Result<ChartImage, RenderError> {
    let plan = plan_revenue_and_earnings_bars(points)?;
    render_png(ChartKind::RevenueAndEarnings, size, |root| draw(root, &plan))
}

fn draw(root: &Canvas<'_>, plan: &BarPlan) -> DrawResult {
    let mut chart = ChartBuilder::on(root)
        .caption(TITLE, (FONT, TITLE_SIZE))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(plan.x_range.clone(), plan.y_range.clone())?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(plan.ticks.len().max(1))
        .x_label_formatter(&|_| String::new())
        .y_desc(Y_LABEL)
        .axis_desc_style((FONT, LABEL_SIZE))
        .draw()?;

    for series in &plan.series {
        let style = series.color.filled();
        chart
            .draw_series(
                series
                    .bars
                    .iter()
                    .map(|bar| Rectangle::new([(bar.left(), 0.0), (bar.right(), bar.height)], style)),
            )?
            .label(series.label)
            .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 16, y + 6)], style));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .label_font((FONT, LABEL_SIZE))
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .draw()?;

    draw_category_labels(root, &chart, &plan.ticks, plan.y_range.start)?;
    Ok(())
}
