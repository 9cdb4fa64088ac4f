//! Actual vs. estimated EPS scatter chart.

use super::{
    draw_category_labels, padded_range, render_png, Canvas, ChartImage, ChartKind, DrawResult,
    RenderError, FONT, LABEL_SIZE, TITLE_SIZE,
};
use crate::data::EarningsPoint;
use plotters::prelude::*;
use std::ops::Range;

const TITLE: &str = "Earnings Per Share in Cents";
const X_LABEL: &str = "Business Quarter";
const Y_LABEL: &str = "Earnings Per Share";
const MARKER_SIZE: i32 = 9;

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub label: &'static str,
    pub color: RGBColor,
    pub opacity: f64,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPlan {
    pub series: Vec<ScatterSeries>,
    pub ticks: Vec<(f64, String)>,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
}

/// Place actual and estimated EPS at x = 1..=n, the estimate half transparent
/// so coinciding points blend.
pub fn plan_earnings_comparison(points: &[EarningsPoint]) -> Result<ScatterPlan, RenderError> {
    let empty = || RenderError::EmptyData {
        chart: ChartKind::EarningsComparison,
    };
    if points.is_empty() {
        return Err(empty());
    }

    let x = |idx: usize| (idx + 1) as f64;
    let actual = ScatterSeries {
        label: "Actual",
        color: RED,
        opacity: 1.0,
        points: points
            .iter()
            .enumerate()
            .map(|(i, p)| (x(i), p.actual_eps))
            .collect(),
    };
    let estimate = ScatterSeries {
        label: "Estimate",
        color: BLUE,
        opacity: 0.5,
        points: points
            .iter()
            .enumerate()
            .map(|(i, p)| (x(i), p.estimated_eps))
            .collect(),
    };

    let y_range = padded_range(
        points.iter().flat_map(|p| [p.actual_eps, p.estimated_eps]),
        0.15,
    )
    .ok_or_else(empty)?;

    Ok(ScatterPlan {
        ticks: points
            .iter()
            .enumerate()
            .map(|(i, p)| (x(i), p.period.to_string()))
            .collect(),
        x_range: 0.5..(points.len() as f64 + 0.5),
        y_range,
        series: vec![actual, estimate],
    })
}

/// Render the EPS comparison as a PNG.
pub fn render_earnings_comparison(
    points: &[EarningsPoint],
    size: (u32, u32),
) -> Result<ChartImage, RenderError> {
    let plan = plan_earnings_comparison(points)?;
    render_png(ChartKind::EarningsComparison, size, |root| draw(root, &plan))
}

fn draw(root: &Canvas<'_>, plan: &ScatterPlan) -> DrawResult {
    let mut chart = ChartBuilder::on(root)
        .caption(TITLE, (FONT, TITLE_SIZE))
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(80)
        .build_cartesian_2d(plan.x_range.clone(), plan.y_range.clone())?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(plan.ticks.len().max(1))
        .x_label_formatter(&|_| String::new())
        .y_label_formatter(&|v| format!("{:.2}", v))
        .x_desc(X_LABEL)
        .y_desc(Y_LABEL)
        .axis_desc_style((FONT, LABEL_SIZE))
        .draw()?;

    for series in &plan.series {
        let style = series.color.mix(series.opacity).filled();
        chart
            .draw_series(
                series
                    .points
                    .iter()
                    .map(|&point| Circle::new(point, MARKER_SIZE, style)),
            )?
            .label(series.label)
            .legend(move |(x, y)| Circle::new((x + 10, y), MARKER_SIZE - 3, style));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font((FONT, LABEL_SIZE))
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .draw()?;

    draw_category_labels(root, &chart, &plan.ticks, plan.y_range.start)?;
    Ok(())
}
