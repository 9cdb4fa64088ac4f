//! Violin plot of daily prices grouped by quarter.

use super::{
    draw_category_labels, padded_range, render_png, Canvas, ChartImage, ChartKind, DrawResult,
    RenderError, FONT, LABEL_SIZE, PALETTE, TITLE_SIZE,
};
use crate::data::{DailyBar, Quarter};
use crate::stats::{gaussian_kde, summarize, DensityCurve, Summary, CUT, GRID_SIZE};
use plotters::prelude::*;
use std::collections::BTreeMap;
use std::ops::Range;

/// Share of a category slot taken by the widest violin.
pub const VIOLIN_WIDTH: f64 = 0.8;

const TITLE: &str = "Distribution of 2017 Netflix Stock Prices by Quarter";
const X_LABEL: &str = "Business Quarters in 2017";
const Y_LABEL: &str = "Closing Stock Price";

#[derive(Debug, Clone, PartialEq)]
pub enum ViolinShape {
    /// Closed outline: right edge bottom to top, then left edge top to bottom.
    Density { outline: Vec<(f64, f64)> },
    /// Fewer than two points or no spread: a flat tick at the value.
    Flat { value: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Violin {
    pub quarter: Quarter,
    pub center: f64,
    pub shape: ViolinShape,
    pub summary: Summary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViolinPlan {
    pub violins: Vec<Violin>,
    pub y_range: Range<f64>,
}

impl ViolinPlan {
    pub fn x_range(&self) -> Range<f64> {
        -0.5..(self.violins.len() as f64 - 0.5)
    }
}

/// Group prices by quarter (Q1 first) and shape one violin per group.
///
/// Densities share one scale, so the widest point across all violins spans
/// [`VIOLIN_WIDTH`] and each violin keeps the same area.
pub fn plan_quarterly_distribution(series: &[DailyBar]) -> Result<ViolinPlan, RenderError> {
    let mut groups: BTreeMap<Quarter, Vec<f64>> = BTreeMap::new();
    for row in series {
        groups.entry(row.quarter).or_default().push(row.bar.price);
    }

    let mut shaped: Vec<(Quarter, Summary, Option<DensityCurve>)> = Vec::new();
    for (quarter, prices) in &groups {
        if let Some(summary) = summarize(prices) {
            shaped.push((*quarter, summary, gaussian_kde(prices, GRID_SIZE, CUT)));
        }
    }
    if shaped.is_empty() {
        return Err(RenderError::EmptyData {
            chart: ChartKind::QuarterlyDistribution,
        });
    }

    let peak = shaped
        .iter()
        .filter_map(|(_, _, curve)| curve.as_ref().map(DensityCurve::max_density))
        .fold(0.0, f64::max);
    let half_width = VIOLIN_WIDTH / 2.0;

    let violins: Vec<Violin> = shaped
        .into_iter()
        .enumerate()
        .map(|(idx, (quarter, summary, curve))| {
            let center = idx as f64;
            let shape = match curve {
                Some(curve) if peak > 0.0 => {
                    let scale = half_width / peak;
                    let right = curve
                        .support
                        .iter()
                        .zip(&curve.density)
                        .map(|(&y, &d)| (center + d * scale, y));
                    let left = curve
                        .support
                        .iter()
                        .zip(&curve.density)
                        .rev()
                        .map(|(&y, &d)| (center - d * scale, y));
                    ViolinShape::Density {
                        outline: right.chain(left).collect(),
                    }
                }
                _ => ViolinShape::Flat {
                    value: summary.median,
                },
            };
            Violin {
                quarter,
                center,
                shape,
                summary,
            }
        })
        .collect();

    let extent = violins.iter().flat_map(|v| match &v.shape {
        ViolinShape::Density { outline } => outline.iter().map(|p| p.1).collect::<Vec<_>>(),
        ViolinShape::Flat { value } => vec![*value],
    });
    let y_range = padded_range(extent, 0.05).ok_or(RenderError::EmptyData {
        chart: ChartKind::QuarterlyDistribution,
    })?;

    Ok(ViolinPlan { violins, y_range })
}

/// Render the quarterly price distribution as a PNG.
pub fn render_quarterly_distribution(
    series: &[DailyBar],
    size: (u32, u32),
) -> Result<ChartImage, RenderError> {
    let plan = plan_quarterly_distribution(series)?;
    render_png(ChartKind::QuarterlyDistribution, size, |root| draw(root, &plan))
}

fn draw(root: &Canvas<'_>, plan: &ViolinPlan) -> DrawResult {
    let mut chart = ChartBuilder::on(root)
        .caption(TITLE, (FONT, TITLE_SIZE))
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(80)
        .build_cartesian_2d(plan.x_range(), plan.y_range.clone())?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(plan.violins.len().max(1))
        .x_label_formatter(&|_| String::new())
        .x_desc(X_LABEL)
        .y_desc(Y_LABEL)
        .axis_desc_style((FONT, LABEL_SIZE))
        .draw()?;

    for (idx, violin) in plan.violins.iter().enumerate() {
        let color = PALETTE[idx % PALETTE.len()];
        let c = violin.center;
        let s = &violin.summary;

        match &violin.shape {
            ViolinShape::Density { outline } => {
                chart.draw_series(std::iter::once(Polygon::new(
                    outline.clone(),
                    color.mix(0.8).filled(),
                )))?;
                let mut closed = outline.clone();
                closed.extend(outline.first().copied());
                chart.draw_series(std::iter::once(PathElement::new(
                    closed,
                    BLACK.mix(0.6).stroke_width(1),
                )))?;
            }
            ViolinShape::Flat { value } => {
                let half = VIOLIN_WIDTH / 2.0;
                chart.draw_series(std::iter::once(PathElement::new(
                    vec![(c - half, *value), (c + half, *value)],
                    color.stroke_width(3),
                )))?;
            }
        }

        // inner box: whiskers, interquartile bar, median
        let inner = RGBColor(60, 60, 60);
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(c, s.whisker_low), (c, s.whisker_high)],
            inner.stroke_width(2),
        )))?;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(c - 0.03, s.q1), (c + 0.03, s.q3)],
            inner.filled(),
        )))?;
        chart.draw_series(std::iter::once(Circle::new(
            (c, s.median),
            4,
            WHITE.filled(),
        )))?;
    }

    let ticks: Vec<(f64, String)> = plan
        .violins
        .iter()
        .map(|v| (v.center, v.quarter.to_string()))
        .collect();
    draw_category_labels(root, &chart, &ticks, plan.y_range.start)?;

    Ok(())
}
