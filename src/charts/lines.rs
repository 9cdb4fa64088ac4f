//! Netflix and Dow Jones monthly prices in two side-by-side panels.

use super::{
    padded_range, render_png, Canvas, ChartImage, ChartKind, DrawResult, RenderError, FONT,
    LABEL_SIZE, PALETTE, TICK_SIZE, TITLE_SIZE,
};
use crate::data::{PriceBar, DATE_FORMAT};
use chrono::{Days, NaiveDate};
use plotters::prelude::*;
use std::ops::Range;

/// Horizontal space between the two panels, in pixels.
const PANEL_GAP: u32 = 60;

#[derive(Debug, Clone, PartialEq)]
pub struct LinePanel {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub color: RGBColor,
    pub points: Vec<(NaiveDate, f64)>,
}

impl LinePanel {
    fn new(
        title: &'static str,
        y_label: &'static str,
        color: RGBColor,
        series: &[PriceBar],
    ) -> Result<Self, RenderError> {
        if series.is_empty() {
            return Err(RenderError::EmptyData {
                chart: ChartKind::DualLineComparison,
            });
        }
        Ok(Self {
            title,
            x_label: "Date",
            y_label,
            color,
            points: series.iter().map(|bar| (bar.date, bar.price)).collect(),
        })
    }

    /// Date span of the panel; a single date is widened to one day.
    pub fn x_range(&self) -> Range<NaiveDate> {
        let first = self.points.first().map(|p| p.0).unwrap_or(NaiveDate::MIN);
        let last = self.points.last().map(|p| p.0).unwrap_or(first);
        if last > first {
            first..last
        } else {
            first..first.checked_add_days(Days::new(1)).unwrap_or(first)
        }
    }

    pub fn y_range(&self) -> Range<f64> {
        padded_range(self.points.iter().map(|p| p.1), 0.05).unwrap_or(0.0..1.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DualLinePlan {
    pub panels: [LinePanel; 2],
}

/// Netflix on the left, Dow Jones (red) on the right.
pub fn plan_dual_line_comparison(
    netflix: &[PriceBar],
    dow_jones: &[PriceBar],
) -> Result<DualLinePlan, RenderError> {
    Ok(DualLinePlan {
        panels: [
            LinePanel::new("Netflix", "Price", PALETTE[0], netflix)?,
            LinePanel::new("Dow Jones", "Stock Price", RED, dow_jones)?,
        ],
    })
}

/// Render both panels into one PNG.
pub fn render_dual_line_comparison(
    netflix: &[PriceBar],
    dow_jones: &[PriceBar],
    size: (u32, u32),
) -> Result<ChartImage, RenderError> {
    let plan = plan_dual_line_comparison(netflix, dow_jones)?;
    render_png(ChartKind::DualLineComparison, size, |root| {
        let areas = root.split_evenly((1, 2));
        for (area, panel) in areas.iter().zip(&plan.panels) {
            draw_panel(area, panel)?;
        }
        Ok(())
    })
}

fn draw_panel(area: &Canvas<'_>, panel: &LinePanel) -> DrawResult {
    let mut chart = ChartBuilder::on(area)
        .caption(panel.title, (FONT, TITLE_SIZE))
        .margin(15)
        .margin_right(PANEL_GAP / 2 + 15)
        .x_label_area_size(110)
        .y_label_area_size(90)
        .build_cartesian_2d(panel.x_range(), panel.y_range())?;

    chart
        .configure_mesh()
        .x_labels(panel.points.len().clamp(2, 12))
        .x_label_formatter(&|d: &NaiveDate| d.format(DATE_FORMAT).to_string())
        .x_label_style(
            (FONT, TICK_SIZE)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .x_desc(panel.x_label)
        .y_desc(panel.y_label)
        .axis_desc_style((FONT, LABEL_SIZE))
        .draw()?;

    chart.draw_series(LineSeries::new(
        panel.points.iter().copied(),
        panel.color.stroke_width(2),
    ))?;

    Ok(())
}
