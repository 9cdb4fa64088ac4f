//! Validated price table and its projection into typed rows.

use crate::data::loader::{
    DataLoadError, ADJ_CLOSE, CLOSE, DATE, HIGH, LOW, OPEN, PRICE, QUARTER, VOLUME,
};
use crate::data::series::{DailyBar, PriceBar, Quarter, SeriesLayout};
use chrono::NaiveDate;
use polars::prelude::*;
use std::path::{Path, PathBuf};

/// A loaded price table with a known, validated schema.
#[derive(Debug, Clone)]
pub struct PriceTable {
    frame: DataFrame,
    layout: SeriesLayout,
    source: PathBuf,
}

impl PriceTable {
    pub(crate) fn new(frame: DataFrame, layout: SeriesLayout, source: PathBuf) -> Self {
        Self {
            frame,
            layout,
            source,
        }
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub(crate) fn frame_mut(&mut self) -> &mut DataFrame {
        &mut self.frame
    }

    pub fn layout(&self) -> SeriesLayout {
        self.layout
    }

    /// File the table was loaded from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    /// Whether the adjusted close already carries its display name.
    pub fn is_normalized(&self) -> bool {
        self.frame.get_column_index(PRICE).is_some()
    }

    /// Current name of the adjusted-close column.
    pub fn price_column(&self) -> &'static str {
        if self.is_normalized() {
            PRICE
        } else {
            ADJ_CLOSE
        }
    }

    /// Rows of a monthly table, in file order.
    pub fn monthly_series(&self) -> Result<Vec<PriceBar>, DataLoadError> {
        self.expect_layout(SeriesLayout::Monthly)?;
        self.price_bars()
    }

    /// Rows of the daily table with their quarter label, in file order.
    pub fn daily_series(&self) -> Result<Vec<DailyBar>, DataLoadError> {
        self.expect_layout(SeriesLayout::DailyQuarterly)?;
        let bars = self.price_bars()?;
        let quarters = self.frame.column(QUARTER)?.str()?;

        bars.into_iter()
            .zip(quarters)
            .enumerate()
            .map(|(row, (bar, label))| {
                let quarter = label
                    .and_then(|text| text.parse::<Quarter>().ok())
                    .ok_or_else(|| self.invalid(row, QUARTER, label))?;
                Ok(DailyBar { bar, quarter })
            })
            .collect()
    }

    fn expect_layout(&self, expected: SeriesLayout) -> Result<(), DataLoadError> {
        if self.layout != expected {
            return Err(DataLoadError::LayoutMismatch {
                path: self.source.clone(),
                expected,
                actual: self.layout,
            });
        }
        Ok(())
    }

    fn price_bars(&self) -> Result<Vec<PriceBar>, DataLoadError> {
        let dates: Vec<Option<NaiveDate>> = self.frame.column(DATE)?.date()?.as_date_iter().collect();
        let open = self.frame.column(OPEN)?.f64()?;
        let high = self.frame.column(HIGH)?.f64()?;
        let low = self.frame.column(LOW)?.f64()?;
        let close = self.frame.column(CLOSE)?.f64()?;
        let price = self.frame.column(self.price_column())?.f64()?;
        let volume = self.frame.column(VOLUME)?.i64()?;

        (0..self.height())
            .map(|row| {
                let date = dates[row].ok_or_else(|| self.invalid(row, DATE, None))?;

                Ok(PriceBar {
                    date,
                    open: self.number(open.get(row), row, OPEN)?,
                    high: self.number(high.get(row), row, HIGH)?,
                    low: self.number(low.get(row), row, LOW)?,
                    close: self.number(close.get(row), row, CLOSE)?,
                    price: self.number(price.get(row), row, self.price_column())?,
                    volume: volume.get(row).ok_or_else(|| self.invalid(row, VOLUME, None))?,
                })
            })
            .collect()
    }

    fn number(&self, value: Option<f64>, row: usize, column: &str) -> Result<f64, DataLoadError> {
        value.ok_or_else(|| self.invalid(row, column, None))
    }

    fn invalid(&self, row: usize, column: &str, value: Option<&str>) -> DataLoadError {
        DataLoadError::InvalidValue {
            path: self.source.clone(),
            line: row + 2,
            column: column.to_string(),
            value: value.unwrap_or_default().to_string(),
        }
    }
}
