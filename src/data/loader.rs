//! CSV Data Loader Module
//! Reads the price history files with Polars and validates them against the fixed schemas.

use crate::data::series::{Quarter, SeriesLayout};
use crate::data::table::PriceTable;
use chrono::NaiveDate;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const DATE: &str = "Date";
pub const OPEN: &str = "Open";
pub const HIGH: &str = "High";
pub const LOW: &str = "Low";
pub const CLOSE: &str = "Close";
pub const ADJ_CLOSE: &str = "Adj Close";
pub const VOLUME: &str = "Volume";
pub const QUARTER: &str = "Quarter";

/// Display name given to the adjusted close after normalization.
pub const PRICE: &str = "Price";

pub const DATE_FORMAT: &str = "%Y-%m-%d";

const MONTHLY_COLUMNS: [&str; 7] = [DATE, OPEN, HIGH, LOW, CLOSE, ADJ_CLOSE, VOLUME];
const DAILY_COLUMNS: [&str; 8] = [DATE, OPEN, HIGH, LOW, CLOSE, ADJ_CLOSE, VOLUME, QUARTER];

#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("input file not found: {}", path.display())]
    Missing { path: PathBuf },
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
    #[error("{}: expected columns {expected:?}, found {found:?}", path.display())]
    Header {
        path: PathBuf,
        expected: Vec<String>,
        found: Vec<String>,
    },
    #[error("{}: column '{column}' is not {expected}: {source}", path.display())]
    ColumnType {
        path: PathBuf,
        column: String,
        expected: String,
        #[source]
        source: PolarsError,
    },
    #[error("{}: column '{column}' has {count} missing value(s)", path.display())]
    MissingValues {
        path: PathBuf,
        column: String,
        count: usize,
    },
    #[error("{}: line {line}, column '{column}': invalid value '{value}'", path.display())]
    InvalidValue {
        path: PathBuf,
        line: usize,
        column: String,
        value: String,
    },
    #[error("{}: line {line}: date {date} does not follow the previous row", path.display())]
    OutOfOrder {
        path: PathBuf,
        line: usize,
        date: NaiveDate,
    },
    #[error("{}: line {line}: {date} is tagged {label} but falls in {actual}", path.display())]
    QuarterMismatch {
        path: PathBuf,
        line: usize,
        date: NaiveDate,
        label: Quarter,
        actual: Quarter,
    },
    #[error("{}: table is {actual}, expected {expected}", path.display())]
    LayoutMismatch {
        path: PathBuf,
        expected: SeriesLayout,
        actual: SeriesLayout,
    },
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

impl SeriesLayout {
    /// Header names, in file order.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            SeriesLayout::Monthly => &MONTHLY_COLUMNS,
            SeriesLayout::DailyQuarterly => &DAILY_COLUMNS,
        }
    }
}

/// Load a CSV file and validate it against `layout`.
///
/// Numeric columns come back as `Float64`, `Volume` as `Int64` and `Date`
/// as `Date`. `Quarter` stays a string whose label matches its row's date.
/// A header-only file yields an empty table.
pub fn load_table(path: impl AsRef<Path>, layout: SeriesLayout) -> Result<PriceTable, DataLoadError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(DataLoadError::Missing {
            path: path.to_path_buf(),
        });
    }

    let raw = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(10000))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|source| DataLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    check_header(path, &raw, layout)?;

    let mut columns = Vec::with_capacity(layout.columns().len());
    let mut dates = Vec::new();
    for &name in layout.columns() {
        // CSV batches arrive as separate chunks
        let column = raw.column(name)?.rechunk();
        let validated = match name {
            DATE => {
                dates = parse_dates(path, &column)?;
                Column::new(DATE.into(), dates.as_slice())
            }
            QUARTER => validate_quarters(path, &column, &dates)?,
            VOLUME => {
                check_whole_numbers(path, &column)?;
                cast_strict(path, &column, DataType::Int64)?
            }
            _ => cast_strict(path, &column, DataType::Float64)?,
        };
        columns.push(validated);
    }

    let frame = DataFrame::new(columns)?;
    info!(
        file = %path.display(),
        layout = %layout,
        rows = frame.height(),
        "loaded price table"
    );

    Ok(PriceTable::new(frame, layout, path.to_path_buf()))
}

fn check_header(path: &Path, raw: &DataFrame, layout: SeriesLayout) -> Result<(), DataLoadError> {
    let found: Vec<String> = raw
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    let expected = layout.columns();

    if found.len() != expected.len() || found.iter().zip(expected).any(|(f, e)| f != e) {
        return Err(DataLoadError::Header {
            path: path.to_path_buf(),
            expected: expected.iter().map(|s| s.to_string()).collect(),
            found,
        });
    }
    Ok(())
}

fn cast_strict(path: &Path, column: &Column, dtype: DataType) -> Result<Column, DataLoadError> {
    let cast = column
        .strict_cast(&dtype)
        .map_err(|source| DataLoadError::ColumnType {
            path: path.to_path_buf(),
            column: column.name().to_string(),
            expected: dtype.to_string(),
            source,
        })?;

    let nulls = cast.null_count();
    if nulls > 0 {
        return Err(DataLoadError::MissingValues {
            path: path.to_path_buf(),
            column: column.name().to_string(),
            count: nulls,
        });
    }
    Ok(cast)
}

fn string_values<'a>(path: &Path, column: &'a Column) -> Result<&'a StringChunked, DataLoadError> {
    column.str().map_err(|source| DataLoadError::ColumnType {
        path: path.to_path_buf(),
        column: column.name().to_string(),
        expected: "str".to_string(),
        source,
    })
}

fn invalid_value(path: &Path, row: usize, column: &str, value: Option<&str>) -> DataLoadError {
    DataLoadError::InvalidValue {
        path: path.to_path_buf(),
        // +1 for the header, +1 for 1-based lines
        line: row + 2,
        column: column.to_string(),
        value: value.unwrap_or_default().to_string(),
    }
}

/// Parse every date and check they strictly ascend.
fn parse_dates(path: &Path, column: &Column) -> Result<Vec<NaiveDate>, DataLoadError> {
    let mut dates: Vec<NaiveDate> = Vec::with_capacity(column.len());

    for (row, value) in string_values(path, column)?.into_iter().enumerate() {
        let date = value
            .and_then(|text| NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok())
            .ok_or_else(|| invalid_value(path, row, DATE, value))?;

        if dates.last().is_some_and(|&prev| date <= prev) {
            return Err(DataLoadError::OutOfOrder {
                path: path.to_path_buf(),
                line: row + 2,
                date,
            });
        }
        dates.push(date);
    }

    debug!(file = %path.display(), rows = dates.len(), "dates ascending");
    Ok(dates)
}

/// Polars reads a column holding any fractional value as `Float64`, and a
/// float to int cast truncates, so reject those values by line first.
fn check_whole_numbers(path: &Path, column: &Column) -> Result<(), DataLoadError> {
    if !column.dtype().is_float() {
        return Ok(());
    }
    let values = column.f64().map_err(|source| DataLoadError::ColumnType {
        path: path.to_path_buf(),
        column: column.name().to_string(),
        expected: DataType::Int64.to_string(),
        source,
    })?;

    for (row, value) in values.into_iter().enumerate() {
        if let Some(v) = value.filter(|v| v.fract() != 0.0 || !v.is_finite()) {
            let text = v.to_string();
            return Err(invalid_value(path, row, column.name(), Some(&text)));
        }
    }
    Ok(())
}

fn validate_quarters(path: &Path, column: &Column, dates: &[NaiveDate]) -> Result<Column, DataLoadError> {
    for (row, value) in string_values(path, column)?.into_iter().enumerate() {
        let label = value
            .and_then(|text| text.parse::<Quarter>().ok())
            .ok_or_else(|| invalid_value(path, row, QUARTER, value))?;

        if let Some(&date) = dates.get(row) {
            let actual = Quarter::of(date);
            if label != actual {
                return Err(DataLoadError::QuarterMismatch {
                    path: path.to_path_buf(),
                    line: row + 2,
                    date,
                    label,
                    actual,
                });
            }
        }
    }
    Ok(column.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layouts_share_the_price_columns() {
        let monthly = SeriesLayout::Monthly.columns();
        let daily = SeriesLayout::DailyQuarterly.columns();
        assert_eq!(monthly.len(), 7);
        assert_eq!(&daily[..7], monthly);
        assert_eq!(daily[7], QUARTER);
    }

    #[test]
    fn invalid_value_reports_file_line() {
        let err = invalid_value(Path::new("NFLX.csv"), 0, DATE, Some("yesterday"));
        match err {
            DataLoadError::InvalidValue { line, value, .. } => {
                assert_eq!(line, 2);
                assert_eq!(value, "yesterday");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_is_reported_before_reading() {
        let err = load_table("does/not/exist.csv", SeriesLayout::Monthly).unwrap_err();
        assert!(matches!(err, DataLoadError::Missing { .. }));
        assert!(err.to_string().contains("does/not/exist.csv"));
    }
}
