mod common;

use common::*;
use polars::prelude::DataType;
use stock_profile::data::{load_table, DataLoadError, Quarter, SeriesLayout, ADJ_CLOSE};

#[test]
fn loads_monthly_table_in_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "NFLX.csv", MONTHLY_HEADER, &monthly_rows(120.0));

    let table = load_table(&path, SeriesLayout::Monthly).unwrap();
    assert_eq!(table.height(), 12);
    assert_eq!(table.layout(), SeriesLayout::Monthly);
    assert_eq!(table.price_column(), ADJ_CLOSE);
    assert!(!table.is_normalized());

    let frame = table.frame();
    assert_eq!(frame.column("Date").unwrap().dtype(), &DataType::Date);
    assert_eq!(frame.column(ADJ_CLOSE).unwrap().dtype(), &DataType::Float64);
    assert_eq!(frame.column("Volume").unwrap().dtype(), &DataType::Int64);

    let bars = table.monthly_series().unwrap();
    assert_eq!(bars.len(), 12);
    assert!(bars.windows(2).all(|w| w[0].date < w[1].date));
    for (i, bar) in bars.iter().enumerate() {
        assert_eq!(bar.price, monthly_price(120.0, i as u32 + 1));
    }
}

#[test]
fn loads_daily_table_with_quarters() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "daily.csv", DAILY_HEADER, &daily_rows(5));

    let table = load_table(&path, SeriesLayout::DailyQuarterly).unwrap();
    let bars = table.daily_series().unwrap();
    assert!(!bars.is_empty());
    for bar in &bars {
        assert_eq!(bar.quarter, Quarter::of(bar.bar.date));
    }
    for quarter in Quarter::ALL {
        assert!(bars.iter().any(|b| b.quarter == quarter));
    }
}

#[test]
fn header_only_file_is_an_empty_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "empty.csv", DAILY_HEADER, &[]);

    let table = load_table(&path, SeriesLayout::DailyQuarterly).unwrap();
    assert!(table.is_empty());
    assert!(table.daily_series().unwrap().is_empty());
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_table(dir.path().join("NFLX.csv"), SeriesLayout::Monthly).unwrap_err();
    assert!(matches!(err, DataLoadError::Missing { .. }));
}

#[test]
fn wrong_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "NFLX.csv",
        "Date,Open,High,Low,Close,Price,Volume",
        &monthly_rows(120.0),
    );

    match load_table(&path, SeriesLayout::Monthly).unwrap_err() {
        DataLoadError::Header { found, .. } => assert_eq!(found[5], "Price"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn daily_file_is_not_a_monthly_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "daily.csv", DAILY_HEADER, &daily_rows(30));

    let err = load_table(&path, SeriesLayout::Monthly).unwrap_err();
    assert!(matches!(err, DataLoadError::Header { .. }));
}

#[test]
fn non_numeric_price() {
    let dir = tempfile::tempdir().unwrap();
    let mut rows = monthly_rows(120.0);
    rows[4] = "2017-05-01,120.0,125.0,118.0,123.0,n/a,1000".to_string();
    let path = write_csv(dir.path(), "NFLX.csv", MONTHLY_HEADER, &rows);

    let err = load_table(&path, SeriesLayout::Monthly).unwrap_err();
    assert!(matches!(
        err,
        DataLoadError::ColumnType { ref column, .. } if column == ADJ_CLOSE
    ));
}

#[test]
fn unknown_quarter_label() {
    let dir = tempfile::tempdir().unwrap();
    let mut rows = one_row_per_quarter();
    rows[2] = rows[2].replace(",Q3", ",Q5");
    let path = write_csv(dir.path(), "daily.csv", DAILY_HEADER, &rows);

    match load_table(&path, SeriesLayout::DailyQuarterly).unwrap_err() {
        DataLoadError::InvalidValue { line, value, .. } => {
            assert_eq!(line, 4);
            assert_eq!(value, "Q5");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn dates_must_ascend() {
    let dir = tempfile::tempdir().unwrap();
    let mut rows = monthly_rows(120.0);
    rows.swap(6, 7);
    let path = write_csv(dir.path(), "NFLX.csv", MONTHLY_HEADER, &rows);

    match load_table(&path, SeriesLayout::Monthly).unwrap_err() {
        DataLoadError::OutOfOrder { line, .. } => assert_eq!(line, 9),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unparseable_date() {
    let dir = tempfile::tempdir().unwrap();
    let mut rows = monthly_rows(120.0);
    rows[0] = rows[0].replacen("2017-01-01", "01/01/2017", 1);
    let path = write_csv(dir.path(), "NFLX.csv", MONTHLY_HEADER, &rows);

    let err = load_table(&path, SeriesLayout::Monthly).unwrap_err();
    assert!(matches!(err, DataLoadError::InvalidValue { line: 2, .. }));
}

#[test]
fn fractional_volume() {
    let dir = tempfile::tempdir().unwrap();
    let mut rows = monthly_rows(120.0);
    rows[0] = "2017-01-01,124.96,143.46,124.31,140.71,121.0,1000.75".to_string();
    let path = write_csv(dir.path(), "NFLX.csv", MONTHLY_HEADER, &rows);

    match load_table(&path, SeriesLayout::Monthly).unwrap_err() {
        DataLoadError::InvalidValue { line, column, value, .. } => {
            assert_eq!(line, 2);
            assert_eq!(column, "Volume");
            assert_eq!(value, "1000.75");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn quarter_label_must_match_its_date() {
    let dir = tempfile::tempdir().unwrap();
    let mut rows = one_row_per_quarter();
    rows[0] = rows[0].replace(",Q1", ",Q4");
    let path = write_csv(dir.path(), "daily.csv", DAILY_HEADER, &rows);

    match load_table(&path, SeriesLayout::DailyQuarterly).unwrap_err() {
        DataLoadError::QuarterMismatch { line, label, actual, .. } => {
            assert_eq!(line, 2);
            assert_eq!(label, Quarter::Q4);
            assert_eq!(actual, Quarter::Q1);
        }
        other => panic!("unexpected error: {other}"),
    }
}
