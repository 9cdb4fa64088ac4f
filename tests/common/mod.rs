//! CSV fixtures shared by the integration tests.
#![allow(dead_code)]

use chrono::{Datelike, Days, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};
use stock_profile::data::Quarter;

pub const MONTHLY_HEADER: &str = "Date,Open,High,Low,Close,Adj Close,Volume";
pub const DAILY_HEADER: &str = "Date,Open,High,Low,Close,Adj Close,Volume,Quarter";

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn price_row(date: NaiveDate, price: f64, volume: i64) -> String {
    format!(
        "{},{:.2},{:.2},{:.2},{:.2},{:.6},{}",
        date.format("%Y-%m-%d"),
        price - 1.0,
        price + 2.0,
        price - 2.5,
        price + 0.5,
        price,
        volume
    )
}

pub fn write_csv(dir: &Path, name: &str, header: &str, rows: &[String]) -> PathBuf {
    let mut text = String::from(header);
    text.push('\n');
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

/// Adjusted close for month `month` (1-based) of a monthly fixture.
pub fn monthly_price(base: f64, month: u32) -> f64 {
    base + month as f64 * 3.25
}

/// Twelve month-start rows for 2017.
pub fn monthly_rows(base: f64) -> Vec<String> {
    (1..=12)
        .map(|month| price_row(ymd(2017, month, 1), monthly_price(base, month), 1_000_000 * month as i64))
        .collect()
}

/// Trading-day rows every `step` days through 2017, tagged with their quarter.
pub fn daily_rows(step: u64) -> Vec<String> {
    let mut rows = Vec::new();
    let mut date = ymd(2017, 1, 3);
    let mut i = 0u32;
    while date.year() == 2017 {
        let price = 140.0 + (i % 9) as f64 * 2.5 + Quarter::of(date).number() as f64 * 10.0;
        rows.push(format!("{},{}", price_row(date, price, 5_000_000 + i as i64), Quarter::of(date)));
        date = date.checked_add_days(Days::new(step)).unwrap();
        i += 1;
    }
    rows
}

/// Exactly one daily row in the middle of each quarter.
pub fn one_row_per_quarter() -> Vec<String> {
    [(2, 15, 142.0), (5, 15, 155.5), (8, 15, 171.25), (11, 15, 190.0)]
        .iter()
        .map(|&(month, day, price)| {
            let date = ymd(2017, month, day);
            format!("{},{}", price_row(date, price, 4_000_000), Quarter::of(date))
        })
        .collect()
}

/// Write the three default input files into `dir`.
pub fn write_inputs(dir: &Path) {
    write_csv(dir, "NFLX.csv", MONTHLY_HEADER, &monthly_rows(120.0));
    write_csv(dir, "DJI.csv", MONTHLY_HEADER, &monthly_rows(19_800.0));
    write_csv(dir, "NFLX_daily_by_quarter.csv", DAILY_HEADER, &daily_rows(3));
}
