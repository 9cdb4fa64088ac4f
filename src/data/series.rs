//! Typed row records for the price tables and the fixed earnings figures.

use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Business quarter label carried by the daily table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown quarter label '{0}'")]
pub struct ParseQuarterError(pub String);

impl Quarter {
    pub const ALL: [Quarter; 4] = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];

    /// Quarter a calendar date falls in.
    pub fn of(date: NaiveDate) -> Self {
        match date.month() {
            1..=3 => Quarter::Q1,
            4..=6 => Quarter::Q2,
            7..=9 => Quarter::Q3,
            _ => Quarter::Q4,
        }
    }

    /// 1-based quarter number.
    pub fn number(self) -> u8 {
        match self {
            Quarter::Q1 => 1,
            Quarter::Q2 => 2,
            Quarter::Q3 => 3,
            Quarter::Q4 => 4,
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.number())
    }
}

impl FromStr for Quarter {
    type Err = ParseQuarterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Q1" => Ok(Quarter::Q1),
            "Q2" => Ok(Quarter::Q2),
            "Q3" => Ok(Quarter::Q3),
            "Q4" => Ok(Quarter::Q4),
            other => Err(ParseQuarterError(other.to_string())),
        }
    }
}

/// A quarter of a given fiscal year, shown as `1Q2017`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FiscalQuarter {
    pub year: i32,
    pub quarter: Quarter,
}

impl FiscalQuarter {
    pub const fn new(quarter: Quarter, year: i32) -> Self {
        Self { year, quarter }
    }
}

impl fmt::Display for FiscalQuarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Q{}", self.quarter.number(), self.year)
    }
}

/// Which CSV schema a table follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesLayout {
    /// One row per month: `Date,Open,High,Low,Close,Adj Close,Volume`
    Monthly,
    /// One row per trading day, with a trailing `Quarter` column
    DailyQuarterly,
}

impl fmt::Display for SeriesLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesLayout::Monthly => f.write_str("monthly"),
            SeriesLayout::DailyQuarterly => f.write_str("daily-by-quarter"),
        }
    }
}

/// One price row. `price` is the adjusted close.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub price: f64,
    pub volume: i64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyBar {
    pub bar: PriceBar,
    pub quarter: Quarter,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarningsPoint {
    pub period: FiscalQuarter,
    pub actual_eps: f64,
    pub estimated_eps: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevenueEarningsPoint {
    pub period: FiscalQuarter,
    pub revenue_billions: f64,
    pub earnings_billions: f64,
}

/// Netflix actual vs. estimated EPS for the four quarters of 2017.
pub fn netflix_eps_2017() -> Vec<EarningsPoint> {
    [
        (Quarter::Q1, 0.40, 0.37),
        (Quarter::Q2, 0.15, 0.15),
        (Quarter::Q3, 0.29, 0.32),
        (Quarter::Q4, 0.41, 0.41),
    ]
    .into_iter()
    .map(|(quarter, actual_eps, estimated_eps)| EarningsPoint {
        period: FiscalQuarter::new(quarter, 2017),
        actual_eps,
        estimated_eps,
    })
    .collect()
}

/// Netflix revenue and earnings in billions of dollars, 2Q2017 through 1Q2018.
pub fn netflix_revenue_and_earnings() -> Vec<RevenueEarningsPoint> {
    [
        (FiscalQuarter::new(Quarter::Q2, 2017), 2.79, 0.0656),
        (FiscalQuarter::new(Quarter::Q3, 2017), 2.98, 0.12959),
        (FiscalQuarter::new(Quarter::Q4, 2017), 3.29, 0.18552),
        (FiscalQuarter::new(Quarter::Q1, 2018), 3.70, 0.29012),
    ]
    .into_iter()
    .map(|(period, revenue_billions, earnings_billions)| RevenueEarningsPoint {
        period,
        revenue_billions,
        earnings_billions,
    })
    .collect()
}
