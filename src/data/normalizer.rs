//! Renames the adjusted-close column to its display name.

use crate::data::loader::{ADJ_CLOSE, PRICE};
use crate::data::table::PriceTable;
use tracing::{debug, warn};

/// Rename `Adj Close` to `Price`, leaving every value and row in place.
///
/// Already-normalized tables are returned unchanged.
pub fn normalize(mut table: PriceTable) -> PriceTable {
    if table.is_normalized() {
        debug!(file = %table.source().display(), "table already normalized");
        return table;
    }

    let source = table.source().display().to_string();
    match table.frame_mut().rename(ADJ_CLOSE, PRICE.into()) {
        Ok(_) => debug!(file = %source, from = ADJ_CLOSE, to = PRICE, "renamed price column"),
        // loader-built tables always carry the column
        Err(err) => warn!(file = %source, error = %err, "price column not renamed"),
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::series::SeriesLayout;
    use chrono::NaiveDate;
    use polars::prelude::*;
    use std::path::PathBuf;

    fn table() -> PriceTable {
        let dates = [
            NaiveDate::from_ymd_opt(2017, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2017, 2, 1).unwrap(),
        ];
        let frame = DataFrame::new(vec![
            Column::new("Date".into(), dates.as_slice()),
            Column::new("Open".into(), [124.96, 141.2]),
            Column::new("High".into(), [143.46, 145.95]),
            Column::new("Low".into(), [124.31, 139.05]),
            Column::new("Close".into(), [140.71, 142.13]),
            Column::new("Adj Close".into(), [140.71, 142.13]),
            Column::new("Volume".into(), [181772200i64, 91432000]),
        ])
        .unwrap();
        PriceTable::new(frame, SeriesLayout::Monthly, PathBuf::from("NFLX.csv"))
    }

    #[test]
    fn renames_only_the_adjusted_close() {
        let normalized = normalize(table());
        assert_eq!(
            normalized.column_names(),
            ["Date", "Open", "High", "Low", "Close", "Price", "Volume"]
        );
        assert_eq!(normalized.price_column(), PRICE);
    }

    #[test]
    fn normalizing_twice_is_a_no_op() {
        let once = normalize(table());
        let twice = normalize(once.clone());
        assert_eq!(once.column_names(), twice.column_names());
        assert_eq!(
            once.monthly_series().unwrap(),
            twice.monthly_series().unwrap()
        );
    }
}
