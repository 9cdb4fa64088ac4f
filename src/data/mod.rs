//! Data module - CSV loading, normalization and typed rows

mod loader;
mod normalizer;
mod series;
mod table;

pub use loader::{load_table, DataLoadError, ADJ_CLOSE, DATE_FORMAT, PRICE};
pub use normalizer::normalize;
pub use series::{
    netflix_eps_2017, netflix_revenue_and_earnings, DailyBar, EarningsPoint, FiscalQuarter,
    ParseQuarterError, PriceBar, Quarter, RevenueEarningsPoint, SeriesLayout,
};
pub use table::PriceTable;
