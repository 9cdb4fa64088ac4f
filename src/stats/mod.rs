//! Stats module - densities and summaries for distribution charts

mod density;

pub use density::{gaussian_kde, percentile, scott_bandwidth, summarize, DensityCurve, Summary, CUT, GRID_SIZE};
