//! Stock Profile - Netflix 2017 stock charts from CSV price data.
//!
//! Loads monthly Netflix and Dow Jones prices plus daily Netflix prices
//! tagged by quarter, and renders four PNG charts and a slide deck.

pub mod charts;
pub mod config;
pub mod data;
pub mod logging;
pub mod output;
pub mod ppt;
pub mod report;
pub mod stats;
