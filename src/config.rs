//! Report configuration.
//!
//! Defaults reproduce the fixed file layout: the three CSV inputs and all
//! outputs live in the working directory. A `stock_profile.json` next to
//! them may override any field.

use crate::charts::ChartKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Optional config file, looked up in the working directory.
pub const CONFIG_FILE: &str = "stock_profile.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("image size must be non-zero, got {width}x{height}")]
    ImageSize { width: u32, height: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputFiles {
    pub netflix_monthly: String,
    pub dow_jones_monthly: String,
    pub netflix_daily: String,
}

impl Default for InputFiles {
    fn default() -> Self {
        Self {
            netflix_monthly: "NFLX.csv".to_string(),
            dow_jones_monthly: "DJI.csv".to_string(),
            netflix_daily: "NFLX_daily_by_quarter.csv".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputFiles {
    pub quarterly_distribution: String,
    pub earnings_comparison: String,
    pub revenue_and_earnings: String,
    pub dual_line_comparison: String,
}

impl Default for OutputFiles {
    fn default() -> Self {
        Self {
            quarterly_distribution: "quarterly_distribution_2017.png".to_string(),
            earnings_comparison: "earnings_per_share_2017.png".to_string(),
            revenue_and_earnings: "revenue_and_earnings.png".to_string(),
            dual_line_comparison: "netflix_vs_dow_jones_2017.png".to_string(),
        }
    }
}

impl OutputFiles {
    pub fn file_for(&self, kind: ChartKind) -> &str {
        match kind {
            ChartKind::QuarterlyDistribution => &self.quarterly_distribution,
            ChartKind::EarningsComparison => &self.earnings_comparison,
            ChartKind::RevenueAndEarnings => &self.revenue_and_earnings,
            ChartKind::DualLineComparison => &self.dual_line_comparison,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    pub enabled: bool,
    pub file_name: String,
    pub title: String,
    pub subtitle: String,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            file_name: "netflix_stock_profile.pptx".to_string(),
            title: "Netflix Stock Profile".to_string(),
            subtitle: "Stock prices, earnings and revenue for 2017".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub inputs: InputFiles,
    pub outputs: OutputFiles,
    pub image_width: u32,
    pub image_height: u32,
    pub deck: DeckConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            inputs: InputFiles::default(),
            outputs: OutputFiles::default(),
            image_width: 1400,
            image_height: 800,
            deck: DeckConfig::default(),
        }
    }
}

impl ReportConfig {
    /// Read `path` if it exists, otherwise fall back to the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.is_file() {
            Self::from_json_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        info!(file = %path.display(), "loaded report config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.image_width == 0 || self.image_height == 0 {
            return Err(ConfigError::ImageSize {
                width: self.image_width,
                height: self.image_height,
            });
        }
        Ok(())
    }

    pub fn image_size(&self) -> (u32, u32) {
        (self.image_width, self.image_height)
    }

    pub fn input_path(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }

    pub fn chart_path(&self, kind: ChartKind) -> PathBuf {
        self.output_dir.join(self.outputs.file_for(kind))
    }

    pub fn deck_path(&self) -> PathBuf {
        self.output_dir.join(&self.deck.file_name)
    }
}
