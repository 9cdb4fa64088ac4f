//! Density and Summary Statistics Module
//! Kernel density estimates and box-plot summaries used by the violin chart.

use statrs::distribution::{Continuous, Normal};
use statrs::statistics::Statistics;

/// Grid points per density curve.
pub const GRID_SIZE: usize = 100;

/// Bandwidths the density support extends past the data extremes.
pub const CUT: f64 = 2.0;

/// Box-plot summary of a sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Lowest value within 1.5 IQR below q1
    pub whisker_low: f64,
    /// Highest value within 1.5 IQR above q3
    pub whisker_high: f64,
}

/// A density curve sampled on an evenly spaced grid.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityCurve {
    pub support: Vec<f64>,
    pub density: Vec<f64>,
}

impl DensityCurve {
    pub fn max_density(&self) -> f64 {
        self.density.iter().copied().fold(0.0, f64::max)
    }
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted
}

/// Calculate percentile using linear interpolation (NumPy compatible).
pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
    let n = sorted_values.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return sorted_values[0];
    }

    let rank = (p / 100.0) * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (rank.ceil() as usize).min(n - 1);
    let frac = rank - lower as f64;

    if lower == upper {
        sorted_values[lower]
    } else {
        sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
    }
}

/// Summarize a sample; `None` when it has no finite values.
pub fn summarize(values: &[f64]) -> Option<Summary> {
    let sorted = sorted(values);
    let (&min, &max) = (sorted.first()?, sorted.last()?);

    let q1 = percentile(&sorted, 25.0);
    let median = percentile(&sorted, 50.0);
    let q3 = percentile(&sorted, 75.0);
    let iqr = q3 - q1;

    let whisker_low = sorted
        .iter()
        .copied()
        .find(|&v| v >= q1 - 1.5 * iqr)
        .unwrap_or(q1);
    let whisker_high = sorted
        .iter()
        .rev()
        .copied()
        .find(|&v| v <= q3 + 1.5 * iqr)
        .unwrap_or(q3);

    Some(Summary {
        count: sorted.len(),
        min,
        max,
        q1,
        median,
        q3,
        whisker_low,
        whisker_high,
    })
}

/// Scott's rule bandwidth: `std * n^(-1/5)`.
///
/// `None` for fewer than two points or a sample without spread.
pub fn scott_bandwidth(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let std = values.iter().std_dev();
    let bandwidth = std * (values.len() as f64).powf(-0.2);
    (bandwidth.is_finite() && bandwidth > 0.0).then_some(bandwidth)
}

/// Gaussian kernel density estimate on `grid_size` points spanning
/// `cut` bandwidths past the sample extremes.
///
/// Degenerate samples (see [`scott_bandwidth`]) have no density and return `None`.
pub fn gaussian_kde(values: &[f64], grid_size: usize, cut: f64) -> Option<DensityCurve> {
    let values = sorted(values);
    let bandwidth = scott_bandwidth(&values)?;
    let kernel = Normal::new(0.0, 1.0).ok()?;

    let lo = values.first()? - cut * bandwidth;
    let hi = values.last()? + cut * bandwidth;
    let steps = grid_size.max(2) - 1;
    let scale = 1.0 / (values.len() as f64 * bandwidth);

    let support: Vec<f64> = (0..=steps)
        .map(|i| lo + (hi - lo) * i as f64 / steps as f64)
        .collect();
    let density = support
        .iter()
        .map(|&x| {
            values
                .iter()
                .map(|&xi| kernel.pdf((x - xi) / bandwidth))
                .sum::<f64>()
                * scale
        })
        .collect();

    Some(DensityCurve { support, density })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentile_matches_numpy_linear() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&sorted, 0.0), 1.0);
        assert_eq!(percentile(&sorted, 50.0), 2.5);
        assert!((percentile(&sorted, 25.0) - 1.75).abs() < 1e-12);
        assert_eq!(percentile(&sorted, 100.0), 4.0);
        assert!(percentile(&[], 50.0).is_nan());
    }

    #[test]
    fn summary_whiskers_stop_at_adjacent_values() {
        let values = [10.0, 11.0, 12.0, 13.0, 14.0, 40.0];
        let summary = summarize(&values).unwrap();
        assert_eq!(summary.count, 6);
        assert_eq!(summary.min, 10.0);
        assert_eq!(summary.max, 40.0);
        assert_eq!(summary.whisker_low, 10.0);
        assert_eq!(summary.whisker_high, 14.0);
        assert!(summary.q1 <= summary.median && summary.median <= summary.q3);
    }

    #[test]
    fn single_value_summary_collapses() {
        let summary = summarize(&[142.5]).unwrap();
        assert_eq!(summary.q1, 142.5);
        assert_eq!(summary.q3, 142.5);
        assert_eq!(summary.whisker_low, 142.5);
        assert!(summarize(&[]).is_none());
    }

    #[test]
    fn degenerate_samples_have_no_density() {
        assert!(gaussian_kde(&[], GRID_SIZE, CUT).is_none());
        assert!(gaussian_kde(&[150.0], GRID_SIZE, CUT).is_none());
        assert!(gaussian_kde(&[150.0, 150.0, 150.0], GRID_SIZE, CUT).is_none());
    }

    #[test]
    fn density_integrates_to_about_one() {
        let values: Vec<f64> = (0..50).map(|i| 140.0 + (i % 7) as f64 * 3.0).collect();
        let curve = gaussian_kde(&values, 400, 4.0).unwrap();
        assert_eq!(curve.support.len(), 400);

        let step = curve.support[1] - curve.support[0];
        let area: f64 = curve.density.iter().sum::<f64>() * step;
        assert!((area - 1.0).abs() < 0.02, "area = {area}");
        assert!(curve.max_density() > 0.0);
    }

    #[test]
    fn support_extends_past_the_extremes() {
        let values = [100.0, 110.0, 120.0];
        let bandwidth = scott_bandwidth(&values).unwrap();
        let curve = gaussian_kde(&values, GRID_SIZE, CUT).unwrap();
        assert!((curve.support[0] - (100.0 - CUT * bandwidth)).abs() < 1e-9);
        assert!((curve.support[GRID_SIZE - 1] - (120.0 + CUT * bandwidth)).abs() < 1e-9);
    }
}
