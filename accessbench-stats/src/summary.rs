//! Summary statistics over a run's throughput samples.

use serde::{Deserialize, Serialize};

/// Summary of one strategy's per-iteration throughput samples.
///
/// `std_dev` is the sample standard deviation (n - 1 denominator), and
/// `std_error` is the standard error of the mean. With the small iteration
/// counts typical here, the standard error is the honest error bound to
/// report next to the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Arithmetic mean of the samples.
    pub mean: f64,
    /// Sample standard deviation.
    pub std_dev: f64,
    /// Standard error of the mean.
    pub std_error: f64,
    /// Smallest sample.
    pub min: f64,
    /// Largest sample.
    pub max: f64,
    /// Number of samples summarized.
    pub sample_count: usize,
}

/// Compute summary statistics over a run's samples.
///
/// An empty slice yields an all-zero summary; fewer than two samples yield a
/// zero deviation and error, since neither is defined there.
pub fn compute_summary(samples: &[f64]) -> Summary {
    if samples.is_empty() {
        return Summary {
            mean: 0.0,
            std_dev: 0.0,
            std_error: 0.0,
            min: 0.0,
            max: 0.0,
            sample_count: 0,
        };
    }

    let n = samples.len();
    let mean = samples.iter().sum::<f64>() / n as f64;

    let std_dev = if n < 2 {
        0.0
    } else {
        let variance =
            samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        variance.sqrt()
    };
    let std_error = if n < 2 {
        0.0
    } else {
        std_dev / (n as f64).sqrt()
    };

    let min = samples
        .iter()
        .cloned()
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .unwrap_or(0.0);
    let max = samples
        .iter()
        .cloned()
        .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .unwrap_or(0.0);

    Summary {
        mean,
        std_dev,
        std_error,
        min,
        max,
        sample_count: n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_all_zero() {
        let summary = compute_summary(&[]);
        assert_eq!(summary.sample_count, 0);
        assert_eq!(summary.mean, 0.0);
        assert_eq!(summary.std_dev, 0.0);
        assert_eq!(summary.std_error, 0.0);
    }

    #[test]
    fn single_sample_has_no_spread() {
        let summary = compute_summary(&[42.0]);
        assert_eq!(summary.mean, 42.0);
        assert_eq!(summary.min, 42.0);
        assert_eq!(summary.max, 42.0);
        assert_eq!(summary.std_dev, 0.0);
        assert_eq!(summary.std_error, 0.0);
    }

    #[test]
    fn sample_std_dev_uses_n_minus_one() {
        // Known values: samples 2, 4, 4, 4, 5, 5, 7, 9 have mean 5 and
        // sample variance 32/7.
        let samples = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let summary = compute_summary(&samples);
        assert!((summary.mean - 5.0).abs() < 1e-12);
        assert!((summary.std_dev - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
        assert!((summary.std_error - summary.std_dev / 8.0f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn min_and_max_bracket_the_samples() {
        let summary = compute_summary(&[3.5, 1.0, 9.25, 4.0]);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 9.25);
        assert_eq!(summary.sample_count, 4);
    }
}
