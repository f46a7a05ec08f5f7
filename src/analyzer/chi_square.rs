use crate::analyzer::bucketing::bucketize;
use crate::model::{AnalysisError, ChiSquareReport};

/// Simplified chi-square statistic over equal-width price bins.
///
/// Expected frequency is uniform (`n / bins`), not derived from a fitted
/// normal distribution, and the statistic is not compared against any
/// critical value. It is a raw diagnostic number.
pub fn chi_square(prices: &[f64], bins: usize) -> Result<ChiSquareReport, AnalysisError> {
    let bucketing = bucketize(prices, bins)?;
    let expected = bucketing.total() as f64 / bucketing.bins() as f64;

    let statistic = bucketing
        .counts
        .iter()
        .map(|&observed| (observed as f64 - expected).powi(2) / expected)
        .sum();

    Ok(ChiSquareReport {
        statistic,
        expected_per_bin: expected,
        bucketing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_spread_scores_zero() {
        let prices: Vec<f64> = (0..10).map(|i| 1.0 + i as f64 * 0.5).collect();
        let report = chi_square(&prices, 10).unwrap();
        assert_eq!(report.expected_per_bin, 1.0);
        assert!(report.statistic.abs() < 1e-12);
    }

    #[test]
    fn constant_series_is_defined() {
        let report = chi_square(&[5.0, 5.0, 5.0, 5.0], 10).unwrap();
        assert_eq!(report.bucketing.counts[0], 4);
        // (4 - 0.4)^2 / 0.4 + 9 * 0.4
        assert!((report.statistic - 36.0).abs() < 1e-9);
    }

    #[test]
    fn concentrated_mass_scores_high() {
        let mut prices = vec![1.0; 18];
        prices.push(2.0);
        prices.push(10.0);
        let report = chi_square(&prices, 10).unwrap();
        assert_eq!(report.bucketing.counts, vec![18, 1, 0, 0, 0, 0, 0, 0, 0, 1]);
        let expected = 16.0f64.powi(2) / 2.0 + 0.5 + 0.5 + 7.0 * 2.0;
        assert!((report.statistic - expected).abs() < 1e-9);
    }

    #[test]
    fn empty_series_fails() {
        assert!(matches!(chi_square(&[], 10), Err(AnalysisError::EmptySeries)));
    }
}
