use crate::analyzer::helpers::{ensure_non_empty, mean, population_variance};
use crate::model::{AnalysisError, DescriptiveSummary};

/// Count, mean, median, population variance, standard deviation and
/// coefficient of variation (percent).
///
/// The median is the element at index `n / 2` of the sorted prices, so for an
/// even count it is the upper of the two middle values rather than their average.
pub fn describe(prices: &[f64]) -> Result<DescriptiveSummary, AnalysisError> {
    ensure_non_empty(prices)?;

    let count = prices.len();
    let mean = mean(prices);
    let variance = population_variance(prices, mean);
    let std_dev = variance.sqrt();

    let mut sorted = prices.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let median = sorted[count / 2];

    if mean == 0.0 {
        return Err(AnalysisError::DegenerateInput(
            "mean price is zero, coefficient of variation is undefined".to_string(),
        ));
    }
    let coefficient_of_variation = std_dev / mean * 100.0;

    Ok(DescriptiveSummary {
        count,
        mean,
        median,
        variance,
        std_dev,
        coefficient_of_variation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn five_day_example() {
        let s = describe(&[100.0, 102.0, 98.0, 101.0, 105.0]).unwrap();
        assert_eq!(s.count, 5);
        assert!(close(s.mean, 101.2, 1e-12));
        assert_eq!(s.median, 101.0);
        assert!(close(s.variance, 5.36, 1e-9));
        assert!(close(s.std_dev, 2.315167, 1e-6));
        assert!(close(s.coefficient_of_variation, 2.315167 / 101.2 * 100.0, 1e-4));
    }

    #[test]
    fn even_count_median_is_upper_middle() {
        let s = describe(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(s.median, 3.0);
        let s = describe(&[10.0, 20.0]).unwrap();
        assert_eq!(s.median, 20.0);
    }

    #[test]
    fn odd_count_median_is_conventional() {
        let s = describe(&[9.0, 1.0, 5.0]).unwrap();
        assert_eq!(s.median, 5.0);
    }

    #[test]
    fn variance_matches_moment_identity() {
        let prices = [2.31, 2.45, 2.18, 2.77, 3.02, 2.96, 2.5, 2.41];
        let s = describe(&prices).unwrap();
        let mean_sq = prices.iter().map(|p| p * p).sum::<f64>() / prices.len() as f64;
        assert!(close(s.variance, mean_sq - s.mean * s.mean, 1e-12));
        assert!(close(s.std_dev * s.std_dev, s.variance, 1e-12));
    }

    #[test]
    fn single_value() {
        let s = describe(&[3.5]).unwrap();
        assert_eq!(s.median, 3.5);
        assert_eq!(s.variance, 0.0);
        assert_eq!(s.coefficient_of_variation, 0.0);
    }

    #[test]
    fn empty_series_fails() {
        assert!(matches!(describe(&[]), Err(AnalysisError::EmptySeries)));
    }

    #[test]
    fn zero_mean_is_degenerate() {
        assert!(matches!(
            describe(&[0.0, 0.0]),
            Err(AnalysisError::DegenerateInput(_))
        ));
    }
}
