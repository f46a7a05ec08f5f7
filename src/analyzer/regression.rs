use crate::analyzer::helpers::{ensure_min_len, mean};
use crate::model::{AnalysisError, RegressionFit, RegressionModel};

/// Ordinary least squares of price against index positions 1..=n.
pub fn fit_trend(prices: &[f64]) -> Result<RegressionFit, AnalysisError> {
    ensure_min_len(prices, 2)?;

    let xs: Vec<f64> = (1..=prices.len()).map(|i| i as f64).collect();
    let x_mean = mean(&xs);
    let y_mean = mean(prices);

    let numerator: f64 = xs
        .iter()
        .zip(prices)
        .map(|(x, y)| (x - x_mean) * (y - y_mean))
        .sum();
    let denominator: f64 = xs.iter().map(|x| (x - x_mean).powi(2)).sum();

    let slope = numerator / denominator;
    let model = RegressionModel {
        slope,
        intercept: y_mean - slope * x_mean,
    };
    let trend = xs.iter().map(|&x| model.predict(x)).collect();

    Ok(RegressionFit {
        model,
        actual: prices.to_vec(),
        trend,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_exact_line() {
        let prices: Vec<f64> = (1..=50).map(|i| 3.0 * i as f64 + 7.0).collect();
        let fit = fit_trend(&prices).unwrap();
        assert!((fit.model.slope - 3.0).abs() < 1e-9);
        assert!((fit.model.intercept - 7.0).abs() < 1e-9);
        for (actual, trend) in fit.actual.iter().zip(&fit.trend) {
            assert!((actual - trend).abs() < 1e-9);
        }
    }

    #[test]
    fn two_points_define_the_line() {
        let fit = fit_trend(&[10.0, 8.0]).unwrap();
        assert!((fit.model.slope + 2.0).abs() < 1e-12);
        assert!((fit.model.intercept - 12.0).abs() < 1e-12);
        assert_eq!(fit.trend.len(), 2);
    }

    #[test]
    fn flat_series_has_zero_slope() {
        let fit = fit_trend(&[4.0, 4.0, 4.0]).unwrap();
        assert_eq!(fit.model.slope, 0.0);
        assert_eq!(fit.model.intercept, 4.0);
    }

    #[test]
    fn single_price_is_insufficient() {
        assert!(matches!(
            fit_trend(&[1.0]),
            Err(AnalysisError::InsufficientData { required: 2, actual: 1 })
        ));
        assert!(matches!(fit_trend(&[]), Err(AnalysisError::EmptySeries)));
    }
}
