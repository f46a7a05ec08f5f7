use crate::analyzer::helpers::ensure_non_empty;
use crate::model::{AnalysisError, Bucketing};

/// Partitions `[min, max]` into `bins` equal-width bins and counts the prices in each.
///
/// A value maps to `floor((x - min) / width)`, clamped to the last bin so the
/// maximum lands inside. When every price is identical the width is zero and
/// all values are assigned to bin 0.
pub fn bucketize(prices: &[f64], bins: usize) -> Result<Bucketing, AnalysisError> {
    ensure_non_empty(prices)?;
    if bins == 0 {
        return Err(AnalysisError::DegenerateInput("bin count must be positive".to_string()));
    }

    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = (max - min) / bins as f64;

    let mut counts = vec![0usize; bins];
    for &x in prices {
        let index = if width > 0.0 {
            (((x - min) / width).floor() as usize).min(bins - 1)
        } else {
            0
        };
        counts[index] += 1;
    }

    Ok(Bucketing { min, max, width, counts })
}
