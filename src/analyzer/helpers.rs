// Shared numeric helpers and length checks used by every analysis.
use crate::model::AnalysisError;

pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Variance divided by n, not n - 1.
pub fn population_variance(values: &[f64], mean: f64) -> f64 {
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
}

pub fn ensure_non_empty(values: &[f64]) -> Result<(), AnalysisError> {
    if values.is_empty() {
        return Err(AnalysisError::EmptySeries);
    }
    Ok(())
}

pub fn ensure_min_len(values: &[f64], required: usize) -> Result<(), AnalysisError> {
    ensure_non_empty(values)?;
    if values.len() < required {
        return Err(AnalysisError::InsufficientData {
            required,
            actual: values.len(),
        });
    }
    Ok(())
}
