use crate::error::DashboardError;

/// Mean absolute error over the overlapping prefix of both sequences.
///
/// Excess elements of the longer sequence are ignored.
pub fn mean_absolute_error(predicted: &[f64], actual: &[f64]) -> Result<f64, DashboardError> {
    let n = predicted.len().min(actual.len());
    if n == 0 {
        return Err(DashboardError::EmptyComparison);
    }
    let total: f64 = predicted
        .iter()
        .zip(actual)
        .map(|(p, a)| (p - a).abs())
        .sum();
    Ok(total / n as f64)
}
