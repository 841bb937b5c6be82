use crate::error::DashboardError;

/// Descriptive statistics over a closing-price window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatisticsSnapshot {
    pub mean: f64,
    pub max: f64,
    pub min: f64,
    /// Mean log-return in percent. `None` with fewer than two closes.
    pub trend_percent: Option<f64>,
    /// Population std of closes over their mean, in percent. `None` with fewer than two closes.
    pub volatility_percent: Option<f64>,
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// `ln(c_i / c_{i-1})` for every adjacent pair.
pub fn log_returns(closes: &[f64]) -> Vec<f64> {
    closes.windows(2).map(|w| (w[1] / w[0]).ln()).collect()
}

/// Average log-return times 100. Not annualized, not compounded.
pub fn trend_percent(closes: &[f64]) -> Result<f64, DashboardError> {
    if closes.len() < 2 {
        return Err(DashboardError::InsufficientData {
            required: 2,
            actual: closes.len(),
        });
    }
    let returns = log_returns(closes);
    Ok(returns.iter().sum::<f64>() / returns.len() as f64 * 100.0)
}

/// Population standard deviation (divides by N).
pub fn population_std(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

pub fn volatility_percent(closes: &[f64]) -> Result<f64, DashboardError> {
    if closes.len() < 2 {
        return Err(DashboardError::InsufficientData {
            required: 2,
            actual: closes.len(),
        });
    }
    let m = mean(closes).ok_or(DashboardError::EmptySeries)?;
    let std = population_std(closes).ok_or(DashboardError::EmptySeries)?;
    Ok(std / m * 100.0)
}

pub fn compute_statistics(closes: &[f64]) -> Result<StatisticsSnapshot, DashboardError> {
    let mean = mean(closes).ok_or(DashboardError::EmptySeries)?;
    let max = closes.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = closes.iter().copied().fold(f64::INFINITY, f64::min);

    Ok(StatisticsSnapshot {
        mean,
        max,
        min,
        trend_percent: trend_percent(closes).ok(),
        volatility_percent: volatility_percent(closes).ok(),
    })
}
