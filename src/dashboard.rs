use crate::error::DashboardError;
use crate::forecast::build_merged_series;
use crate::metrics::mean_absolute_error;
use crate::model::bank::Bank;
use crate::model::forecast::{MergedSeries, PredictionPoint};
use crate::model::price::{PricePoint, PriceSeries};
use crate::stats::{compute_statistics, StatisticsSnapshot};

/// Largest number of forecast days shown in the prediction panel.
pub const MAX_PANEL_DAYS: usize = 3;

/// Everything the price chart and statistics panel need for one interval.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub visible: Vec<PricePoint>,
    pub stats: StatisticsSnapshot,
    pub merged: Option<MergedSeries>,
    pub current_price: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct ViewOptions {
    pub interval_days: usize,
    /// Forecast overlay is drawn only for intervals up to this many days.
    pub max_prediction_interval: usize,
    pub horizon: usize,
}

impl DashboardView {
    pub fn build(
        series: &PriceSeries,
        predictions: Option<&[f64]>,
        opts: ViewOptions,
    ) -> Result<Self, DashboardError> {
        let visible = series.tail(opts.interval_days).to_vec();
        let last = visible.last().ok_or(DashboardError::EmptySeries)?;
        let closes: Vec<f64> = visible.iter().map(|p| p.close).collect();
        let stats = compute_statistics(&closes)?;

        let merged = match predictions {
            Some(values)
                if opts.interval_days <= opts.max_prediction_interval && !values.is_empty() =>
            {
                Some(build_merged_series(
                    PredictionPoint {
                        date: last.date,
                        value: last.close,
                    },
                    values,
                    opts.horizon,
                ))
            }
            _ => None,
        };

        Ok(Self {
            current_price: last.close,
            visible,
            stats,
            merged,
        })
    }

    pub fn closes(&self) -> Vec<f64> {
        self.visible.iter().map(|p| p.close).collect()
    }
}

/// Prediction panel contents: the first `days` forecasts plus the MAE of the
/// full three-day forecast against the bank's reference closes.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionPanel {
    pub bank: Bank,
    pub days: usize,
    pub shown: Vec<f64>,
    pub mae: Result<f64, String>,
}

impl PredictionPanel {
    pub fn build(bank: Bank, predictions: &[f64], days: usize) -> Self {
        let days = days.clamp(1, MAX_PANEL_DAYS);
        let scored = &predictions[..predictions.len().min(MAX_PANEL_DAYS)];
        let mae = mean_absolute_error(scored, &bank.reference_closes()).map_err(|e| e.to_string());
        Self {
            bank,
            days,
            shown: predictions.iter().take(days).copied().collect(),
            mae,
        }
    }

    pub fn heading(&self) -> String {
        format!(
            "Mean absolute error - {} day{} forecast",
            self.days,
            if self.days > 1 { "s" } else { "" }
        )
    }
}
