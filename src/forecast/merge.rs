use chrono::{Days, NaiveDate};

use crate::model::forecast::{MergedPoint, MergedSeries, PredictionPoint};

/// Round a service prediction to cents, as shown on the dashboard.
pub fn round_prediction(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `n` consecutive calendar days after `start`. Weekends are included.
pub fn future_dates(start: NaiveDate, n: usize) -> Vec<NaiveDate> {
    (1..=n as u64)
        .map_while(|i| start.checked_add_days(Days::new(i)))
        .collect()
}

/// Join the last historical point and up to `count` predictions into one
/// series. The anchor comes first, flagged as non-prediction, so the
/// forecast line starts where the history ends.
pub fn build_merged_series(
    anchor: PredictionPoint,
    predictions: &[f64],
    count: usize,
) -> MergedSeries {
    let used = &predictions[..count.min(predictions.len())];
    if used.len() < count {
        tracing::debug!(
            requested = count,
            available = predictions.len(),
            "Partial forecast merge"
        );
    }

    let mut points = Vec::with_capacity(used.len() + 1);
    points.push(MergedPoint {
        date: anchor.date,
        value: anchor.value,
        is_prediction: false,
    });
    points.extend(
        future_dates(anchor.date, used.len())
            .into_iter()
            .zip(used)
            .map(|(date, &value)| MergedPoint {
                date,
                value,
                is_prediction: true,
            }),
    );
    MergedSeries { points }
}
