use std::path::Path;

use chrono::NaiveDate;

use crate::error::DashboardError;
use crate::metrics::mean_absolute_error;
use crate::series_loader::{parse_date, parse_price, read_csv_rows, RawRow, DATE_COLUMN};

pub const REAL_COLUMN: &str = "Real_Close";
pub const PRED_COLUMN: &str = "Pred_Close";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestCurvePoint {
    pub date: NaiveDate,
    pub real: f64,
    pub predicted: f64,
}

/// Back-test of a model: realized vs predicted closes on the held-out range.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestCurve {
    pub points: Vec<TestCurvePoint>,
}

impl TestCurve {
    pub fn from_rows(rows: &[RawRow]) -> Result<Self, DashboardError> {
        let mut points: Vec<TestCurvePoint> = rows
            .iter()
            .filter_map(|row| {
                Some(TestCurvePoint {
                    date: row.get(DATE_COLUMN).and_then(|s| parse_date(s))?,
                    real: row.get(REAL_COLUMN).and_then(|s| parse_price(s))?,
                    predicted: row.get(PRED_COLUMN).and_then(|s| parse_price(s))?,
                })
            })
            .collect();
        if points.is_empty() {
            return Err(DashboardError::EmptySeries);
        }
        points.sort_by_key(|p| p.date);
        Ok(Self { points })
    }

    pub fn real(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.real).collect()
    }

    pub fn predicted(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.predicted).collect()
    }

    pub fn mae(&self) -> Result<f64, DashboardError> {
        mean_absolute_error(&self.predicted(), &self.real())
    }
}

pub fn load_test_curve(path: &Path) -> Result<TestCurve, DashboardError> {
    let rows = read_csv_rows(path)?;
    let curve = TestCurve::from_rows(&rows)?;
    tracing::info!(path = %path.display(), points = curve.points.len(), "Loaded test curve");
    Ok(curve)
}
