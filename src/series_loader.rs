use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::DashboardError;
use crate::model::price::{PricePoint, PriceSeries};

/// One CSV record keyed by column name.
pub type RawRow = HashMap<String, String>;

pub const DATE_COLUMN: &str = "Date";
pub const CLOSE_COLUMN: &str = "Close";
pub const OPEN_COLUMN: &str = "Open";
pub const HIGH_COLUMN: &str = "High";
pub const LOW_COLUMN: &str = "Low";

/// Parse a calendar date. Datetime strings such as `2024-01-10 00:00:00+01:00`
/// are accepted by their leading `YYYY-MM-DD` part.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    let head = s.get(..10)?;
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// Parse a price cell. Empty, `null` and non-finite values count as missing.
pub fn parse_price(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("null") {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn cell<'a>(row: &'a RawRow, column: &str) -> Option<&'a str> {
    row.get(column).map(String::as_str)
}

fn parse_row(row: &RawRow) -> Option<PricePoint> {
    let date = cell(row, DATE_COLUMN).and_then(parse_date)?;
    let close = cell(row, CLOSE_COLUMN).and_then(parse_price)?;
    Some(PricePoint {
        date,
        open: cell(row, OPEN_COLUMN).and_then(parse_price),
        high: cell(row, HIGH_COLUMN).and_then(parse_price),
        low: cell(row, LOW_COLUMN).and_then(parse_price),
        close,
    })
}

/// Build a date-sorted series from raw rows, silently skipping rows without
/// a usable date or close.
pub fn load(rows: &[RawRow]) -> Result<PriceSeries, DashboardError> {
    let mut points: Vec<PricePoint> = rows.iter().filter_map(parse_row).collect();
    let skipped = rows.len() - points.len();
    if skipped > 0 {
        tracing::debug!(skipped, total = rows.len(), "Skipped malformed price rows");
    }
    if points.is_empty() {
        return Err(DashboardError::EmptySeries);
    }
    // Vec::sort_by_key is stable, so equal dates keep input order.
    points.sort_by_key(|p| p.date);
    Ok(PriceSeries::from_sorted(points))
}

/// Read every record of a headed CSV file into raw rows.
pub fn read_csv_rows(path: &Path) -> Result<Vec<RawRow>, DashboardError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                // +2: 1-based lines plus the header row
                tracing::debug!(line = idx + 2, error = %e, "Unreadable CSV record");
                continue;
            }
        };
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.to_string(), v.to_string()))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

pub fn load_csv(path: &Path) -> Result<PriceSeries, DashboardError> {
    let rows = read_csv_rows(path)?;
    let series = load(&rows)?;
    tracing::info!(
        path = %path.display(),
        rows = rows.len(),
        points = series.len(),
        "Loaded price series"
    );
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_datetime_prefix() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        assert_eq!(parse_date("2024-01-10"), Some(expected));
        assert_eq!(parse_date("2024-01-10 00:00:00+01:00"), Some(expected));
        assert_eq!(parse_date(" 2024-01-10 "), Some(expected));
        assert_eq!(parse_date("10/01/2024"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn parse_price_treats_null_and_nan_as_missing() {
        assert_eq!(parse_price("17.3"), Some(17.3));
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("null"), None);
        assert_eq!(parse_price("NaN"), None);
        assert_eq!(parse_price("abc"), None);
    }
}
