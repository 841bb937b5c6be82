use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self {
            date,
            open: None,
            high: None,
            low: None,
            close,
        }
    }
}

/// Chronologically ordered daily prices for one ticker.
///
/// Built once by the series loader and replaced wholesale on reload. Equal
/// dates are kept in input order; the series does not deduplicate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Wrap points that are already sorted by date.
    pub(crate) fn from_sorted(points: Vec<PricePoint>) -> Self {
        debug_assert!(points.windows(2).all(|w| w[0].date <= w[1].date));
        Self { points }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// The last `n` points (all of them if `n` exceeds the length).
    pub fn tail(&self, n: usize) -> &[PricePoint] {
        let n = n.min(self.points.len());
        &self.points[self.points.len() - n..]
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn tail_clamps_to_length() {
        let series = PriceSeries::from_sorted(vec![
            PricePoint::new(day(1), 10.0),
            PricePoint::new(day(2), 11.0),
            PricePoint::new(day(3), 12.0),
        ]);
        assert_eq!(series.tail(2).len(), 2);
        assert!((series.tail(2)[0].close - 11.0).abs() < f64::EPSILON);
        assert_eq!(series.tail(10).len(), 3);
        assert!(series.tail(0).is_empty());
    }
}
