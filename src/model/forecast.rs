use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionPoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergedPoint {
    pub date: NaiveDate,
    pub value: f64,
    pub is_prediction: bool,
}

/// Plotting series that starts at the last historical point and continues
/// with predicted points on consecutive calendar days.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedSeries {
    pub points: Vec<MergedPoint>,
}

impl MergedSeries {
    pub fn anchor(&self) -> Option<&MergedPoint> {
        self.points.first().filter(|p| !p.is_prediction)
    }

    pub fn predictions(&self) -> impl Iterator<Item = &MergedPoint> {
        self.points.iter().filter(|p| p.is_prediction)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
