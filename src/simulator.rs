use crate::model::price::PricePoint;

pub const FACTOR_MIN: f64 = 0.80;
pub const FACTOR_MAX: f64 = 1.20;
pub const FACTOR_STEP: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Flat,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpenShift {
    pub base_open: f64,
    pub new_open: f64,
    pub delta: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutcome {
    pub factor: f64,
    pub shift: Option<OpenShift>,
    pub closes: Vec<f64>,
}

/// Move the open factor by `steps` increments, clamped and kept on the 0.01 grid.
pub fn step_factor(factor: f64, steps: i32) -> f64 {
    let next = factor + steps as f64 * FACTOR_STEP;
    ((next.clamp(FACTOR_MIN, FACTOR_MAX)) * 100.0).round() / 100.0
}

pub fn direction(factor: f64) -> Direction {
    let pct = percent_change(factor);
    if pct > 0 {
        Direction::Up
    } else if pct < 0 {
        Direction::Down
    } else {
        Direction::Flat
    }
}

fn percent_change(factor: f64) -> i64 {
    ((factor - 1.0) * 100.0).round() as i64
}

/// `1.05` -> `"+5%"`, `0.97` -> `"-3%"`, `1.0` -> `"0%"`.
pub fn percent_label(factor: f64) -> String {
    let pct = percent_change(factor);
    if pct > 0 {
        format!("+{}%", pct)
    } else {
        format!("{}%", pct)
    }
}

pub fn shifted_open(base_open: f64, factor: f64) -> OpenShift {
    let new_open = base_open * factor;
    OpenShift {
        base_open,
        new_open,
        delta: new_open - base_open,
    }
}

/// Open of the latest session, falling back to its close when the feed has no open.
pub fn base_open(last: &PricePoint) -> f64 {
    last.open.unwrap_or(last.close)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_factor_clamps_to_range() {
        assert!((step_factor(1.0, 1) - 1.01).abs() < 1e-12);
        assert!((step_factor(1.19, 5) - FACTOR_MAX).abs() < 1e-12);
        assert!((step_factor(0.81, -5) - FACTOR_MIN).abs() < 1e-12);
    }

    #[test]
    fn percent_label_signs() {
        assert_eq!(percent_label(1.05), "+5%");
        assert_eq!(percent_label(0.97), "-3%");
        assert_eq!(percent_label(1.0), "0%");
        assert_eq!(percent_label(1.001), "0%");
        assert_eq!(direction(1.001), Direction::Flat);
        assert_eq!(direction(1.2), Direction::Up);
        assert_eq!(direction(0.8), Direction::Down);
    }

    #[test]
    fn shifted_open_reports_delta() {
        let shift = shifted_open(11.54, 1.1);
        assert!((shift.new_open - 12.694).abs() < 1e-9);
        assert!((shift.delta - 1.154).abs() < 1e-9);
    }
}
