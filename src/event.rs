use crate::model::bank::Bank;

#[derive(Debug, Clone)]
pub enum AppEvent {
    PredictionsReady {
        bank: Bank,
        request: u64,
        values: Vec<f64>,
    },
    PredictionsFailed {
        bank: Bank,
        request: u64,
        error: String,
    },
    SimulationReady {
        bank: Bank,
        factor: f64,
        closes: Vec<f64>,
    },
    SimulationFailed {
        bank: Bank,
        factor: f64,
        error: String,
    },
    LogMessage(String),
    Error(String),
}

impl AppEvent {
    /// Bank the event was produced for, if it is bank specific.
    pub fn bank(&self) -> Option<Bank> {
        match self {
            AppEvent::PredictionsReady { bank, .. }
            | AppEvent::PredictionsFailed { bank, .. }
            | AppEvent::SimulationReady { bank, .. }
            | AppEvent::SimulationFailed { bank, .. } => Some(*bank),
            AppEvent::LogMessage(_) | AppEvent::Error(_) => None,
        }
    }
}
