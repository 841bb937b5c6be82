use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("price series is empty after filtering")]
    EmptySeries,

    #[error("insufficient data: need at least {required} closes, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("nothing to compare: predicted or actual sequence is empty")]
    EmptyComparison,

    #[error("remote service unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DashboardError {
    /// Whether the failure came from a remote collaborator rather than local data.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::RemoteUnavailable(_) | Self::Http(_))
    }
}
