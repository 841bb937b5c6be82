use std::fmt;
use std::str::FromStr;

use crate::error::DashboardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bank {
    Bbva,
    Santander,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Lstm,
    Gru,
}

#[derive(Debug, Clone, Copy)]
pub struct BankProfile {
    pub display_name: &'static str,
    pub model: ModelKind,
    /// Accent color as RGB.
    pub accent: (u8, u8, u8),
    pub history_url: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct ModelInfo {
    pub title: &'static str,
    pub description: &'static str,
    pub highlights: [&'static str; 3],
}

pub const MODEL_NOTE: &str = "BBVA uses LSTM and Santander uses GRU. Both models are trained on \
historical prices and retrained as new sessions arrive.";

impl Bank {
    /// Identifier used by the forecast API and the CSV file names.
    pub fn slug(self) -> &'static str {
        match self {
            Bank::Bbva => "bbva",
            Bank::Santander => "santander",
        }
    }

    pub fn profile(self) -> BankProfile {
        match self {
            Bank::Bbva => BankProfile {
                display_name: "BBVA",
                model: ModelKind::Lstm,
                accent: (0x00, 0xe0, 0xff),
                history_url: "https://finance.yahoo.com/quote/BBVA.MC/history/",
            },
            Bank::Santander => BankProfile {
                display_name: "Santander",
                model: ModelKind::Gru,
                accent: (0xef, 0x23, 0x3c),
                history_url: "https://finance.yahoo.com/quote/SAN.MC/history/",
            },
        }
    }

    /// Realized closes for the three sessions following the training cut-off.
    pub fn reference_closes(self) -> [f64; 3] {
        match self {
            Bank::Bbva => [17.30, 17.54, 17.64],
            Bank::Santander => [8.85, 8.81, 8.88],
        }
    }

    pub fn prices_file(self) -> String {
        format!("{}.csv", self.slug())
    }

    pub fn test_curve_file(self) -> String {
        format!("test_{}.csv", self.slug())
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.profile().display_name)
    }
}

impl FromStr for Bank {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bbva" => Ok(Bank::Bbva),
            "santander" | "san" => Ok(Bank::Santander),
            other => Err(DashboardError::Config(format!(
                "unknown bank '{}', expected 'bbva' or 'santander'",
                other
            ))),
        }
    }
}

impl ModelKind {
    pub fn short_name(self) -> &'static str {
        match self {
            ModelKind::Lstm => "LSTM",
            ModelKind::Gru => "GRU",
        }
    }

    pub fn info(self) -> ModelInfo {
        match self {
            ModelKind::Lstm => ModelInfo {
                title: "Long Short-Term Memory (LSTM)",
                description: "Recurrent network able to learn long-range dependencies in \
sequences such as daily closing prices. Serves the BBVA forecasts.",
                highlights: [
                    "Keeps relevant past information through gated memory cells.",
                    "Picks up complex patterns in historical prices.",
                    "Accurate on short and medium horizons.",
                ],
            },
            ModelKind::Gru => ModelInfo {
                title: "Gated Recurrent Unit (GRU)",
                description: "Lighter LSTM variant with fewer parameters, faster to train \
while keeping accuracy on financial series. Serves the Santander forecasts.",
                highlights: [
                    "Two gates (reset and update) instead of three.",
                    "Faster training and inference.",
                    "Good at following trend and volatility.",
                ],
            },
        }
    }
}
