use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::model::bank::Bank;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
pub const API_URL_ENV: &str = "BANK_DASHBOARD_API_URL";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub dashboard: DashboardConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    #[serde(default = "default_n_future")]
    pub n_future: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    pub data_dir: PathBuf,
    pub default_bank: String,
    pub default_interval: String,
    pub prediction_max_interval: String,
    pub intervals: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    pub refresh_rate_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

fn default_n_future() -> usize {
    3
}

/// Parse a chart interval string (e.g. "7d", "2w", "1M", "1y") into calendar days.
pub fn parse_interval_days(s: &str) -> Result<usize> {
    let s = s.trim();
    if s.len() < 2 {
        bail!("invalid interval '{}': expected format like '7d'", s);
    }

    let split = s.char_indices().last().map(|(i, _)| i).unwrap_or(0);
    let (num_str, suffix) = s.split_at(split);
    let n: usize = num_str.parse().with_context(|| {
        format!(
            "invalid interval '{}': quantity must be a positive integer",
            s
        )
    })?;
    if n == 0 {
        bail!("invalid interval '{}': quantity must be > 0", s);
    }

    let unit_days = match suffix {
        "d" => 1,
        "w" => 7,
        "M" => 30,
        "y" => 365,
        _ => bail!(
            "invalid interval '{}': unsupported suffix '{}', expected one of d/w/M/y",
            s,
            suffix
        ),
    };

    n.checked_mul(unit_days)
        .with_context(|| format!("invalid interval '{}': value is too large", s))
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.base_url)
            .with_context(|| format!("api.base_url '{}' is not a valid URL", self.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("api.base_url must use http or https, got '{}'", url.scheme());
        }
        if self.n_future == 0 {
            bail!("api.n_future must be > 0");
        }
        if self.timeout_ms == 0 {
            bail!("api.timeout_ms must be > 0");
        }
        Ok(())
    }
}

impl DashboardConfig {
    pub fn bank(&self) -> Result<Bank> {
        self.default_bank
            .parse()
            .with_context(|| format!("dashboard.default_bank '{}' is invalid", self.default_bank))
    }

    /// Interval choices as (label, days), in configured order, without duplicates.
    pub fn interval_options(&self) -> Result<Vec<(String, usize)>> {
        let mut out: Vec<(String, usize)> = Vec::new();
        for label in &self.intervals {
            let days = parse_interval_days(label)?;
            if !out.iter().any(|(_, d)| *d == days) {
                out.push((label.trim().to_string(), days));
            }
        }
        if out.is_empty() {
            bail!("dashboard.intervals must not be empty");
        }
        Ok(out)
    }

    pub fn default_interval_days(&self) -> Result<usize> {
        parse_interval_days(&self.default_interval)
    }

    pub fn prediction_max_interval_days(&self) -> Result<usize> {
        parse_interval_days(&self.prediction_max_interval)
    }

    pub fn validate(&self) -> Result<()> {
        self.bank()?;
        let options = self
            .interval_options()
            .context("dashboard.intervals is invalid")?;
        let default_days = self
            .default_interval_days()
            .context("dashboard.default_interval is invalid")?;
        if !options.iter().any(|(_, d)| *d == default_days) {
            bail!(
                "dashboard.default_interval '{}' is not one of dashboard.intervals",
                self.default_interval
            );
        }
        self.prediction_max_interval_days()
            .context("dashboard.prediction_max_interval is invalid")?;
        Ok(())
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).context("failed to parse config")?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.api.validate()?;
        self.dashboard.validate()?;
        Ok(())
    }

    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_CONFIG_PATH))
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        dotenvy::dotenv().ok();

        let config_str = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;

        let mut config = Self::from_toml_str(&config_str)
            .with_context(|| format!("failed to load {}", config_path.display()))?;

        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.api.base_url = url.trim().to_string();
            }
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_interval_valid() {
        assert_eq!(parse_interval_days("7d").unwrap(), 7);
        assert_eq!(parse_interval_days("2w").unwrap(), 14);
        assert_eq!(parse_interval_days("3M").unwrap(), 90);
        assert_eq!(parse_interval_days("1y").unwrap(), 365);
    }

    #[test]
    fn parse_interval_rejects_invalid_inputs() {
        assert!(parse_interval_days("").is_err());
        assert!(parse_interval_days("d").is_err());
        assert!(parse_interval_days("0d").is_err());
        assert!(parse_interval_days("1x").is_err());
        assert!(parse_interval_days("-1d").is_err());
    }
}
