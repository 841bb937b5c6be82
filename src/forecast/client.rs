use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::DashboardError;
use crate::model::bank::Bank;

/// Remote source of future closing prices.
pub trait Forecaster: Send + Sync {
    /// Next `horizon` closes for `bank`, best effort.
    fn predict(
        &self,
        bank: Bank,
        horizon: usize,
    ) -> impl Future<Output = Result<Vec<f64>, DashboardError>> + Send;

    /// Next `horizon` closes if the next open were scaled by `factor_open`.
    fn simulate(
        &self,
        bank: Bank,
        factor_open: f64,
        horizon: usize,
    ) -> impl Future<Output = Result<Vec<f64>, DashboardError>> + Send;
}

#[derive(Debug, Serialize)]
struct PredictRequest {
    n_future: usize,
}

#[derive(Debug, Serialize)]
struct SimulateRequest {
    factor_open: f64,
    n_future: usize,
}

#[derive(Debug, Deserialize)]
pub struct PredictionResponse {
    #[serde(rename = "predicciones")]
    pub predictions: Vec<f64>,
}

pub struct ForecastClient {
    http: reqwest::Client,
    base_url: String,
}

impl ForecastClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DashboardError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_http(http, base_url))
    }

    /// Use a preconfigured reqwest client (proxy, TLS or timeout settings).
    pub fn with_http(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, route: &str, bank: Bank) -> String {
        format!("{}/{}/{}", self.base_url, route, bank.slug())
    }

    async fn post_for_predictions<B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<Vec<f64>, DashboardError> {
        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| DashboardError::RemoteUnavailable(format!("{}: {}", url, e)))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(DashboardError::RemoteUnavailable(format!(
                "{} returned {}: {}",
                url, status, body
            )));
        }

        let text = resp
            .text()
            .await
            .map_err(|e| DashboardError::RemoteUnavailable(format!("{}: {}", url, e)))?;
        parse_predictions(&text)
    }
}

/// Decode a forecast service reply. An empty list counts as unavailable.
pub fn parse_predictions(body: &str) -> Result<Vec<f64>, DashboardError> {
    let parsed: PredictionResponse = serde_json::from_str(body)?;
    if parsed.predictions.is_empty() {
        return Err(DashboardError::RemoteUnavailable(
            "forecast service returned no predictions".to_string(),
        ));
    }
    Ok(parsed.predictions)
}

impl Forecaster for ForecastClient {
    async fn predict(&self, bank: Bank, horizon: usize) -> Result<Vec<f64>, DashboardError> {
        let url = self.endpoint("predict", bank);
        tracing::info!(bank = %bank, horizon, "Requesting forecast");
        let values = self
            .post_for_predictions(&url, &PredictRequest { n_future: horizon })
            .await?;
        tracing::info!(bank = %bank, count = values.len(), "Forecast received");
        Ok(values)
    }

    async fn simulate(
        &self,
        bank: Bank,
        factor_open: f64,
        horizon: usize,
    ) -> Result<Vec<f64>, DashboardError> {
        let url = self.endpoint("simulate", bank);
        tracing::info!(bank = %bank, factor_open, horizon, "Requesting scenario simulation");
        self.post_for_predictions(
            &url,
            &SimulateRequest {
                factor_open,
                n_future: horizon,
            },
        )
        .await
    }
}
