use std::path::PathBuf;

use crate::error::DashboardError;
use crate::model::bank::Bank;
use crate::series_loader;
use crate::test_curve;
use crate::ui::AppState;

/// Where per-bank CSV files live.
#[derive(Debug, Clone)]
pub struct DataSource {
    pub data_dir: PathBuf,
}

impl DataSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn prices_path(&self, bank: Bank) -> PathBuf {
        self.data_dir.join(bank.prices_file())
    }

    pub fn test_curve_path(&self, bank: Bank) -> PathBuf {
        self.data_dir.join(bank.test_curve_file())
    }
}

pub type Reaction = Box<dyn Fn(&mut AppState, &DataSource) -> Result<(), DashboardError> + Send + Sync>;

/// Bank switch handler. Reactions run in registration order after the
/// selected bank is updated; a failing reaction is logged and the rest
/// still run.
#[derive(Default)]
pub struct BankSelection {
    reactions: Vec<(&'static str, Reaction)>,
}

impl BankSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, name: &'static str, reaction: F)
    where
        F: Fn(&mut AppState, &DataSource) -> Result<(), DashboardError> + Send + Sync + 'static,
    {
        self.reactions.push((name, Box::new(reaction)));
    }

    pub fn reaction_names(&self) -> Vec<&'static str> {
        self.reactions.iter().map(|(name, _)| *name).collect()
    }

    /// Switch to `bank` and run every reaction. Returns the names of
    /// reactions that failed.
    pub fn select(&self, state: &mut AppState, source: &DataSource, bank: Bank) -> Vec<&'static str> {
        state.bank = bank;
        tracing::info!(bank = %bank, "Bank selected");
        state.push_log(format!("Switched to {}", bank));

        let mut failed = Vec::new();
        for (name, reaction) in &self.reactions {
            if let Err(e) = reaction(state, source) {
                tracing::warn!(bank = %bank, reaction = *name, error = %e, "Bank switch reaction failed");
                state.push_log(format!("[WARN] {}: {}", name, e));
                failed.push(*name);
            }
        }
        failed
    }

    /// Reactions the dashboard uses: drop forecasts of the previous bank,
    /// reload prices and the test curve, and show the bank's model.
    pub fn standard() -> Self {
        let mut selection = Self::new();
        selection.register("clear-forecasts", |state, _| {
            state.clear_forecasts();
            Ok(())
        });
        selection.register("reload-series", reload_series);
        selection.register("reload-test-curve", reload_test_curve);
        selection.register("model-tab", |state, _| {
            state.model_tab = state.bank.profile().model;
            Ok(())
        });
        selection
    }
}

pub fn reload_series(state: &mut AppState, source: &DataSource) -> Result<(), DashboardError> {
    match series_loader::load_csv(&source.prices_path(state.bank)) {
        Ok(series) => {
            state.set_series(Some(series));
            Ok(())
        }
        Err(e) => {
            state.set_series(None);
            Err(e)
        }
    }
}

pub fn reload_test_curve(state: &mut AppState, source: &DataSource) -> Result<(), DashboardError> {
    match test_curve::load_test_curve(&source.test_curve_path(state.bank)) {
        Ok(curve) => {
            state.test_curve = Some(curve);
            Ok(())
        }
        Err(e) => {
            state.test_curve = None;
            Err(e)
        }
    }
}
