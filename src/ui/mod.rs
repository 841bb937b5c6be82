pub mod chart;
pub mod dashboard;

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

use crate::dashboard::{DashboardView, PredictionPanel, ViewOptions};
use crate::event::AppEvent;
use crate::forecast::round_prediction;
use crate::model::bank::{Bank, ModelKind};
use crate::model::price::PriceSeries;
use crate::simulator::{self, SimulationOutcome};
use crate::test_curve::TestCurve;

use chart::PriceChart;
use dashboard::{
    KeybindBar, LogPanel, ModelPanel, NewsPanel, PredictionPanelWidget, SimulatorPanel,
    StatsPanel, StatusBar, TestCurvePanel,
};

const MAX_LOG_MESSAGES: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Loading,
    Failed(String),
}

pub struct AppState {
    pub bank: Bank,
    pub intervals: Vec<(String, usize)>,
    pub interval_days: usize,
    pub max_prediction_interval: usize,
    pub horizon: usize,
    pub model_tab: ModelKind,
    pub series: Option<PriceSeries>,
    pub view: Option<DashboardView>,
    pub predictions: Option<Vec<f64>>,
    pub prediction_status: FetchStatus,
    forecast_request: u64,
    pub panel_days: usize,
    pub prediction_panel: Option<PredictionPanel>,
    pub test_curve: Option<TestCurve>,
    pub sim_factor: f64,
    pub simulation: Option<SimulationOutcome>,
    pub simulation_status: FetchStatus,
    pub log_messages: Vec<String>,
}

impl AppState {
    pub fn new(
        bank: Bank,
        intervals: Vec<(String, usize)>,
        interval_days: usize,
        max_prediction_interval: usize,
        horizon: usize,
    ) -> Self {
        Self {
            bank,
            intervals,
            interval_days,
            max_prediction_interval,
            horizon,
            model_tab: bank.profile().model,
            series: None,
            view: None,
            predictions: None,
            prediction_status: FetchStatus::Idle,
            forecast_request: 0,
            panel_days: 0,
            prediction_panel: None,
            test_curve: None,
            sim_factor: 1.0,
            simulation: None,
            simulation_status: FetchStatus::Idle,
            log_messages: Vec::new(),
        }
    }

    pub fn push_log(&mut self, msg: String) {
        self.log_messages.push(msg);
        if self.log_messages.len() > MAX_LOG_MESSAGES {
            self.log_messages.remove(0);
        }
    }

    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            interval_days: self.interval_days,
            max_prediction_interval: self.max_prediction_interval,
            horizon: self.horizon,
        }
    }

    pub fn interval_label(&self) -> String {
        self.intervals
            .iter()
            .find(|(_, d)| *d == self.interval_days)
            .map(|(label, _)| label.clone())
            .unwrap_or_else(|| format!("{}d", self.interval_days))
    }

    /// Whether the chart should show the forecast overlay for the current interval.
    pub fn wants_overlay(&self) -> bool {
        self.interval_days <= self.max_prediction_interval
    }

    /// Recompute the chart/statistics view from the loaded series.
    pub fn refresh_view(&mut self) {
        let Some(series) = self.series.as_ref() else {
            self.view = None;
            return;
        };
        match DashboardView::build(series, self.predictions.as_deref(), self.view_options()) {
            Ok(view) => self.view = Some(view),
            Err(e) => {
                self.view = None;
                tracing::warn!(bank = %self.bank, error = %e, "Failed to build dashboard view");
                self.push_log(format!("[WARN] {}", e));
            }
        }
    }

    pub fn set_series(&mut self, series: Option<PriceSeries>) {
        self.series = series;
        self.refresh_view();
    }

    pub fn select_interval(&mut self, days: usize) {
        if days == 0 || days == self.interval_days {
            return;
        }
        self.interval_days = days;
        self.refresh_view();
        self.push_log(format!("Interval {}", self.interval_label()));
    }

    /// Step through the configured intervals, wrapping around.
    pub fn cycle_interval(&mut self, forward: bool) {
        if self.intervals.is_empty() {
            return;
        }
        let len = self.intervals.len();
        let idx = self
            .intervals
            .iter()
            .position(|(_, d)| *d == self.interval_days)
            .unwrap_or(0);
        let next = if forward {
            (idx + 1) % len
        } else {
            (idx + len - 1) % len
        };
        let days = self.intervals[next].1;
        self.select_interval(days);
    }

    pub fn clear_forecasts(&mut self) {
        self.forecast_request += 1;
        self.predictions = None;
        self.prediction_status = FetchStatus::Idle;
        self.prediction_panel = None;
        self.panel_days = 0;
        self.simulation = None;
        self.simulation_status = FetchStatus::Idle;
        self.sim_factor = 1.0;
    }

    /// Choose how many forecast days the prediction panel lists. Returns
    /// `true` when no forecast is cached and one must be requested.
    pub fn set_panel_days(&mut self, days: usize) -> bool {
        self.panel_days = days;
        match self.predictions.as_deref() {
            Some(values) => {
                self.prediction_panel = Some(PredictionPanel::build(self.bank, values, days));
                false
            }
            None => self.prediction_status != FetchStatus::Loading,
        }
    }

    /// Start a forecast request. Returns its id; replies carrying an older id
    /// are dropped.
    pub fn mark_predictions_loading(&mut self) -> u64 {
        self.forecast_request += 1;
        self.prediction_status = FetchStatus::Loading;
        self.forecast_request
    }

    /// Forget the cached forecast so the next request fetches a fresh one.
    pub fn invalidate_predictions(&mut self) {
        self.forecast_request += 1;
        self.predictions = None;
        self.prediction_status = FetchStatus::Idle;
    }

    fn is_current_request(&self, request: u64) -> bool {
        if request != self.forecast_request {
            tracing::debug!(
                request,
                current = self.forecast_request,
                "Dropping superseded forecast reply"
            );
            return false;
        }
        true
    }

    fn is_current_factor(&self, factor: f64) -> bool {
        (factor - self.sim_factor).abs() <= f64::EPSILON
    }

    /// Move the scenario factor. Returns the new factor.
    pub fn nudge_sim_factor(&mut self, steps: i32) -> f64 {
        self.sim_factor = simulator::step_factor(self.sim_factor, steps);
        self.simulation_status = FetchStatus::Loading;
        self.sim_factor
    }

    pub fn apply(&mut self, event: AppEvent) {
        if let Some(bank) = event.bank() {
            if bank != self.bank {
                tracing::debug!(event_bank = %bank, current = %self.bank, "Dropping stale event");
                return;
            }
        }
        match event {
            AppEvent::PredictionsReady {
                bank,
                request,
                values,
            } => {
                if !self.is_current_request(request) {
                    return;
                }
                let rounded: Vec<f64> = values.into_iter().map(round_prediction).collect();
                self.push_log(format!("Forecast for {}: {} values", bank, rounded.len()));
                self.predictions = Some(rounded);
                self.prediction_status = FetchStatus::Idle;
                if self.panel_days > 0 {
                    let days = self.panel_days;
                    self.set_panel_days(days);
                }
                self.refresh_view();
            }
            AppEvent::PredictionsFailed {
                bank,
                request,
                error,
            } => {
                if !self.is_current_request(request) {
                    return;
                }
                self.prediction_status = FetchStatus::Failed(error.clone());
                self.push_log(format!("[WARN] Forecast for {} unavailable: {}", bank, error));
                self.refresh_view();
            }
            AppEvent::SimulationReady {
                bank: _,
                factor,
                closes,
            } => {
                // only the latest factor is relevant
                if !self.is_current_factor(factor) {
                    return;
                }
                let shift = self
                    .series
                    .as_ref()
                    .and_then(|s| s.last())
                    .map(|last| simulator::shifted_open(simulator::base_open(last), factor));
                self.simulation = Some(SimulationOutcome {
                    factor,
                    shift,
                    closes,
                });
                self.simulation_status = FetchStatus::Idle;
            }
            AppEvent::SimulationFailed {
                bank,
                factor,
                error,
            } => {
                if !self.is_current_factor(factor) {
                    return;
                }
                self.simulation_status = FetchStatus::Failed(error.clone());
                self.push_log(format!("[WARN] Simulation for {} failed: {}", bank, error));
            }
            AppEvent::LogMessage(msg) => {
                self.push_log(msg);
            }
            AppEvent::Error(msg) => {
                self.push_log(format!("[ERR] {}", msg));
            }
        }
    }
}

pub fn render(frame: &mut Frame, state: &AppState) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // status bar
            Constraint::Min(12),    // chart + stats
            Constraint::Length(9),  // predictions, simulator, test curve
            Constraint::Length(8),  // news + model
            Constraint::Length(4),  // log
            Constraint::Length(1),  // keybinds
        ])
        .split(frame.area());

    let profile = state.bank.profile();

    frame.render_widget(
        StatusBar {
            bank: state.bank,
            model: profile.model,
            interval: &state.interval_label(),
            current_price: state.view.as_ref().map(|v| v.current_price),
            forecast_status: &state.prediction_status,
        },
        outer[0],
    );

    let main_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(26)])
        .split(outer[1]);

    let visible = state.view.as_ref().map(|v| v.visible.as_slice()).unwrap_or(&[]);
    frame.render_widget(
        PriceChart::new(visible, profile.display_name, profile.accent)
            .merged(state.view.as_ref().and_then(|v| v.merged.as_ref())),
        main_area[0],
    );
    frame.render_widget(
        StatsPanel::new(state.view.as_ref().map(|v| &v.stats)),
        main_area[1],
    );

    let mid = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(outer[2]);
    frame.render_widget(
        PredictionPanelWidget::new(state.prediction_panel.as_ref(), &state.prediction_status),
        mid[0],
    );
    frame.render_widget(
        SimulatorPanel::new(
            state.sim_factor,
            state.simulation.as_ref(),
            &state.simulation_status,
        ),
        mid[1],
    );
    frame.render_widget(TestCurvePanel::new(state.test_curve.as_ref()), mid[2]);

    let lower = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(outer[3]);
    frame.render_widget(NewsPanel::new(state.bank), lower[0]);
    frame.render_widget(ModelPanel::new(state.model_tab), lower[1]);

    frame.render_widget(LogPanel::new(&state.log_messages), outer[4]);
    frame.render_widget(KeybindBar, outer[5]);
}
