use std::collections::HashMap;

use bank_dashboard::event::AppEvent;
use bank_dashboard::model::bank::Bank;
use bank_dashboard::model::price::PriceSeries;
use bank_dashboard::series_loader;
use bank_dashboard::ui::{AppState, FetchStatus};

fn intervals() -> Vec<(String, usize)> {
    vec![
        ("7d".to_string(), 7),
        ("1M".to_string(), 30),
        ("3M".to_string(), 90),
    ]
}

fn series(days: u32) -> PriceSeries {
    let rows: Vec<HashMap<String, String>> = (1..=days)
        .map(|d| {
            HashMap::from([
                ("Date".to_string(), format!("2024-01-{:02}", d)),
                ("Open".to_string(), format!("{:.2}", 10.0 + d as f64 * 0.1 - 0.05)),
                ("Close".to_string(), format!("{:.2}", 10.0 + d as f64 * 0.1)),
            ])
        })
        .collect();
    series_loader::load(&rows).unwrap()
}

fn state() -> AppState {
    let mut s = AppState::new(Bank::Bbva, intervals(), 7, 7, 3);
    s.set_series(Some(series(20)));
    s
}

#[test]
/// The visible window follows the selected interval, clamped to the data length.
fn view_tracks_selected_interval() {
    let mut s = state();
    assert_eq!(s.view.as_ref().unwrap().visible.len(), 7);

    s.select_interval(30);
    assert_eq!(s.view.as_ref().unwrap().visible.len(), 20);
    assert_eq!(s.interval_label(), "1M");
}

#[test]
/// Forecast results round to cents and draw the overlay on short intervals only.
fn predictions_ready_builds_overlay_for_short_interval() {
    let mut s = state();
    let request = s.mark_predictions_loading();
    s.apply(AppEvent::PredictionsReady {
        bank: Bank::Bbva,
        request,
        values: vec![12.104, 12.2, 12.3],
    });

    let merged = s.view.as_ref().unwrap().merged.as_ref().unwrap();
    assert_eq!(merged.len(), 4);
    assert!((merged.points[0].value - 12.0).abs() < 1e-9);
    assert!((merged.points[1].value - 12.10).abs() < 1e-9);
    assert_eq!(s.prediction_status, FetchStatus::Idle);

    s.select_interval(90);
    assert!(s.view.as_ref().unwrap().merged.is_none());
    assert!(!s.wants_overlay());
}

#[test]
/// A result for a bank that is no longer selected must not touch the state.
fn stale_bank_events_are_ignored() {
    let mut s = state();
    let request = s.mark_predictions_loading();
    s.apply(AppEvent::PredictionsReady {
        bank: Bank::Santander,
        request,
        values: vec![8.8, 8.9, 9.0],
    });
    assert!(s.predictions.is_none());
    assert!(s.view.as_ref().unwrap().merged.is_none());
}

#[test]
/// Forecast failures degrade the panel only; the chart and statistics stay.
fn prediction_failure_keeps_chart() {
    let mut s = state();
    let request = s.mark_predictions_loading();
    s.apply(AppEvent::PredictionsFailed {
        bank: Bank::Bbva,
        request,
        error: "timeout".to_string(),
    });
    assert_eq!(s.prediction_status, FetchStatus::Failed("timeout".to_string()));
    assert!(s.view.is_some());
    assert!(s.log_messages.last().unwrap().starts_with("[WARN]"));
}

#[test]
/// Choosing forecast days before data exists asks for a fetch, then fills the panel.
fn panel_days_request_then_fill() {
    let mut s = state();
    assert!(s.set_panel_days(2));
    let request = s.mark_predictions_loading();
    assert!(!s.set_panel_days(2));

    s.apply(AppEvent::PredictionsReady {
        bank: Bank::Bbva,
        request,
        values: vec![17.30, 17.54, 17.64],
    });
    let panel = s.prediction_panel.as_ref().unwrap();
    assert_eq!(panel.shown, vec![17.30, 17.54]);
    assert!((panel.mae.clone().unwrap() - 0.0).abs() < 1e-9);

    assert!(!s.set_panel_days(3));
    assert_eq!(s.prediction_panel.as_ref().unwrap().shown.len(), 3);
}

#[test]
/// Simulation results only apply to the factor currently selected.
fn simulation_result_matches_latest_factor() {
    let mut s = state();
    let first = s.nudge_sim_factor(1);
    let second = s.nudge_sim_factor(1);
    assert!((second - 1.02).abs() < 1e-12);

    s.apply(AppEvent::SimulationReady {
        bank: Bank::Bbva,
        factor: first,
        closes: vec![1.0],
    });
    assert!(s.simulation.is_none());

    s.apply(AppEvent::SimulationReady {
        bank: Bank::Bbva,
        factor: second,
        closes: vec![12.1, 12.2, 12.3],
    });
    let outcome = s.simulation.as_ref().unwrap();
    let shift = outcome.shift.unwrap();
    // last open 11.95
    assert!((shift.base_open - 11.95).abs() < 1e-9);
    assert!((shift.new_open - 11.95 * 1.02).abs() < 1e-9);
    assert_eq!(s.simulation_status, FetchStatus::Idle);
}

#[test]
/// A late failure for an earlier factor leaves the current outcome in place.
fn simulation_failure_for_old_factor_is_ignored() {
    let mut s = state();
    let first = s.nudge_sim_factor(1);
    let second = s.nudge_sim_factor(1);
    s.apply(AppEvent::SimulationReady {
        bank: Bank::Bbva,
        factor: second,
        closes: vec![12.1, 12.2, 12.3],
    });

    s.apply(AppEvent::SimulationFailed {
        bank: Bank::Bbva,
        factor: first,
        error: "timeout".to_string(),
    });
    assert_eq!(s.simulation_status, FetchStatus::Idle);
    assert!((s.simulation.as_ref().unwrap().factor - second).abs() < 1e-12);

    s.apply(AppEvent::SimulationFailed {
        bank: Bank::Bbva,
        factor: second,
        error: "timeout".to_string(),
    });
    assert_eq!(s.simulation_status, FetchStatus::Failed("timeout".to_string()));
}

#[test]
/// After a reload, replies to the earlier request no longer touch the state.
fn superseded_forecast_replies_are_ignored() {
    let mut s = state();
    let old = s.mark_predictions_loading();
    s.invalidate_predictions();
    let current = s.mark_predictions_loading();

    s.apply(AppEvent::PredictionsFailed {
        bank: Bank::Bbva,
        request: old,
        error: "timeout".to_string(),
    });
    assert_eq!(s.prediction_status, FetchStatus::Loading);

    s.apply(AppEvent::PredictionsReady {
        bank: Bank::Bbva,
        request: current,
        values: vec![12.1, 12.2, 12.3],
    });
    s.apply(AppEvent::PredictionsFailed {
        bank: Bank::Bbva,
        request: old,
        error: "timeout".to_string(),
    });
    assert_eq!(s.prediction_status, FetchStatus::Idle);
    assert_eq!(s.predictions.as_deref(), Some(&[12.1, 12.2, 12.3][..]));
}

#[test]
/// Clearing forecasts also orphans the request that was in flight.
fn clear_forecasts_drops_in_flight_reply() {
    let mut s = state();
    let request = s.mark_predictions_loading();
    s.clear_forecasts();
    s.apply(AppEvent::PredictionsReady {
        bank: Bank::Bbva,
        request,
        values: vec![12.1, 12.2, 12.3],
    });
    assert!(s.predictions.is_none());
}

#[test]
fn cycle_interval_wraps() {
    let mut s = state();
    s.cycle_interval(false);
    assert_eq!(s.interval_days, 90);
    s.cycle_interval(true);
    assert_eq!(s.interval_days, 7);
    s.cycle_interval(true);
    assert_eq!(s.interval_days, 30);
}
