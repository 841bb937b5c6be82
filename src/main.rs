use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{Event, KeyCode, KeyEventKind};
use tokio::sync::{mpsc, watch};

use bank_dashboard::bank_selection::{self, BankSelection, DataSource};
use bank_dashboard::config::Config;
use bank_dashboard::error::DashboardError;
use bank_dashboard::event::AppEvent;
use bank_dashboard::forecast::{ForecastClient, Forecaster};
use bank_dashboard::input::{parse_main_command, UiCommand};
use bank_dashboard::model::bank::Bank;
use bank_dashboard::ui::{self, AppState};

/// Remote outages log as warnings, decode and local failures as errors.
fn log_fetch_error(kind: &str, bank: Bank, error: &DashboardError) {
    if error.is_remote() {
        tracing::warn!(bank = %bank, error = %error, "{} request failed", kind);
    } else {
        tracing::error!(bank = %bank, error = %error, "{} request failed", kind);
    }
}

fn spawn_forecast(
    client: Arc<ForecastClient>,
    app_tx: mpsc::Sender<AppEvent>,
    bank: Bank,
    request: u64,
    horizon: usize,
) {
    tokio::spawn(async move {
        let event = match client.predict(bank, horizon).await {
            Ok(values) => AppEvent::PredictionsReady {
                bank,
                request,
                values,
            },
            Err(e) => {
                log_fetch_error("Forecast", bank, &e);
                AppEvent::PredictionsFailed {
                    bank,
                    request,
                    error: e.to_string(),
                }
            }
        };
        if let Err(e) = app_tx.send(event).await {
            tracing::error!(error = %e, "Failed to deliver forecast result");
        }
    });
}

fn spawn_simulation(
    client: Arc<ForecastClient>,
    app_tx: mpsc::Sender<AppEvent>,
    bank: Bank,
    factor: f64,
    horizon: usize,
) {
    tokio::spawn(async move {
        let event = match client.simulate(bank, factor, horizon).await {
            Ok(closes) => AppEvent::SimulationReady {
                bank,
                factor,
                closes,
            },
            Err(e) => {
                log_fetch_error("Simulation", bank, &e);
                AppEvent::SimulationFailed {
                    bank,
                    factor,
                    error: e.to_string(),
                }
            }
        };
        if let Err(e) = app_tx.send(event).await {
            tracing::error!(error = %e, "Failed to deliver simulation result");
        }
    });
}

/// Request a forecast for the current bank unless one is cached or in flight.
fn ensure_forecast(
    state: &mut AppState,
    client: &Arc<ForecastClient>,
    app_tx: &mpsc::Sender<AppEvent>,
) {
    if state.predictions.is_some() || state.prediction_status == ui::FetchStatus::Loading {
        return;
    }
    let request = state.mark_predictions_loading();
    spawn_forecast(
        client.clone(),
        app_tx.clone(),
        state.bank,
        request,
        state.horizon,
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {:#}", e);
            eprintln!("Make sure config/default.toml exists and is valid");
            std::process::exit(1);
        }
    };

    // Log to file so it doesn't interfere with the TUI
    let log_file = std::fs::File::create("bank-dashboard.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::try_new(&config.logging.level)
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
            }),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .json()
        .init();

    tracing::info!(
        api_url = %config.api.base_url,
        data_dir = %config.dashboard.data_dir.display(),
        "Starting bank-dashboard"
    );

    let initial_bank = config.dashboard.bank()?;
    let intervals = config.dashboard.interval_options()?;
    let interval_days = config.dashboard.default_interval_days()?;
    let max_prediction_interval = config.dashboard.prediction_max_interval_days()?;

    let client = Arc::new(
        ForecastClient::new(&config.api.base_url, config.api.timeout())
            .context("failed to build forecast client")?,
    );
    let source = DataSource::new(config.dashboard.data_dir.clone());
    let selection = BankSelection::standard();

    let (app_tx, mut app_rx) = mpsc::channel::<AppEvent>(64);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let ctrl_c_shutdown = shutdown_tx.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        tracing::info!("Ctrl+C received");
        let _ = ctrl_c_shutdown.send(true);
    });

    let mut app_state = AppState::new(
        initial_bank,
        intervals,
        interval_days,
        max_prediction_interval,
        config.api.n_future,
    );
    selection.select(&mut app_state, &source, initial_bank);
    if app_state.wants_overlay() {
        ensure_forecast(&mut app_state, &client, &app_tx);
    }

    let mut terminal = ratatui::init();

    loop {
        terminal.draw(|frame| ui::render(frame, &app_state))?;

        if crossterm::event::poll(Duration::from_millis(config.ui.refresh_rate_ms))? {
            if let Event::Key(key) = crossterm::event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if matches!(key.code, KeyCode::Char('c'))
                    && key
                        .modifiers
                        .contains(crossterm::event::KeyModifiers::CONTROL)
                {
                    let _ = shutdown_tx.send(true);
                }
                match parse_main_command(&key.code) {
                    Some(UiCommand::Quit) => {
                        tracing::info!("User quit");
                        let _ = shutdown_tx.send(true);
                        break;
                    }
                    Some(UiCommand::SelectBank(bank)) => {
                        if bank != app_state.bank {
                            selection.select(&mut app_state, &source, bank);
                            if app_state.wants_overlay() {
                                ensure_forecast(&mut app_state, &client, &app_tx);
                            }
                        }
                    }
                    Some(cmd @ (UiCommand::NextInterval | UiCommand::PrevInterval)) => {
                        app_state.cycle_interval(cmd == UiCommand::NextInterval);
                        if app_state.wants_overlay() {
                            ensure_forecast(&mut app_state, &client, &app_tx);
                        }
                    }
                    Some(UiCommand::Forecast { days }) => {
                        if app_state.set_panel_days(days) {
                            ensure_forecast(&mut app_state, &client, &app_tx);
                        }
                    }
                    Some(UiCommand::ShowModel(model)) => {
                        app_state.model_tab = model;
                    }
                    Some(cmd @ (UiCommand::ScenarioUp | UiCommand::ScenarioDown)) => {
                        let steps = if cmd == UiCommand::ScenarioUp { 1 } else { -1 };
                        let factor = app_state.nudge_sim_factor(steps);
                        spawn_simulation(
                            client.clone(),
                            app_tx.clone(),
                            app_state.bank,
                            factor,
                            app_state.horizon,
                        );
                    }
                    Some(UiCommand::Reload) => {
                        app_state.invalidate_predictions();
                        if let Err(e) = bank_selection::reload_series(&mut app_state, &source) {
                            app_state.push_log(format!("[WARN] reload: {}", e));
                        }
                        if app_state.wants_overlay() || app_state.panel_days > 0 {
                            ensure_forecast(&mut app_state, &client, &app_tx);
                        }
                    }
                    None => {}
                }
            }
        }

        while let Ok(evt) = app_rx.try_recv() {
            app_state.apply(evt);
        }

        if *shutdown_rx.borrow() {
            break;
        }
    }

    ratatui::restore();
    tracing::info!("Shutdown complete");
    println!("Goodbye! Check bank-dashboard.log for details.");
    Ok(())
}
