pub mod bank_selection;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod event;
pub mod forecast;
pub mod input;
pub mod metrics;
pub mod model;
pub mod news;
pub mod report;
pub mod series_loader;
pub mod simulator;
pub mod stats;
pub mod test_curve;
pub mod ui;
