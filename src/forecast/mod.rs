pub mod client;
pub mod merge;

pub use client::{ForecastClient, Forecaster};
pub use merge::{build_merged_series, future_dates, round_prediction};
