use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};

use crate::config::parse_interval_days;
use crate::forecast::build_merged_series;
use crate::metrics::mean_absolute_error;
use crate::model::forecast::{MergedSeries, PredictionPoint};
use crate::series_loader;
use crate::stats::{compute_statistics, StatisticsSnapshot};
use crate::test_curve;

pub fn run_cli(args: &[String]) -> Result<()> {
    let Some(command) = args.first() else {
        print_usage();
        return Ok(());
    };
    match command.as_str() {
        "stats" => {
            let path = args
                .get(1)
                .ok_or_else(|| anyhow!("`stats` requires a CSV path"))?;
            let days = match args.get(2) {
                Some(s) => Some(parse_interval_days(s)?),
                None => None,
            };
            println!("{}", stats_report(Path::new(path), days)?);
            Ok(())
        }
        "merge" => {
            let path = args
                .get(1)
                .ok_or_else(|| anyhow!("`merge` requires a CSV path"))?;
            let values = parse_values(
                args.get(2)
                    .ok_or_else(|| anyhow!("`merge` requires comma separated predictions"))?,
            )?;
            let merged = merge_with_history(Path::new(path), &values)?;
            println!("{}", format_merged(&merged));
            Ok(())
        }
        "mae" => {
            let predicted = parse_values(
                args.get(1)
                    .ok_or_else(|| anyhow!("`mae` requires predicted values"))?,
            )?;
            let actual = parse_values(
                args.get(2)
                    .ok_or_else(|| anyhow!("`mae` requires actual values"))?,
            )?;
            let mae = mean_absolute_error(&predicted, &actual)?;
            println!("MAE {:.4}", mae);
            Ok(())
        }
        "test-curve" => {
            let path = args
                .get(1)
                .ok_or_else(|| anyhow!("`test-curve` requires a CSV path"))?;
            let curve = test_curve::load_test_curve(Path::new(path))?;
            println!("points {}  MAE {:.4}", curve.points.len(), curve.mae()?);
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => bail!("unknown command '{}'", other),
    }
}

fn print_usage() {
    println!("Usage:");
    println!("  bank-report stats <prices.csv> [interval]");
    println!("  bank-report merge <prices.csv> <p1,p2,p3>");
    println!("  bank-report mae <p1,p2,...> <a1,a2,...>");
    println!("  bank-report test-curve <test.csv>");
}

/// Parse `"17.3,17.5, 17.6"` into floats.
pub fn parse_values(raw: &str) -> Result<Vec<f64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .with_context(|| format!("invalid number '{}'", s))
        })
        .collect()
}

pub fn stats_report(path: &Path, days: Option<usize>) -> Result<String> {
    let series = series_loader::load_csv(path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    let window = series.tail(days.unwrap_or(series.len()));
    let closes: Vec<f64> = window.iter().map(|p| p.close).collect();
    let stats = compute_statistics(&closes)?;
    Ok(format_stats(window.len(), &stats))
}

pub fn format_stats(points: usize, stats: &StatisticsSnapshot) -> String {
    let opt = |v: Option<f64>, digits: usize| {
        v.map(|x| format!("{:.*}%", digits, x))
            .unwrap_or_else(|| "---".to_string())
    };
    format!(
        "points {}\nmean   €{:.2}\nmax    €{:.2}\nmin    €{:.2}\ntrend  {}\nvol    {}",
        points,
        stats.mean,
        stats.max,
        stats.min,
        opt(stats.trend_percent, 3),
        opt(stats.volatility_percent, 2),
    )
}

pub fn merge_with_history(path: &Path, predictions: &[f64]) -> Result<MergedSeries> {
    let series = series_loader::load_csv(path)?;
    let last = series
        .last()
        .ok_or_else(|| anyhow!("{} has no prices", path.display()))?;
    Ok(build_merged_series(
        PredictionPoint {
            date: last.date,
            value: last.close,
        },
        predictions,
        predictions.len(),
    ))
}

pub fn format_merged(merged: &MergedSeries) -> String {
    merged
        .points
        .iter()
        .map(|p| {
            format!(
                "{} {:.2} {}",
                p.date,
                p.value,
                if p.is_prediction { "pred" } else { "anchor" }
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
