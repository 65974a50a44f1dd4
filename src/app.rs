//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - sets up logging and `.env` configuration
//! - parses CLI arguments
//! - loads and selects the indicator table
//! - runs the requested engine operation
//! - prints reports and writes optional exports

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use serde_json::json;

use crate::analytics::{align, correlate};
use crate::cli::{AlignArgs, Command, CorrelateArgs, ForecastArgs, QueryArgs, ShowArgs};
use crate::domain::{RunConfig, default_selection};
use crate::error::AppError;

pub mod pipeline;

/// Environment variable naming the default indicator CSV.
pub const CSV_ENV_VAR: &str = "INDICATOR_CSV";

/// CSV used when neither `--file` nor `$INDICATOR_CSV` is set.
pub const DEFAULT_CSV: &str = "agriculture_and_rural.csv";

/// Indicators pre-selected for `align` when none are named.
const DEFAULT_ALIGN_COUNT: usize = 3;

/// Entry point for the `trends` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Show(args) => handle_show(args),
        Command::Indicators(args) => handle_indicators(args),
        Command::Align(args) => handle_align(args),
        Command::Correlate(args) => handle_correlate(args),
        Command::Forecast(args) => handle_forecast(args),
    }
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args.query);
    let selection = pipeline::run_selection(&config)?;

    if args.query.json {
        return print_json(&selection.selected);
    }
    println!(
        "{}",
        crate::report::format_run_summary(&selection.ingest, &selection.selected, &config)
    );
    println!("{}", crate::report::format_records(&selection.selected, args.limit));
    Ok(())
}

fn handle_indicators(args: QueryArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args);
    let selection = pipeline::run_selection(&config)?;
    let names = selection.selected.indicator_names();

    if args.json {
        return print_json(&names);
    }
    println!("{}", crate::report::format_indicators(&names));
    Ok(())
}

fn handle_align(args: AlignArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args.query);
    let selection = pipeline::run_selection(&config)?;

    let names = if args.select.is_empty() {
        default_selection(&selection.selected.indicator_names(), DEFAULT_ALIGN_COUNT)
    } else {
        args.select.clone()
    };
    let aligned = align(&selection.selected, &names, config.dedupe);
    log::info!("aligned {} indicator(s) over {} year(s)", aligned.indicators.len(), aligned.len());

    if args.query.json {
        print_json(&aligned)?;
    } else {
        println!("{}", crate::report::format_aligned(&aligned));
    }

    if let Some(path) = &args.export {
        crate::io::export::write_aligned_csv(path, &aligned)?;
    }
    Ok(())
}

fn handle_correlate(args: CorrelateArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args.query);
    let selection = pipeline::run_selection(&config)?;

    let names = if args.select.is_empty() {
        default_selection(&selection.selected.indicator_names(), 2)
    } else {
        args.select.clone()
    };
    let aligned = align(&selection.selected, &names, config.dedupe);
    let result = correlate(&aligned, &names);

    let name_a = names.first().map(String::as_str).unwrap_or("-");
    let name_b = names.get(1).map(String::as_str).unwrap_or("-");
    if args.query.json {
        let (r, error) = match &result {
            Ok(r) => (Some(*r), None),
            Err(err) => (None, Some(json!({ "kind": err.kind(), "message": err.to_string() }))),
        };
        print_json(&json!({
            "indicators": &names,
            "aligned_years": aligned.len(),
            "r": r,
            "error": error,
        }))?;
    } else {
        println!(
            "{}",
            crate::report::format_correlation(name_a, name_b, aligned.len(), &result)
        );
    }

    // The report already shows the failure; only the exit code is left.
    result.map(|_| ()).map_err(correlation_failure)
}

fn correlation_failure(err: crate::error::AnalyticsError) -> AppError {
    AppError::from(err).reported()
}

fn handle_forecast(args: ForecastArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args.query);
    let selection = pipeline::run_selection(&config)?;
    let batch = pipeline::forecast_selection(&selection);

    if args.query.json {
        let skipped: Vec<_> = batch
            .skipped
            .iter()
            .map(|(name, err)| json!({ "indicator_name": name, "kind": err.kind(), "message": err.to_string() }))
            .collect();
        print_json(&json!({ "forecasts": &batch.points, "skipped": skipped }))?;
    } else {
        println!("{}", crate::report::format_forecasts(&batch));
    }

    if let Some(path) = &args.export {
        crate::io::export::write_forecasts_csv(path, &batch)?;
    }
    Ok(())
}

pub fn run_config_from_args(args: &QueryArgs) -> RunConfig {
    RunConfig {
        csv_path: resolve_csv_path(args.file.clone(), std::env::var(CSV_ENV_VAR).ok()),
        category: args.category,
        tags: args.tags.clone(),
        year_min: args.year_min,
        year_max: args.year_max,
        indicator: args.indicator.clone(),
        keyword: args.keyword.clone(),
        dedupe: args.dedupe,
    }
}

/// `--file` wins, then the environment, then [`DEFAULT_CSV`].
fn resolve_csv_path(flag: Option<PathBuf>, env: Option<String>) -> PathBuf {
    flag.or_else(|| env.filter(|v| !v.trim().is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CSV))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::new(4, format!("Failed to serialize JSON output: {e}")))?;
    println!("{text}");
    Ok(())
}
