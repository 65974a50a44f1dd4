//! Command-line parsing for the indicator time-series tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the analytics code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{CategoryKind, DedupePolicy};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "trends", version, about = "Indicator time-series explorer and forecaster")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the selected records.
    Show(ShowArgs),
    /// List the distinct indicators in the selection.
    Indicators(QueryArgs),
    /// Align several indicators on their shared years.
    Align(AlignArgs),
    /// Pearson correlation between two indicators.
    Correlate(CorrelateArgs),
    /// One-year-ahead linear forecast for every indicator in the selection.
    Forecast(ForecastArgs),
}

/// Data source and selection options shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct QueryArgs {
    /// Indicator CSV (falls back to $INDICATOR_CSV, then `agriculture_and_rural.csv`).
    #[arg(short = 'f', long, value_name = "CSV")]
    pub file: Option<PathBuf>,

    /// Category to classify by.
    #[arg(short = 'c', long, value_enum, default_value_t = CategoryKind::Agriculture)]
    pub category: CategoryKind,

    /// Custom code tags (comma-separated); overrides `--category`.
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// First year to include (default: earliest year in the data).
    #[arg(long = "from")]
    pub year_min: Option<i32>,

    /// Last year to include (default: latest year in the data).
    #[arg(long = "to")]
    pub year_max: Option<i32>,

    /// Restrict to one indicator (exact name).
    #[arg(short = 'i', long)]
    pub indicator: Option<String>,

    /// Restrict to indicator names containing this text (case-insensitive).
    #[arg(short = 'k', long)]
    pub keyword: Option<String>,

    /// Which row wins when a year repeats for an indicator.
    #[arg(long, value_enum, default_value_t = DedupePolicy::First)]
    pub dedupe: DedupePolicy,

    /// Print results as JSON instead of tables.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Maximum rows to print.
    #[arg(long, default_value_t = 50)]
    pub limit: usize,
}

#[derive(Debug, Args)]
pub struct AlignArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Indicator to include (repeatable). Defaults to the first three in the selection.
    #[arg(short = 's', long = "select", value_name = "NAME")]
    pub select: Vec<String>,

    /// Export the aligned series to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct CorrelateArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// The two indicators to correlate.
    #[arg(short = 's', long = "select", value_name = "NAME")]
    pub select: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ForecastArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Export forecasts (and skipped indicators) to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,
}
