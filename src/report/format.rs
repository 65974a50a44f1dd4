//! Formatted terminal output for tables, aligned series and forecasts.
//!
//! We keep formatting code in one place so:
//! - the analytics code stays clean and testable
//! - output changes are localized

use crate::analytics::ForecastBatch;
use crate::domain::{AlignedSeries, RunConfig, Table};
use crate::error::AnalyticsError;
use crate::io::ingest::IngestedTable;

const NAME_WIDTH: usize = 48;
const CODE_WIDTH: usize = 20;
const COLUMN_WIDTH: usize = 14;

/// Format the dataset header (source, category, filters, row counts).
pub fn format_run_summary(ingest: &IngestedTable, selected: &Table, config: &RunConfig) -> String {
    let mut out = String::new();

    out.push_str("=== trends - Indicator Time-Series ===\n");
    out.push_str(&format!("Source: {}\n", config.csv_path.display()));
    out.push_str(&format!(
        "Rows: read={} used={} skipped={}\n",
        ingest.rows_read,
        ingest.rows_used,
        ingest.row_errors.len()
    ));
    if let (Some(lo), Some(hi)) = (ingest.stats.year_min, ingest.stats.year_max) {
        out.push_str(&format!("Years: {lo}..{hi} | indicators={}\n", ingest.stats.n_indicators));
    }

    let category = config
        .resolved_category()
        .map(|c| format!("{} [{}]", c.name, c.tags.join(", ")))
        .unwrap_or_else(|| "All".to_string());
    out.push_str(&format!("Category: {category}\n"));
    if let Some(name) = &config.indicator {
        out.push_str(&format!("Indicator: {name}\n"));
    }
    if let Some(keyword) = &config.keyword {
        out.push_str(&format!("Keyword: {}\n", keyword.trim()));
    }
    out.push_str(&format!(
        "Selected: {} record(s), {} indicator(s)\n",
        selected.len(),
        selected.indicator_names().len()
    ));

    out
}

/// Format raw records, at most `limit` rows.
pub fn format_records(table: &Table, limit: usize) -> String {
    let mut out = String::new();
    push_line(
        &mut out,
        format!(
            "{:>6} {:<NAME_WIDTH$} {:<CODE_WIDTH$} {:>COLUMN_WIDTH$}",
            "year", "indicator", "code", "value"
        ),
    );
    push_line(
        &mut out,
        format!("{:-<6} {:-<NAME_WIDTH$} {:-<CODE_WIDTH$} {:-<COLUMN_WIDTH$}", "", "", "", ""),
    );

    for r in table.iter().take(limit) {
        push_line(
            &mut out,
            format!(
                "{:>6} {:<NAME_WIDTH$} {:<CODE_WIDTH$} {:>COLUMN_WIDTH$}",
                r.year.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string()),
                truncate(&r.indicator_name, NAME_WIDTH),
                truncate(r.indicator_code.as_deref().unwrap_or("-"), CODE_WIDTH),
                fmt_opt(r.value),
            ),
        );
    }
    if table.len() > limit {
        out.push_str(&format!("... {} more row(s)\n", table.len() - limit));
    }

    out
}

/// Format a numbered list of indicator names.
pub fn format_indicators(names: &[String]) -> String {
    let mut out = String::new();
    for (idx, name) in names.iter().enumerate() {
        out.push_str(&format!("{:>3}) {name}\n", idx + 1));
    }
    out
}

/// Format an aligned series: one row per year, one column per indicator.
///
/// Column headers are the 1-based indicator positions; a legend maps them to names.
pub fn format_aligned(aligned: &AlignedSeries) -> String {
    let mut out = String::new();
    if aligned.is_empty() {
        out.push_str("Insufficient data: the selected indicators share no years.\n");
        return out;
    }

    out.push_str("Columns:\n");
    out.push_str(&format_indicators(&aligned.indicators));
    out.push('\n');

    let mut header = format!("{:>6}", "year");
    for idx in 0..aligned.indicators.len() {
        header.push_str(&format!(" {:>COLUMN_WIDTH$}", format!("[{}]", idx + 1)));
    }
    push_line(&mut out, header);

    for (year, row) in &aligned.rows {
        let mut line = format!("{year:>6}");
        for name in &aligned.indicators {
            line.push_str(&format!(" {:>COLUMN_WIDTH$}", fmt_opt(row.get(name).copied())));
        }
        push_line(&mut out, line);
    }

    out
}

/// Format a correlation result, keeping failures distinct from numbers.
pub fn format_correlation(name_a: &str, name_b: &str, years: usize, result: &Result<f64, AnalyticsError>) -> String {
    let mut out = String::new();
    out.push_str(&format!("A: {name_a}\nB: {name_b}\nAligned years: {years}\n"));
    match result {
        Ok(r) => out.push_str(&format!("Pearson r = {r:.4}\n")),
        Err(err) => out.push_str(&format!("Correlation unavailable ({}): {err}\n", err.kind())),
    }
    out
}

/// Format the forecast table plus any skipped indicators.
pub fn format_forecasts(batch: &ForecastBatch) -> String {
    let mut out = String::new();
    push_line(
        &mut out,
        format!(
            "{:<CODE_WIDTH$} {:<NAME_WIDTH$} {:>6} {:>COLUMN_WIDTH$}",
            "code", "indicator", "year", "forecast"
        ),
    );
    push_line(
        &mut out,
        format!("{:-<CODE_WIDTH$} {:-<NAME_WIDTH$} {:-<6} {:-<COLUMN_WIDTH$}", "", "", "", ""),
    );

    for p in &batch.points {
        push_line(
            &mut out,
            format!(
                "{:<CODE_WIDTH$} {:<NAME_WIDTH$} {:>6} {:>COLUMN_WIDTH$.2}",
                truncate(p.indicator_code.as_deref().unwrap_or("-"), CODE_WIDTH),
                truncate(&p.indicator_name, NAME_WIDTH),
                p.predicted_year,
                p.predicted_value,
            ),
        );
    }

    if !batch.skipped.is_empty() {
        out.push_str("\nSkipped:\n");
        for (name, err) in &batch.skipped {
            out.push_str(&format!("- {name}: {err}\n"));
        }
    }

    out
}

fn push_line(out: &mut String, line: String) {
    out.push_str(line.trim_end());
    out.push('\n');
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.2}"),
        _ => "-".to_string(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
