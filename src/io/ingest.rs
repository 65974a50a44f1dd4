//! CSV ingest for the indicator table.
//!
//! This module turns a `Year, Indicator Name, Indicator Code, Value` CSV into a
//! `Table` the engine can work on.
//!
//! Design goals:
//! - **Strict schema** for the four columns (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Blank means absent**: empty year/code/value cells become `None`
//! - **Separation of concerns**: no analytics here

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{Record, Table};
use crate::error::AppError;

const COL_YEAR: &str = "year";
const COL_NAME: &str = "indicator name";
const COL_CODE: &str = "indicator code";
const COL_VALUE: &str = "value";

/// Summary stats about the loaded table.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStats {
    pub n_records: usize,
    pub n_indicators: usize,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: the table + stats + row errors.
#[derive(Debug, Clone)]
pub struct IngestedTable {
    pub table: Table,
    pub stats: DatasetStats,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Load the indicator CSV at `path`.
pub fn load_table(path: &Path) -> Result<IngestedTable, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    let ingested = load_table_from_reader(file)?;
    log::info!(
        "loaded {} of {} rows from {} ({} indicators)",
        ingested.rows_used,
        ingested.rows_read,
        path.display(),
        ingested.stats.n_indicators
    );
    Ok(ingested)
}

/// Load the indicator CSV from any reader.
pub fn load_table_from_reader<R: Read>(source: R) -> Result<IngestedTable, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);
    ensure_required_columns_exist(&header_map)?;

    let mut records = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2: header is line 1 and lines are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let parsed = result
            .map_err(|e| format!("CSV parse error: {e}"))
            .and_then(|row| parse_row(&row, &header_map));
        match parsed {
            Ok(record) => records.push(record),
            Err(message) => {
                log::debug!("skipping line {line}: {message}");
                row_errors.push(RowError { line, message });
            }
        }
    }

    let rows_used = records.len();
    if rows_used == 0 {
        return Err(AppError::new(3, "No valid rows in the indicator CSV."));
    }
    if !row_errors.is_empty() {
        log::warn!("{} row(s) skipped during ingest", row_errors.len());
    }

    let table = Table::new(records);
    let stats = compute_stats(&table);

    Ok(IngestedTable {
        table,
        stats,
        row_errors,
        rows_read,
        rows_used,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_lowercase()
}

fn ensure_required_columns_exist(header_map: &HashMap<String, usize>) -> Result<(), AppError> {
    for (col, display) in [
        (COL_YEAR, "Year"),
        (COL_NAME, "Indicator Name"),
        (COL_CODE, "Indicator Code"),
        (COL_VALUE, "Value"),
    ] {
        if !header_map.contains_key(col) {
            return Err(AppError::new(2, format!("Missing required column: `{display}`")));
        }
    }
    Ok(())
}

fn parse_row(record: &StringRecord, header_map: &HashMap<String, usize>) -> Result<Record, String> {
    let indicator_name = get_optional(record, header_map, COL_NAME)
        .ok_or_else(|| "Missing required value: `Indicator Name`".to_string())?
        .to_string();
    let year = get_optional(record, header_map, COL_YEAR).map(parse_year).transpose()?;
    let indicator_code = get_optional(record, header_map, COL_CODE).map(str::to_string);
    let value = get_optional(record, header_map, COL_VALUE)
        .map(parse_value)
        .transpose()?
        .flatten();

    Ok(Record {
        year,
        indicator_name,
        indicator_code,
        value,
    })
}

fn get_optional<'a>(record: &'a StringRecord, header_map: &HashMap<String, usize>, name: &str) -> Option<&'a str> {
    let idx = header_map.get(name)?;
    record.get(*idx).map(str::trim).filter(|s| !s.is_empty())
}

fn parse_year(s: &str) -> Result<i32, String> {
    if let Ok(y) = s.parse::<i32>() {
        return Ok(y);
    }
    // Some exports write integral columns as floats ("1990.0").
    match s.parse::<f64>() {
        Ok(v) if v.fract() == 0.0 && v >= f64::from(i32::MIN) && v <= f64::from(i32::MAX) => Ok(v as i32),
        _ => Err(format!("Invalid year '{s}'.")),
    }
}

fn parse_value(s: &str) -> Result<Option<f64>, String> {
    let v = s.parse::<f64>().map_err(|_| format!("Invalid value '{s}'."))?;
    Ok(v.is_finite().then_some(v))
}

fn compute_stats(table: &Table) -> DatasetStats {
    let span = table.year_span();
    DatasetStats {
        n_records: table.len(),
        n_indicators: table.indicator_names().len(),
        year_min: span.map(|(lo, _)| lo),
        year_max: span.map(|(_, hi)| hi),
    }
}
