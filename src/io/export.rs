//! Export engine results to CSV.
//!
//! The exports are meant to be easy to consume in spreadsheets or downstream scripts.

use std::io::Write;
use std::path::Path;

use crate::analytics::ForecastBatch;
use crate::domain::AlignedSeries;
use crate::error::AppError;

/// Write a forecast batch to a CSV file.
///
/// Skipped indicators are written too, with an empty prediction and the
/// failure kind in `status`.
pub fn write_forecasts_csv(path: &Path, batch: &ForecastBatch) -> Result<(), AppError> {
    let writer = create_writer(path)?;
    write_forecasts(writer, batch)
}

/// Write an aligned series to a CSV file: one row per year, one column per indicator.
pub fn write_aligned_csv(path: &Path, aligned: &AlignedSeries) -> Result<(), AppError> {
    let writer = create_writer(path)?;
    write_aligned(writer, aligned)
}

pub fn write_forecasts<W: Write>(writer: csv::Writer<W>, batch: &ForecastBatch) -> Result<(), AppError> {
    let mut writer = writer;
    writer
        .write_record(["indicator_code", "indicator_name", "predicted_year", "predicted_value", "status"])
        .map_err(write_err)?;

    for p in &batch.points {
        writer
            .write_record([
                p.indicator_code.as_deref().unwrap_or(""),
                p.indicator_name.as_str(),
                p.predicted_year.to_string().as_str(),
                format!("{:.2}", p.predicted_value).as_str(),
                "ok",
            ])
            .map_err(write_err)?;
    }
    for (name, err) in &batch.skipped {
        writer
            .write_record(["", name.as_str(), "", "", err.kind()])
            .map_err(write_err)?;
    }

    writer.flush().map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))
}

pub fn write_aligned<W: Write>(writer: csv::Writer<W>, aligned: &AlignedSeries) -> Result<(), AppError> {
    let mut writer = writer;
    let mut header = vec!["year".to_string()];
    header.extend(aligned.indicators.iter().cloned());
    writer.write_record(&header).map_err(write_err)?;

    for (year, row) in &aligned.rows {
        let mut fields = vec![year.to_string()];
        fields.extend(
            aligned
                .indicators
                .iter()
                .map(|name| row.get(name).map(|v| v.to_string()).unwrap_or_default()),
        );
        writer.write_record(&fields).map_err(write_err)?;
    }

    writer.flush().map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))
}

fn create_writer(path: &Path) -> Result<csv::Writer<std::fs::File>, AppError> {
    log::info!("writing export to {}", path.display());
    csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))
}

fn write_err(e: csv::Error) -> AppError {
    AppError::new(2, format!("Failed to write export CSV row: {e}"))
}
