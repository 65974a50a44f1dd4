//! One-year-ahead linear forecasts.
//!
//! Each indicator gets an OLS trend line over its full history; the line is
//! evaluated one year past the latest observation. Batch runs fit indicators
//! independently (in parallel) and collect failures next to the successes.

use std::collections::HashSet;

use rayon::prelude::*;

use crate::domain::{ForecastPoint, Table, TrendLine};
use crate::error::AnalyticsError;
use crate::math::{fit_line, round2, variance};

/// Output of a batch forecast.
#[derive(Debug, Clone, Default)]
pub struct ForecastBatch {
    /// Successful forecasts, in indicator first-seen order.
    pub points: Vec<ForecastPoint>,
    /// Indicators that could not be forecast and why.
    pub skipped: Vec<(String, AnalyticsError)>,
}

/// Fit `value = slope * year + intercept` to one indicator's history.
pub fn fit_trend(table: &Table, indicator_name: &str) -> Result<TrendLine, AnalyticsError> {
    let observations = table.series(indicator_name);
    fit_observations(indicator_name, &observations)
}

/// Predict the value for the year after the indicator's latest observation.
///
/// The predicted value is rounded to 2 decimals, ties away from zero.
pub fn forecast_next(table: &Table, indicator_name: &str) -> Result<ForecastPoint, AnalyticsError> {
    let observations = table.series(indicator_name);
    let trend = fit_observations(indicator_name, &observations)?;

    let latest = observations
        .iter()
        .map(|&(year, _)| year)
        .max()
        .ok_or_else(|| AnalyticsError::InsufficientData(format!("no observations for '{indicator_name}'")))?;
    let predicted_year = latest + 1;

    let indicator_code = table
        .iter()
        .find(|r| r.indicator_name == indicator_name)
        .and_then(|r| r.indicator_code.clone());

    Ok(ForecastPoint {
        indicator_code,
        indicator_name: indicator_name.to_string(),
        predicted_year,
        predicted_value: round2(trend.predict(predicted_year)),
    })
}

/// Forecast every distinct indicator in `table`.
///
/// A failing indicator is recorded in `skipped` and never affects the others.
pub fn forecast_all(table: &Table) -> ForecastBatch {
    forecast_indicators(table, &table.indicator_names())
}

/// Forecast the named indicators against the history in `table`, keeping the
/// order of `names`.
pub fn forecast_indicators(table: &Table, names: &[String]) -> ForecastBatch {
    let results: Vec<(String, Result<ForecastPoint, AnalyticsError>)> = names
        .par_iter()
        .map(|name| (name.clone(), forecast_next(table, name)))
        .collect();

    let mut batch = ForecastBatch::default();
    for (name, result) in results {
        match result {
            Ok(point) => batch.points.push(point),
            Err(err) => {
                log::info!("skipping forecast for '{name}': {err}");
                batch.skipped.push((name, err));
            }
        }
    }
    batch
}

fn fit_observations(indicator_name: &str, observations: &[(i32, f64)]) -> Result<TrendLine, AnalyticsError> {
    let distinct: HashSet<(i32, u64)> = observations
        .iter()
        .map(|&(year, value)| (year, value.to_bits()))
        .collect();
    if distinct.len() < 2 {
        return Err(AnalyticsError::InsufficientData(format!(
            "'{indicator_name}' has {} distinct observation(s); a trend needs at least 2",
            distinct.len()
        )));
    }

    let years: Vec<f64> = observations.iter().map(|&(y, _)| f64::from(y)).collect();
    let values: Vec<f64> = observations.iter().map(|&(_, v)| v).collect();

    if variance(&years) == Some(0.0) {
        return Err(AnalyticsError::DegenerateInput(format!(
            "all observations of '{indicator_name}' share year {}",
            observations[0].0
        )));
    }

    let (slope, intercept) = fit_line(&years, &values).ok_or_else(|| {
        AnalyticsError::DegenerateInput(format!("least squares did not converge for '{indicator_name}'"))
    })?;
    log::debug!(
        "trend for '{indicator_name}': slope={slope:.6} intercept={intercept:.6} n={}",
        observations.len()
    );

    Ok(TrendLine {
        slope,
        intercept,
        n_obs: observations.len(),
    })
}
