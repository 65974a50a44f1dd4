//! Pearson correlation between two aligned indicators.

use crate::domain::AlignedSeries;
use crate::error::AnalyticsError;
use crate::math::pearson;

/// Correlation of exactly two columns of `aligned`, over their shared years.
///
/// The result is in `[-1, 1]`. Fewer than two years, or a flat column, is
/// `InsufficientData`; any count of names other than two is `InvalidArity`.
pub fn correlate<S: AsRef<str>>(aligned: &AlignedSeries, names: &[S]) -> Result<f64, AnalyticsError> {
    let [a, b] = names else {
        return Err(AnalyticsError::InvalidArity(names.len()));
    };
    correlate_pair(aligned, a.as_ref(), b.as_ref())
}

/// Two-name form of [`correlate`].
pub fn correlate_pair(aligned: &AlignedSeries, name_a: &str, name_b: &str) -> Result<f64, AnalyticsError> {
    let xs = column(aligned, name_a)?;
    let ys = column(aligned, name_b)?;

    if xs.len() < 2 {
        return Err(AnalyticsError::InsufficientData(format!(
            "{} aligned year(s); correlation needs at least 2",
            xs.len()
        )));
    }

    pearson(&xs, &ys).ok_or_else(|| {
        AnalyticsError::InsufficientData(format!(
            "zero variance in '{name_a}' or '{name_b}' over the aligned years"
        ))
    })
}

fn column(aligned: &AlignedSeries, name: &str) -> Result<Vec<f64>, AnalyticsError> {
    aligned
        .column(name)
        .ok_or_else(|| AnalyticsError::UnknownIndicator(name.to_string()))
}
