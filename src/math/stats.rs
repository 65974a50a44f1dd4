//! Sample statistics over plain `f64` slices.

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population variance (divides by `n`).
pub fn variance(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some(ss / values.len() as f64)
}

/// Pearson correlation of two equal-length series.
///
/// Returns `None` when the series are shorter than two points, have different
/// lengths, or either one is flat.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    // A flat column can still leave ~1e-17 residuals around a float mean.
    if is_constant(x) || is_constant(y) {
        return None;
    }
    let mean_x = mean(x)?;
    let mean_y = mean(y)?;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (xi, yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    // Rounding can push |r| a hair past 1.
    Some((cov / (var_x * var_y).sqrt()).clamp(-1.0, 1.0))
}

/// True when every value equals the first one.
pub fn is_constant(values: &[f64]) -> bool {
    values.split_first().is_some_and(|(first, rest)| rest.iter().all(|v| v == first))
}

/// Round to 2 decimals, ties away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
