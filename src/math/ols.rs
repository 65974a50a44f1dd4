//! Least squares solver and straight-line fit.
//!
//! The forecaster fits `value = slope * year + intercept` per indicator.
//! Raw years (~2000) make the design matrix badly scaled, so the line is fit
//! against centered years and the intercept is shifted back afterwards.

use nalgebra::{DMatrix, DVector};

/// Least squares solution of `design * beta = target` via SVD.
///
/// The singular-value cutoff is relaxed step by step; `None` means no cutoff
/// produced a finite solution.
pub fn solve_least_squares(design: &DMatrix<f64>, target: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = design.clone().svd(true, true);
    [1e-10, 1e-8, 1e-6].into_iter().find_map(|eps| {
        svd.solve(target, eps)
            .ok()
            .filter(|beta| beta.iter().all(|v| v.is_finite()))
    })
}

/// Ordinary least squares line through `(x, y)` pairs.
///
/// Returns `(slope, intercept)`, or `None` when fewer than two points are given,
/// the lengths differ, or all `x` are equal.
pub fn fit_line(x: &[f64], y: &[f64]) -> Option<(f64, f64)> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let x_mean = super::mean(x)?;
    if super::variance(x)? == 0.0 {
        return None;
    }

    let n = x.len();
    let mut design = DMatrix::zeros(n, 2);
    for (i, &xi) in x.iter().enumerate() {
        design[(i, 0)] = 1.0;
        design[(i, 1)] = xi - x_mean;
    }
    let target = DVector::from_row_slice(y);

    let beta = solve_least_squares(&design, &target)?;
    let slope = beta[1];
    let intercept = beta[0] - slope * x_mean;
    Some((slope, intercept))
}
