//! Eigenvalues of the equicorrelation matrix Q(n, rho): ones on the diagonal and
//! `rho` everywhere else.

use std::collections::BTreeMap;

use nalgebra::{DMatrix, SymmetricEigen};
use ordered_float::OrderedFloat;
use tracing::debug;

use crate::error::{ExperimentError, Result};

pub fn equicorrelation(n: usize, rho: f64) -> Result<DMatrix<f64>> {
    if n < 1 {
        return Err(ExperimentError::invalid("need n >= 1"));
    }
    if !(-1.0..=1.0).contains(&rho) {
        return Err(ExperimentError::invalid(format!(
            "rho must lie in [-1, 1], got {}",
            rho
        )));
    }
    Ok(DMatrix::from_fn(n, n, |i, j| if i == j { 1.0 } else { rho }))
}

/// Eigenvalues of Q(n, rho) in ascending order.
pub fn eigenvalues(n: usize, rho: f64) -> Result<Vec<f64>> {
    let q = equicorrelation(n, rho)?;
    let eigen = SymmetricEigen::try_new(q, f64::EPSILON, 0).ok_or(ExperimentError::Eigen(n))?;
    let mut values: Vec<f64> = eigen.eigenvalues.iter().copied().collect();
    values.sort_by_key(|v| OrderedFloat(*v));
    Ok(values)
}

fn round_hundredths(v: f64) -> f64 {
    // + 0.0 folds -0.0 into 0.0 so both land in one bucket
    (v * 100.0).round() / 100.0 + 0.0
}

fn count_rounded(values: impl IntoIterator<Item = f64>) -> Vec<(f64, usize)> {
    let mut counts: BTreeMap<OrderedFloat<f64>, usize> = BTreeMap::new();
    for v in values {
        *counts.entry(OrderedFloat(round_hundredths(v))).or_default() += 1;
    }
    counts.into_iter().map(|(k, c)| (k.into_inner(), c)).collect()
}

/// Distinct eigenvalues, rounded to two decimals, with their multiplicities.
pub fn eigenvalue_counts(n: usize, rho: f64) -> Result<Vec<(f64, usize)>> {
    let counts = count_rounded(eigenvalues(n, rho)?);
    debug!(n, rho, distinct = counts.len(), "eigenvalues counted");
    Ok(counts)
}

/// `1 + (n - 1) rho` once and `1 - rho` with multiplicity `n - 1`, ascending.
pub fn closed_form_eigenvalues(n: usize, rho: f64) -> Result<Vec<f64>> {
    equicorrelation(n, rho)?;
    let mut values = vec![1.0 - rho; n - 1];
    values.push(1.0 + (n as f64 - 1.0) * rho);
    values.sort_by_key(|v| OrderedFloat(*v));
    Ok(values)
}

/// The closed-form eigenvalues bucketed the same way as [`eigenvalue_counts`].
pub fn closed_form_counts(n: usize, rho: f64) -> Result<Vec<(f64, usize)>> {
    Ok(count_rounded(closed_form_eigenvalues(n, rho)?))
}
