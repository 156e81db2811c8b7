//! Approximations of the standard normal CDF, compared against a reference.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

use statrs::distribution::{ContinuousCDF, Normal};
use statrs::function::erf;

use crate::error::{ExperimentError, Result};
use crate::table::Table;

/// Beyond this the dynamic series snaps to 0 or 1.
pub const SATURATION: f64 = 4.0;

/// Coefficients of the quadratic that predicts how many Taylor terms are needed.
const FIT_C: f64 = 0.68936564;
const FIT_B: f64 = 2.50832137;
const FIT_A: f64 = 0.93954765;

pub fn phi_erfc(x: f64) -> f64 {
    0.5 * erf::erfc(-FRAC_1_SQRT_2 * x)
}

/// Taylor series of Phi about 0, truncated after `terms` correction terms.
pub fn phi_taylor(x: f64, terms: usize) -> f64 {
    let mut term = x;
    let mut total = x;
    for k in 1..=terms {
        let k = k as f64;
        term *= -((k - 0.5) * x * x) / (2.0 * k * (k + 0.5));
        total += term;
    }
    0.5 + total / (2.0 * PI).sqrt()
}

pub fn fitted_terms(x: f64) -> usize {
    let z = x.abs();
    (FIT_C + z * (FIT_B + z * FIT_A)) as usize
}

/// Taylor series with the term count picked by [`fitted_terms`].
pub fn phi_dynamic_taylor(x: f64) -> f64 {
    if x >= SATURATION {
        return 1.0;
    }
    if x <= -SATURATION {
        return 0.0;
    }
    phi_taylor(x, fitted_terms(x))
}

/// Reference CDF the approximations are judged against.
pub struct Oracle {
    normal: Normal,
}

impl Oracle {
    pub fn new() -> Result<Self> {
        Ok(Oracle {
            normal: Normal::new(0.0, 1.0)?,
        })
    }

    pub fn cdf(&self, x: f64) -> f64 {
        self.normal.cdf(x)
    }

    /// Smallest term count whose series is within `tolerance` of the reference at `x`.
    pub fn min_terms_within(&self, x: f64, tolerance: f64, max_terms: usize) -> Option<usize> {
        let target = self.cdf(x);
        (0..=max_terms).find(|&terms| (phi_taylor(x, terms) - target).abs() < tolerance)
    }
}

/// Upper bound on the number of points `grid` will produce.
pub const MAX_GRID_POINTS: usize = 10_000_000;

/// Evenly spaced points `min, min + delta, ...` not exceeding `max`.
pub fn grid(min: f64, max: f64, delta: f64) -> Result<Vec<f64>> {
    let bad = || {
        ExperimentError::invalid(format!("bad grid [{}, {}] step {}", min, max, delta))
    };
    if !(min.is_finite() && max.is_finite() && delta > 0.0) || !(max >= min) {
        return Err(bad());
    }
    let steps = (max - min) / delta;
    if !(steps < MAX_GRID_POINTS as f64) {
        return Err(bad());
    }
    let count = (steps as usize).checked_add(1).ok_or_else(bad)?;
    Ok((0..count).map(|i| min + i as f64 * delta).collect())
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ComparisonRow {
    pub x: f64,
    pub erfc: f64,
    pub taylor_30: f64,
    pub dynamic: f64,
    pub oracle: f64,
}

pub struct Comparison {
    pub rows: Vec<ComparisonRow>,
}

impl Comparison {
    pub fn new(xs: &[f64], oracle: &Oracle) -> Self {
        let rows = xs
            .iter()
            .map(|&x| ComparisonRow {
                x,
                erfc: phi_erfc(x),
                taylor_30: phi_taylor(x, 30),
                dynamic: phi_dynamic_taylor(x),
                oracle: oracle.cdf(x),
            })
            .collect();
        Comparison { rows }
    }

    /// Largest absolute error of the dynamic series over the grid.
    pub fn max_dynamic_error(&self) -> f64 {
        self.rows
            .iter()
            .map(|r| (r.dynamic - r.oracle).abs())
            .fold(0.0, f64::max)
    }
}

impl Table for Comparison {
    fn header(&self) -> Vec<String> {
        ["x", "Erfc", "TS30", "DTS (Fitted)", "Oracle"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|r| {
                vec![
                    r.x.to_string(),
                    r.erfc.to_string(),
                    r.taylor_30.to_string(),
                    r.dynamic.to_string(),
                    r.oracle.to_string(),
                ]
            })
            .collect()
    }
}

/// For each x, the fewest terms that reach the tolerance and what the fit predicts.
pub struct TermsTable {
    pub rows: Vec<(f64, Option<usize>, usize)>,
}

impl TermsTable {
    pub fn new(xs: &[f64], oracle: &Oracle, tolerance: f64, max_terms: usize) -> Self {
        let rows = xs
            .iter()
            .map(|&x| (x, oracle.min_terms_within(x, tolerance, max_terms), fitted_terms(x)))
            .collect();
        TermsTable { rows }
    }
}

impl Table for TermsTable {
    fn header(&self) -> Vec<String> {
        vec!["x".into(), "Lookup".into(), "Fitted".into()]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|(x, lookup, fitted)| {
                vec![
                    x.to_string(),
                    lookup.map(|n| n.to_string()).unwrap_or_default(),
                    fitted.to_string(),
                ]
            })
            .collect()
    }
}
