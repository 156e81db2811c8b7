//! K(n) is uniform on `1..=n`; these check a sample set against that.

use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::error::{ExperimentError, Result};

/// Counts of each outcome; slot `k - 1` holds the number of samples equal to `k`.
pub fn histogram(samples: &[u64], n: u64) -> Result<Vec<u64>> {
    if n < 1 {
        return Err(ExperimentError::invalid("histogram needs n >= 1"));
    }
    let mut counts = vec![0u64; n as usize];
    for &k in samples {
        if k < 1 || k > n {
            return Err(ExperimentError::invalid(format!(
                "sample {} outside 1..={}",
                k, n
            )));
        }
        counts[(k - 1) as usize] += 1;
    }
    Ok(counts)
}

/// Fraction of samples at each outcome. The post overlays these on the line `1 / n`.
pub fn density(samples: &[u64], n: u64) -> Result<Vec<f64>> {
    let counts = histogram(samples, n)?;
    let total = samples.len().max(1) as f64;
    Ok(counts.into_iter().map(|c| c as f64 / total).collect())
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UniformityReport {
    pub statistic: f64,
    pub degrees_of_freedom: u64,
    pub p_value: f64,
}

/// Pearson chi-squared goodness of fit against the uniform distribution on `1..=n`.
pub fn uniformity_test(samples: &[u64], n: u64) -> Result<UniformityReport> {
    if samples.is_empty() {
        return Err(ExperimentError::invalid("uniformity test needs samples"));
    }
    let counts = histogram(samples, n)?;
    if n == 1 {
        return Ok(UniformityReport {
            statistic: 0.0,
            degrees_of_freedom: 0,
            p_value: 1.0,
        });
    }

    let expected = samples.len() as f64 / n as f64;
    let statistic: f64 = counts
        .iter()
        .map(|&c| {
            let d = c as f64 - expected;
            d * d / expected
        })
        .sum();
    let degrees_of_freedom = n - 1;
    let chi2 = ChiSquared::new(degrees_of_freedom as f64)?;
    let p_value = (1.0 - chi2.cdf(statistic)).clamp(0.0, 1.0);

    Ok(UniformityReport {
        statistic,
        degrees_of_freedom,
        p_value,
    })
}
