//! Monte Carlo estimate of E[K(n)] and its comparison with (n + 1) / 2.

use std::fmt;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{ExperimentError, Result};
use crate::random::{trial_rng, RandomSource};
use crate::removal::sample_k;
use crate::table::Table;

/// Sample count used by the posts when none is configured.
pub const DEFAULT_SAMPLES: u64 = 10_000;

pub fn theoretical_mean(n: u64) -> f64 {
    0.5 * (n as f64 + 1.0)
}

/// The outcome of one estimation run: every sample in trial order, plus the mean.
#[derive(Clone, Debug, PartialEq)]
pub struct Estimate {
    pub n: u64,
    pub samples: Vec<u64>,
    pub mean: f64,
}

/// One row of the tabular sample set.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SampleRow {
    pub index: u64,
    pub k: u64,
}

/// Theoretical and simulated expectation for a single population size.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct ExpectationRecord {
    pub n: u64,
    pub empirical_mean: f64,
    pub theoretical_mean: f64,
}

impl ExpectationRecord {
    pub fn error(&self) -> f64 {
        self.empirical_mean - self.theoretical_mean
    }
}

impl fmt::Display for ExpectationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n = {:>3}: Truth = {:>7.3} vs. Simulation = {:>7.3}",
            self.n, self.theoretical_mean, self.empirical_mean
        )
    }
}

impl Estimate {
    fn from_samples(n: u64, samples: Vec<u64>) -> Self {
        // integer sum, so the mean is exact up to the final division
        let total: u64 = samples.iter().sum();
        let mean = total as f64 / samples.len() as f64;
        Estimate { n, samples, mean }
    }

    pub fn theoretical_mean(&self) -> f64 {
        theoretical_mean(self.n)
    }

    pub fn record(&self) -> ExpectationRecord {
        ExpectationRecord {
            n: self.n,
            empirical_mean: self.mean,
            theoretical_mean: self.theoretical_mean(),
        }
    }

    pub fn sample_rows(&self) -> impl Iterator<Item = SampleRow> + '_ {
        self.samples
            .iter()
            .enumerate()
            .map(|(index, &k)| SampleRow {
                index: index as u64,
                k,
            })
    }
}

impl Table for Estimate {
    fn header(&self) -> Vec<String> {
        vec!["Index".into(), "K".into()]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.sample_rows()
            .map(|row| vec![row.index.to_string(), row.k.to_string()])
            .collect()
    }
}

fn validate(n: u64, samples: u64) -> Result<()> {
    if n < 1 {
        return Err(ExperimentError::invalid(format!(
            "population size must be at least 1, got {}",
            n
        )));
    }
    if samples < 1 {
        return Err(ExperimentError::invalid(format!(
            "sample count must be at least 1, got {}",
            samples
        )));
    }
    Ok(())
}

/// Runs the sampler `samples` times on a single caller-owned generator.
pub fn estimate<R: RandomSource + ?Sized>(n: u64, samples: u64, rng: &mut R) -> Result<Estimate> {
    validate(n, samples)?;
    debug!(n, samples, "estimating serially");
    let mut outcomes = Vec::with_capacity(samples as usize);
    for _ in 0..samples {
        outcomes.push(sample_k(n, rng)?);
    }
    let estimate = Estimate::from_samples(n, outcomes);
    info!(n, mean = estimate.mean, "estimate complete");
    Ok(estimate)
}

/// Runs the sampler `samples` times across the rayon pool.
///
/// Trial `i` draws from [`trial_rng`]`(seed, i)`, so the sample set is the same for
/// any number of threads.
pub fn estimate_parallel(n: u64, samples: u64, seed: u64) -> Result<Estimate> {
    validate(n, samples)?;
    debug!(n, samples, seed, "estimating in parallel");
    let outcomes = (0..samples)
        .into_par_iter()
        .map(|trial| sample_k(n, &mut trial_rng(seed, trial)))
        .collect::<Result<Vec<u64>>>()?;
    let estimate = Estimate::from_samples(n, outcomes);
    info!(n, mean = estimate.mean, "estimate complete");
    Ok(estimate)
}
