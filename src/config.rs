//! TOML configuration for the experiment binaries.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ExperimentError, Result};
use crate::estimate::DEFAULT_SAMPLES;
use crate::recurrence::LinearRecurrence;

/// Seed the removal post was published with.
pub const DEFAULT_SEED: u64 = 430;

fn default_population_sizes() -> Vec<u64> {
    vec![5, 7, 31, 49, 99, 199, 499]
}

fn default_samples() -> u64 {
    DEFAULT_SAMPLES
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("_data")
}

fn default_parallel() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RemovalConfig {
    #[serde(default = "default_population_sizes")]
    pub population_sizes: Vec<u64>,
    #[serde(default = "default_samples")]
    pub samples: u64,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub threads: Option<usize>,
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for RemovalConfig {
    fn default() -> Self {
        RemovalConfig {
            population_sizes: default_population_sizes(),
            samples: default_samples(),
            seed: default_seed(),
            threads: None,
            parallel: default_parallel(),
            output_dir: default_output_dir(),
        }
    }
}

impl RemovalConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: RemovalConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        debug!(path = %path.as_ref().display(), "loading config");
        Self::from_toml(&fs::read_to_string(path)?)
    }

    /// Rejects anything that would fail partway through a sweep.
    pub fn validate(&self) -> Result<()> {
        if self.population_sizes.is_empty() {
            return Err(ExperimentError::invalid("no population sizes configured"));
        }
        if let Some(n) = self.population_sizes.iter().find(|&&n| n < 1) {
            return Err(ExperimentError::invalid(format!(
                "population size must be at least 1, got {}",
                n
            )));
        }
        if self.samples < 1 {
            return Err(ExperimentError::invalid("sample count must be at least 1"));
        }
        if self.threads == Some(0) {
            return Err(ExperimentError::invalid("thread count must be at least 1"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecurrenceConfig {
    pub beta_0: f64,
    pub beta_1: f64,
    pub d_1: f64,
    pub max_n: u32,
}

impl Default for RecurrenceConfig {
    fn default() -> Self {
        let LinearRecurrence {
            beta_0,
            beta_1,
            d_1,
        } = LinearRecurrence::default();
        RecurrenceConfig {
            beta_0,
            beta_1,
            d_1,
            max_n: 20,
        }
    }
}

impl RecurrenceConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: RecurrenceConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        debug!(path = %path.as_ref().display(), "loading recurrence config");
        Self::from_toml(&fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_n < 1 {
            return Err(ExperimentError::invalid("max_n must be at least 1"));
        }
        if let Some(value) = [self.beta_0, self.beta_1, self.d_1]
            .iter()
            .find(|value| !value.is_finite())
        {
            return Err(ExperimentError::invalid(format!(
                "recurrence coefficients must be finite, got {}",
                value
            )));
        }
        Ok(())
    }

    pub fn recurrence(&self) -> LinearRecurrence {
        LinearRecurrence::new(self.beta_0, self.beta_1, self.d_1)
    }
}
