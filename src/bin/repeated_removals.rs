use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use lib::config::RemovalConfig;
use lib::random::seeded;
use lib::uniformity::uniformity_test;
use lib::*;
use tracing::info;

#[derive(Debug, Parser)]
#[command(author, version, about = "Simulates E[K(n)] for the repeated-removal process")]
struct Opt {
    /// TOML file with the sweep settings; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, value_delimiter = ',')]
    sizes: Vec<u64>,
    #[arg(long)]
    samples: Option<u64>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    threads: Option<usize>,
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Run every trial on one generator instead of the thread pool.
    #[arg(long)]
    serial: bool,
}

impl Opt {
    fn into_config(self) -> Result<RemovalConfig> {
        let mut config = match &self.config {
            Some(path) => RemovalConfig::from_file(path)?,
            None => RemovalConfig::default(),
        };
        if !self.sizes.is_empty() {
            config.population_sizes = self.sizes;
        }
        if let Some(samples) = self.samples {
            config.samples = samples;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if self.threads.is_some() {
            config.threads = self.threads;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if self.serial {
            config.parallel = false;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> std::result::Result<(), Box<dyn Error>> {
    init_logging();
    let config = Opt::parse().into_config()?;

    if config.parallel {
        init_thread_pool(config.threads)?;
    }
    fs::create_dir_all(&config.output_dir)?;

    // one generator for the whole sweep in serial mode, like the post's module-level RNG
    let mut rng = seeded(config.seed);
    for &n in &config.population_sizes {
        let estimate = if config.parallel {
            estimate_parallel(n, config.samples, config.seed)?
        } else {
            estimate(n, config.samples, &mut rng)?
        };
        println!("{}", estimate.record());

        let report = uniformity_test(&estimate.samples, n)?;
        println!(
            "        chi2 = {:>9.3} on {:>3} dof, p = {:.4}",
            report.statistic, report.degrees_of_freedom, report.p_value
        );

        let path = config.output_dir.join(format!("{:03}.csv", n));
        estimate.write_csv(&path)?;
        info!(n, path = %path.display(), "wrote samples");
    }
    Ok(())
}
