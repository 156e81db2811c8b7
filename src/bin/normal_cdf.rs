use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use lib::normal_cdf::{grid, Comparison, Oracle, TermsTable};
use lib::*;
use tracing::info;

#[derive(Debug, Parser)]
#[command(author, version, about = "Normal CDF approximations against the reference")]
struct Opt {
    #[arg(long, default_value = "results")]
    output_dir: PathBuf,
    #[arg(long, default_value_t = 0.01)]
    step: f64,
    /// Error below which a Taylor term count counts as enough.
    #[arg(long, default_value_t = 0.00001)]
    tolerance: f64,
    #[arg(long, default_value_t = 30)]
    max_terms: usize,
}

fn main() -> std::result::Result<(), Box<dyn Error>> {
    init_logging();
    let opts = Opt::parse();
    fs::create_dir_all(&opts.output_dir)?;
    let oracle = Oracle::new()?;

    let xs = grid(-4.0, 4.0, opts.step)?;
    let comparison = Comparison::new(&xs, &oracle);
    println!(
        "{} points, max dynamic series error {:e}",
        xs.len(),
        comparison.max_dynamic_error()
    );
    let path = opts.output_dir.join("taylor_series_final.csv");
    comparison.write_csv(&path)?;
    info!(path = %path.display(), "wrote comparison");

    let terms = TermsTable::new(&xs, &oracle, opts.tolerance, opts.max_terms);
    let path = opts.output_dir.join("acceptable_n.csv");
    terms.write_csv(&path)?;
    info!(path = %path.display(), "wrote term counts");
    Ok(())
}
