use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use lib::config::RecurrenceConfig;
use lib::*;

#[derive(Debug, Parser)]
#[command(author, version, about = "Compares D_n by recursion and by closed form")]
struct Opt {
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    beta_0: Option<f64>,
    #[arg(long)]
    beta_1: Option<f64>,
    #[arg(long)]
    d_1: Option<f64>,
    #[arg(long)]
    max_n: Option<u32>,
    /// Also write the rows to this csv file.
    #[arg(long)]
    csv: Option<PathBuf>,
}

fn main() -> std::result::Result<(), Box<dyn Error>> {
    init_logging();
    let opts = Opt::parse();
    let mut config = match &opts.config {
        Some(path) => RecurrenceConfig::from_file(path)?,
        None => RecurrenceConfig::default(),
    };
    config.beta_0 = opts.beta_0.unwrap_or(config.beta_0);
    config.beta_1 = opts.beta_1.unwrap_or(config.beta_1);
    config.d_1 = opts.d_1.unwrap_or(config.d_1);
    config.max_n = opts.max_n.unwrap_or(config.max_n);
    config.validate()?;

    let check = config.recurrence().cross_check(1..=config.max_n)?;
    for row in &check.rows {
        println!(
            "{:>3}: Diff = {:.1} ({} vs. {})",
            row.n, row.diff, row.recursive, row.closed_form
        );
    }
    if !check.all_agree(1e-9) {
        println!("closed form and recursion disagree beyond rounding");
    }

    if let Some(path) = opts.csv {
        check.write_csv(path)?;
    }
    Ok(())
}
