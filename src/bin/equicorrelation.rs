use std::error::Error;

use clap::Parser;
use itertools::Itertools;
use lib::equicorrelation::{closed_form_counts, eigenvalue_counts};
use lib::*;

#[derive(Debug, Parser)]
#[command(author, version, about = "Eigenvalues of the equicorrelation matrix Q(n, rho)")]
struct Opt {
    #[arg(long, default_value_t = 10)]
    n: usize,
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true, default_value = "0.3")]
    rho: Vec<f64>,
}

fn main() -> std::result::Result<(), Box<dyn Error>> {
    init_logging();
    let opts = Opt::parse();

    let format = |counts: &[(f64, usize)]| {
        counts
            .iter()
            .map(|(value, count)| format!("{:.2} x{}", value, count))
            .join(", ")
    };
    for &rho in &opts.rho {
        let numeric = eigenvalue_counts(opts.n, rho)?;
        let closed = closed_form_counts(opts.n, rho)?;
        println!("n = {}, rho = {:>5.2}: {}", opts.n, rho, format(&numeric));
        if numeric != closed {
            println!("    closed form predicts {}", format(&closed));
        }
    }
    Ok(())
}
