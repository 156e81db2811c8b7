pub mod config;
pub mod equicorrelation;
pub mod error;
pub mod estimate;
pub mod normal_cdf;
pub mod random;
pub mod recurrence;
pub mod removal;
pub mod table;
pub mod uniformity;

pub use error::{ExperimentError, Result};
pub use estimate::{estimate, estimate_parallel, theoretical_mean, Estimate, ExpectationRecord};
pub use recurrence::LinearRecurrence;
pub use removal::sample_k;
pub use table::Table;

use tracing_subscriber::EnvFilter;

/// Installs a stderr subscriber honoring `RUST_LOG`, `info` otherwise.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Sizes the global rayon pool, one thread per core unless told otherwise.
pub fn init_thread_pool(threads: Option<usize>) -> Result<usize> {
    let threads = threads.unwrap_or_else(num_cpus::get);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()?;
    tracing::debug!(threads, "thread pool ready");
    Ok(threads)
}
