use thiserror::Error;

/// Everything that can abort an experiment run.
///
/// Configuration problems surface as [`ExperimentError::InvalidArgument`] before
/// any sampling starts. Nothing here is retried.
#[derive(Debug, Error)]
pub enum ExperimentError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("randomness source failed: {0}")]
    Randomness(#[from] rand::Error),

    #[error("failed to parse config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("distribution error: {0}")]
    Stats(#[from] statrs::StatsError),

    #[error("could not build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("eigen-decomposition did not converge for a {0}x{0} matrix")]
    Eigen(usize),
}

impl ExperimentError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        ExperimentError::InvalidArgument(message.into())
    }
}

pub type Result<T> = std::result::Result<T, ExperimentError>;
