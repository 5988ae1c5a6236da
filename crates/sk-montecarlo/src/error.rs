use sk_core::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MonteCarloError {
    #[error("runner configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("all {total} replications failed (first failure: {first})")]
    AllReplicationsFailed { total: usize, first: String },

    #[error("no replications were run")]
    NoReplications,
}

pub type MonteCarloResult<T> = Result<T, MonteCarloError>;
