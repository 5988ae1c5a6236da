use sk_core::ConfigError;
use sk_des::SimError;
use sk_montecarlo::MonteCarloError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DepotError {
    #[error("invalid depot configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("depot simulation error: {0}")]
    Sim(#[from] SimError),

    #[error(transparent)]
    MonteCarlo(#[from] MonteCarloError),
}

pub type DepotResult<T> = Result<T, DepotError>;
