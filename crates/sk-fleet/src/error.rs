use sk_core::ConfigError;
use sk_des::SimError;
use sk_montecarlo::MonteCarloError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("invalid fleet configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("fleet simulation error: {0}")]
    Sim(#[from] SimError),

    #[error(transparent)]
    MonteCarlo(#[from] MonteCarloError),
}

pub type FleetResult<T> = Result<T, FleetError>;
