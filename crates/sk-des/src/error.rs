use sk_core::{ConfigError, SimTime};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("event scheduled at non-finite time")]
    NonFiniteTime,

    #[error("event at t={time} is earlier than the clock (t={now})")]
    EventInPast { time: SimTime, now: SimTime },
}

pub type SimResult<T> = Result<T, SimError>;
