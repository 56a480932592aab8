//! Simulation errors

use ballistics_core::config::ConfigError;
use ballistics_core::BallisticsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Ballistics(#[from] BallisticsError),
    #[error("volley at {at}s references unknown tank {id}")]
    UnknownTank { at: f32, id: u64 },
    #[error("volley at {at}s needs either `aim_at` or `direction`")]
    NoAim { at: f32 },
    #[error("tick rate must be at least 1 Hz")]
    ZeroTickRate,
}
