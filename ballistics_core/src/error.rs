//! Construction-time errors
//!
//! Everything here is raised before a profile or projectile exists. The
//! per-tick path never returns these; it degrades to logged fallbacks.

use crate::config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BallisticsError {
    #[error("armor zone angles must satisfy 0 <= front ({front}) < side ({side}) <= 180")]
    InvalidArmorZones { front: f32, side: f32 },
    #[error("{zone} armor must be a finite value >= 0, got {value}")]
    NegativeArmor { zone: &'static str, value: f32 },
    #[error("projectile speed must be finite and > 0, got {0}")]
    NonPositiveSpeed(f32),
    #[error("projectile lifetime must be finite and > 0, got {0}")]
    NonPositiveLifetime(f32),
    #[error("projectile direction must be a finite, non-zero vector")]
    ZeroDirection,
    #[error("projectile origin must be finite, got ({x}, {y})")]
    NonFiniteOrigin { x: f32, y: f32 },
    #[error("projectile damage must be finite and >= 0, got {0}")]
    NegativeDamage(f32),
    #[error("penetration power must be finite and >= 0, got {0}")]
    NegativePenetration(f32),
    #[error("hull health must be finite and >= 0, got {0}")]
    InvalidHealth(f32),
    #[error("unknown shell type: {0}")]
    UnknownShell(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
