//! Projectiles - Data model, spawn parameters and the lifecycle system

mod lifecycle;
mod shell;

pub use lifecycle::ProjectileSystem;
pub use shell::{ShellConfig, ShellRegistry};

use crate::error::BallisticsError;
use crate::events::ExpiryReason;
use crate::types::{EntityId, ProjectileHandle};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a projectile
///
/// `Spawned → InFlight → Colliding → {InFlight | Penetrated | Expired}`,
/// plus `InFlight → Expired` on timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum ProjectileState {
    Spawned,
    InFlight,
    Colliding,
    Penetrated,
    Expired(ExpiryReason),
}

impl ProjectileState {
    pub fn is_terminal(self) -> bool {
        matches!(self, ProjectileState::Penetrated | ProjectileState::Expired(_))
    }
}

/// Arguments to `ProjectileSystem::fire`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FireParams {
    pub direction: Vec2,
    pub speed: f32,
    pub damage: f32,
    pub penetration_power: f32,
    pub owner: EntityId,
    pub max_bounces: u32,
    /// Seconds of flight before the projectile expires
    pub lifetime: f32,
}

impl FireParams {
    /// Check the parameters and return the normalized direction
    pub fn validate(&self) -> Result<Vec2, BallisticsError> {
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(BallisticsError::NonPositiveSpeed(self.speed));
        }
        if !(self.lifetime.is_finite() && self.lifetime > 0.0) {
            return Err(BallisticsError::NonPositiveLifetime(self.lifetime));
        }
        if !(self.damage.is_finite() && self.damage >= 0.0) {
            return Err(BallisticsError::NegativeDamage(self.damage));
        }
        if !(self.penetration_power.is_finite() && self.penetration_power >= 0.0) {
            return Err(BallisticsError::NegativePenetration(self.penetration_power));
        }

        let direction = self.direction.normalize_or_zero();
        if direction == Vec2::ZERO || !direction.is_finite() {
            return Err(BallisticsError::ZeroDirection);
        }
        Ok(direction)
    }
}

/// A live shell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub handle: ProjectileHandle,
    pub state: ProjectileState,
    pub position: Vec2,
    /// Unit vector
    pub direction: Vec2,
    pub speed: f32,
    pub damage: f32,
    pub penetration_power: f32,
    pub bounce_count: u32,
    pub max_bounces: u32,
    /// Simulation clock at fire time, seconds
    pub spawn_time: f64,
    pub lifetime: f32,
    pub owner: EntityId,
}

impl Projectile {
    /// Build a projectile in the `Spawned` state
    pub fn spawn(
        handle: ProjectileHandle,
        origin: Vec2,
        params: &FireParams,
        now: f64,
    ) -> Result<Self, BallisticsError> {
        let direction = params.validate()?;
        if !origin.is_finite() {
            return Err(BallisticsError::NonFiniteOrigin {
                x: origin.x,
                y: origin.y,
            });
        }

        Ok(Projectile {
            handle,
            state: ProjectileState::Spawned,
            position: origin,
            direction,
            speed: params.speed,
            damage: params.damage,
            penetration_power: params.penetration_power,
            bounce_count: 0,
            max_bounces: params.max_bounces,
            spawn_time: now,
            lifetime: params.lifetime,
            owner: params.owner,
        })
    }

    pub fn velocity(&self) -> Vec2 {
        self.direction * self.speed
    }

    /// Seconds since fire time
    pub fn age(&self, now: f64) -> f64 {
        now - self.spawn_time
    }

    pub fn is_live(&self) -> bool {
        !self.state.is_terminal()
    }

    /// Position after advancing `dt` seconds, without mutating
    pub fn predicted_position(&self, dt: f32) -> Vec2 {
        self.position + self.velocity() * dt
    }
}
