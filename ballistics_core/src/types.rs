//! Identifiers and contact records shared across the crate

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a game entity (tank, wall, crate...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

/// Handle returned by `fire`, valid until the projectile terminates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectileHandle(pub u64);

impl fmt::Display for ProjectileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "projectile#{}", self.0)
    }
}

/// A contact reported by the physics layer for one projectile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Projectile the contact belongs to
    pub projectile: ProjectileHandle,
    /// The entity that was touched
    pub other: EntityId,
    /// World-space contact point
    pub point: Vec2,
    /// Surface normal at the contact point
    pub normal: Vec2,
}

impl Contact {
    pub fn new(projectile: ProjectileHandle, other: EntityId, point: Vec2, normal: Vec2) -> Self {
        Contact {
            projectile,
            other,
            point,
            normal,
        }
    }
}
