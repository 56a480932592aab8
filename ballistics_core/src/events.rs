//! Event records emitted by `ProjectileSystem::tick`
//!
//! Events are plain values. The system never keeps them after returning
//! them; renderers, audio and replication layers consume them as they see fit.

use crate::armor::ArmorZone;
use crate::types::{EntityId, ProjectileHandle};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// What a ricochet bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Surface {
    Target(EntityId),
    Obstacle(EntityId),
}

impl Surface {
    pub fn entity(self) -> EntityId {
        match self {
            Surface::Target(id) | Surface::Obstacle(id) => id,
        }
    }
}

/// Why a projectile left the simulation without a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryReason {
    /// Flight time reached the projectile's lifetime
    Lifetime,
    /// A collision arrived after `max_bounces` ricochets
    BounceLimit,
    /// Penetration power decayed below the usable minimum
    Spent,
    /// Struck an obstacle too obliquely to bounce
    Embedded,
}

impl ExpiryReason {
    pub fn describe(self) -> &'static str {
        match self {
            ExpiryReason::Lifetime => "lifetime elapsed",
            ExpiryReason::BounceLimit => "bounce limit reached",
            ExpiryReason::Spent => "penetration spent",
            ExpiryReason::Embedded => "embedded in obstacle",
        }
    }
}

/// A successful penetration. Always the last event for its projectile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitEvent {
    pub projectile: ProjectileHandle,
    pub owner: EntityId,
    pub target: EntityId,
    pub point: Vec2,
    /// Zone struck, `None` for an unarmored target
    pub zone: Option<ArmorZone>,
    /// Classification angle in degrees
    pub impact_angle: f32,
    pub effective_armor: f32,
    pub penetration_power: f32,
    /// Damage handed to the target's `apply_damage`
    pub damage: f32,
    /// Health the target actually lost
    pub damage_dealt: f32,
    pub is_killing_blow: bool,
    /// Simulation clock in seconds
    pub time: f64,
}

/// A bounce. The projectile stays live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RicochetEvent {
    pub projectile: ProjectileHandle,
    pub owner: EntityId,
    pub surface: Surface,
    pub point: Vec2,
    pub normal: Vec2,
    /// Direction after reflection
    pub direction: Vec2,
    pub bounce_count: u32,
    pub penetration_power: f32,
    pub damage: f32,
    pub time: f64,
}

/// A projectile left the simulation without penetrating anything
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpiredEvent {
    pub projectile: ProjectileHandle,
    pub owner: EntityId,
    pub position: Vec2,
    pub reason: ExpiryReason,
    pub bounce_count: u32,
    pub time: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BallisticsEvent {
    Hit(HitEvent),
    Ricochet(RicochetEvent),
    Expired(ExpiredEvent),
}

impl BallisticsEvent {
    pub fn projectile(&self) -> ProjectileHandle {
        match self {
            BallisticsEvent::Hit(e) => e.projectile,
            BallisticsEvent::Ricochet(e) => e.projectile,
            BallisticsEvent::Expired(e) => e.projectile,
        }
    }

    pub fn time(&self) -> f64 {
        match self {
            BallisticsEvent::Hit(e) => e.time,
            BallisticsEvent::Ricochet(e) => e.time,
            BallisticsEvent::Expired(e) => e.time,
        }
    }

    /// Whether this is the final event for its projectile
    pub fn is_terminal(&self) -> bool {
        !matches!(self, BallisticsEvent::Ricochet(_))
    }

    /// JSON form for replication and log shipping
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Get a one-line summary
    pub fn summary(&self) -> String {
        match self {
            BallisticsEvent::Hit(e) => {
                let zone = e.zone.map(ArmorZone::name).unwrap_or("unarmored");
                let mut line = format!(
                    "{} penetrated {} ({} zone, {:.0} vs {:.0} armor) for {:.0} damage",
                    e.projectile, e.target, zone, e.penetration_power, e.effective_armor, e.damage_dealt
                );
                if e.is_killing_blow {
                    line.push_str(", FATAL");
                }
                line
            }
            BallisticsEvent::Ricochet(e) => format!(
                "{} ricocheted off {} (bounce {}, pen {:.1}, dmg {:.1})",
                e.projectile,
                e.surface.entity(),
                e.bounce_count,
                e.penetration_power,
                e.damage
            ),
            BallisticsEvent::Expired(e) => {
                format!("{} expired: {}", e.projectile, e.reason.describe())
            }
        }
    }
}
