//! ballistics_core - Armor and ricochet resolution for 2D tank projectiles
//!
//! This library provides:
//! - ArmorProfile / zone resolution: Front, Side and Back armor with obliquity
//! - PenetrationResolver: Penetrate-vs-ricochet decision and damage application
//! - RicochetSimulator: Reflection with penetration and damage decay
//! - ProjectileSystem: The projectile state machine driven by `tick`
//! - Events: Hit, ricochet and expiry records for presentation layers

pub mod armor;
pub mod config;
pub mod error;
pub mod events;
pub mod penetration;
pub mod prelude;
pub mod projectile;
pub mod ricochet;
pub mod target;
pub mod types;

// Re-export core types for convenience
pub use armor::{ArmorProfile, ArmorZone, ZoneHit};
pub use config::BallisticsConstants;
pub use error::BallisticsError;
pub use events::{BallisticsEvent, ExpiredEvent, ExpiryReason, HitEvent, RicochetEvent, Surface};
pub use penetration::{PenetrationOutcome, PenetrationResolver};
pub use projectile::{
    FireParams, Projectile, ProjectileState, ProjectileSystem, ShellConfig, ShellRegistry,
};
pub use ricochet::{RicochetOutcome, RicochetSimulator};
pub use target::{Collider, EntityResolver, Hull, Roster, Target};
pub use types::{Contact, EntityId, ProjectileHandle};

pub use glam::Vec2;
