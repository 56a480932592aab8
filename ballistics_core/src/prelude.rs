//! Prelude module for convenient imports
//!
//! ```rust
//! use ballistics_core::prelude::*;
//! ```

// Core types
pub use crate::types::{Contact, EntityId, ProjectileHandle};
pub use glam::Vec2;

// Armor
pub use crate::armor::{ArmorProfile, ArmorZone};

// Projectiles
pub use crate::projectile::{FireParams, ProjectileState, ProjectileSystem, ShellConfig, ShellRegistry};

// Targets
pub use crate::target::{Collider, EntityResolver, Hull, Roster, Target};

// Events
pub use crate::events::{BallisticsEvent, ExpiryReason};

// Config
pub use crate::config::BallisticsConstants;
pub use crate::error::BallisticsError;
