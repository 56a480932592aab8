//! Target - The capability the entity layer exposes to the ballistics core

mod hull;
mod roster;

pub use hull::Hull;
pub use roster::Roster;

use crate::armor::ArmorProfile;
use crate::types::EntityId;
use glam::Vec2;

/// Anything a shell can damage
///
/// The core only reads armor and facing, and writes through `apply_damage`.
/// Serializing concurrent writes to the same target is the implementor's job.
pub trait Target {
    /// Directional armor, or `None` for a soft target
    fn armor_profile(&self) -> Option<ArmorProfile>;

    /// Unit vector the hull's front plate faces
    fn facing_direction(&self) -> Vec2;

    fn current_health(&self) -> f32;

    /// Subtract `amount` from health. Implementations clamp at zero.
    fn apply_damage(&mut self, amount: f32);

    fn is_dead(&self) -> bool {
        self.current_health() <= 0.0
    }
}

/// What a contact's entity id resolved to
pub enum Collider<'a> {
    Target(&'a mut dyn Target),
    /// Terrain, walls and other armorless, impenetrable geometry
    Obstacle,
}

/// Maps contact entity ids to colliders
pub trait EntityResolver {
    /// `None` for ids the entity layer does not know about
    fn resolve(&mut self, id: EntityId) -> Option<Collider<'_>>;
}
