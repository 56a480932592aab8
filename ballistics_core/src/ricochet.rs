//! Ricochet - Reflection with penetration and damage decay

use crate::config::BallisticsConstants;
use crate::events::ExpiryReason;
use crate::projectile::Projectile;
use glam::Vec2;
use tracing::warn;

/// Reflect `incoming` about `normal` and re-normalize
///
/// `reflected = incoming - 2 (incoming · n) n`. For unit inputs the result
/// is unit length; a degenerate result falls back to reversing `incoming`.
pub fn reflect(incoming: Vec2, normal: Vec2) -> Vec2 {
    let n = normal.normalize_or_zero();
    let reflected = incoming - 2.0 * incoming.dot(n) * n;
    let reflected = reflected.normalize_or_zero();
    if reflected == Vec2::ZERO {
        -incoming.normalize_or_zero()
    } else {
        reflected
    }
}

/// Normalize a contact normal so that it faces the incoming shell
///
/// Physics layers disagree on which side of a surface the normal points to.
/// A zero or non-finite normal is replaced by the reversed direction of travel.
pub fn orient_normal(incoming: Vec2, normal: Vec2) -> Vec2 {
    let n = if normal.is_finite() {
        normal.normalize_or_zero()
    } else {
        Vec2::ZERO
    };

    if n == Vec2::ZERO {
        warn!(?normal, "degenerate contact normal, bouncing straight back");
        return -incoming.normalize_or_zero();
    }

    if incoming.dot(n) > 0.0 {
        -n
    } else {
        n
    }
}

/// Outcome of a ricochet attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RicochetOutcome {
    /// Back in flight along the reflected direction
    Continue(Vec2),
    Expired(ExpiryReason),
}

/// Applies bounces to projectiles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RicochetSimulator {
    pub penetration_decay: f32,
    pub damage_decay: f32,
    pub min_penetration: f32,
    pub nudge_distance: f32,
}

impl Default for RicochetSimulator {
    fn default() -> Self {
        Self::from_constants(&BallisticsConstants::default())
    }
}

impl RicochetSimulator {
    pub fn from_constants(constants: &BallisticsConstants) -> Self {
        RicochetSimulator {
            penetration_decay: constants.ricochet.penetration_decay,
            damage_decay: constants.ricochet.damage_decay,
            min_penetration: constants.ricochet.min_penetration,
            nudge_distance: constants.ricochet.nudge_distance,
        }
    }

    /// Bounce `projectile` off a surface with the given (oriented) normal
    ///
    /// The bounce limit is checked before anything is mutated, so
    /// `bounce_count` never exceeds `max_bounces`. On `Continue` the
    /// projectile has its new direction, decayed stats, one more bounce and
    /// a position nudged off the surface. Speed is left untouched.
    pub fn simulate(&self, projectile: &mut Projectile, normal: Vec2) -> RicochetOutcome {
        if projectile.bounce_count >= projectile.max_bounces {
            return RicochetOutcome::Expired(ExpiryReason::BounceLimit);
        }

        let direction = reflect(projectile.direction, normal);
        projectile.direction = direction;
        projectile.penetration_power *= self.penetration_decay;
        projectile.damage *= self.damage_decay;
        projectile.bounce_count += 1;

        if projectile.penetration_power < self.min_penetration {
            return RicochetOutcome::Expired(ExpiryReason::Spent);
        }

        projectile.position += normal.normalize_or_zero() * self.nudge_distance;
        RicochetOutcome::Continue(direction)
    }
}
