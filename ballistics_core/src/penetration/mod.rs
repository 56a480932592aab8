//! Penetration resolution - Decide penetrate vs ricochet against a target

mod result;

pub use result::{HitReport, PenetrationOutcome};

use crate::armor::{impact_angle, resolve_zone, ArmorZone};
use crate::config::BallisticsConstants;
use crate::projectile::Projectile;
use crate::ricochet::RicochetSimulator;
use crate::target::Target;
use glam::Vec2;
use tracing::{debug, warn};

/// The penetration rule
///
/// A shell penetrates iff it strikes within `ricochet_threshold` degrees of
/// the plate normal and its penetration power meets the effective armor.
pub fn penetrates(
    penetration_power: f32,
    effective_armor: f32,
    impact_angle: f32,
    ricochet_threshold: f32,
) -> bool {
    impact_angle <= ricochet_threshold && penetration_power >= effective_armor
}

/// Resolves shell-vs-target contacts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenetrationResolver {
    /// Obliquity above which armor always deflects, degrees
    pub ricochet_threshold: f32,
    /// Floor for |cos| in the effective armor formula
    pub min_cos: f32,
}

impl Default for PenetrationResolver {
    fn default() -> Self {
        Self::from_constants(&BallisticsConstants::default())
    }
}

impl PenetrationResolver {
    pub fn from_constants(constants: &BallisticsConstants) -> Self {
        PenetrationResolver {
            ricochet_threshold: constants.penetration.ricochet_threshold,
            min_cos: constants.armor.min_cos,
        }
    }

    /// Resolve `projectile` striking a live `target`
    ///
    /// `normal` must already face the shell. The caller guarantees the target
    /// is alive; dead hulls are routed to the obstacle rule instead. On
    /// penetration the target takes the projectile's damage exactly once and
    /// the projectile is left for the caller to retire.
    pub fn resolve(
        &self,
        projectile: &mut Projectile,
        target: &mut dyn Target,
        normal: Vec2,
        ricochet: &RicochetSimulator,
    ) -> PenetrationOutcome {
        let Some(profile) = target.armor_profile() else {
            warn!(
                projectile = %projectile.handle,
                "target has no armor profile, treating it as unarmored"
            );
            let angle = impact_angle(target.facing_direction(), projectile.direction);
            let report = apply_hit(projectile, target, None, angle, 0.0);
            return PenetrationOutcome::Penetrated(report);
        };

        let zone_hit = resolve_zone(
            &profile,
            target.facing_direction(),
            projectile.direction,
            self.min_cos,
        );

        if penetrates(
            projectile.penetration_power,
            zone_hit.effective_armor,
            zone_hit.obliquity,
            self.ricochet_threshold,
        ) {
            let report = apply_hit(
                projectile,
                target,
                Some(zone_hit.zone),
                zone_hit.impact_angle,
                zone_hit.effective_armor,
            );
            return PenetrationOutcome::Penetrated(report);
        }

        debug!(
            projectile = %projectile.handle,
            zone = %zone_hit.zone,
            penetration = projectile.penetration_power,
            effective_armor = zone_hit.effective_armor,
            obliquity = zone_hit.obliquity,
            "armor held"
        );
        let outcome = ricochet.simulate(projectile, normal);
        PenetrationOutcome::Deflected {
            zone_hit,
            ricochet: outcome,
        }
    }
}

fn apply_hit(
    projectile: &Projectile,
    target: &mut dyn Target,
    zone: Option<ArmorZone>,
    impact_angle: f32,
    effective_armor: f32,
) -> HitReport {
    let health_before = target.current_health();
    target.apply_damage(projectile.damage);
    let health_after = target.current_health();

    HitReport {
        zone,
        impact_angle,
        effective_armor,
        penetration_power: projectile.penetration_power,
        damage: projectile.damage,
        health_before,
        health_after,
        is_killing_blow: target.is_dead(),
    }
}
