//! PenetrationOutcome - Result of a shell striking a target

use crate::armor::{ArmorZone, ZoneHit};
use crate::ricochet::RicochetOutcome;

/// What happened when a shell met a live target
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PenetrationOutcome {
    /// Armor defeated, damage applied, shell consumed
    Penetrated(HitReport),
    /// Armor held; the shell was handed to the ricochet simulator
    Deflected {
        zone_hit: ZoneHit,
        ricochet: RicochetOutcome,
    },
}

impl PenetrationOutcome {
    pub fn penetrated(&self) -> bool {
        matches!(self, PenetrationOutcome::Penetrated(_))
    }

    pub fn zone(&self) -> Option<ArmorZone> {
        match self {
            PenetrationOutcome::Penetrated(report) => report.zone,
            PenetrationOutcome::Deflected { zone_hit, .. } => Some(zone_hit.zone),
        }
    }
}

/// Details of a successful penetration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitReport {
    /// `None` when the target had no armor profile
    pub zone: Option<ArmorZone>,
    pub impact_angle: f32,
    pub effective_armor: f32,
    pub penetration_power: f32,
    /// Damage passed to `apply_damage`
    pub damage: f32,
    pub health_before: f32,
    pub health_after: f32,
    pub is_killing_blow: bool,
}

impl HitReport {
    /// Health actually removed (damage beyond remaining health is lost)
    pub fn damage_dealt(&self) -> f32 {
        (self.health_before - self.health_after).max(0.0)
    }

    /// Penetration power left over after defeating the armor
    pub fn overmatch(&self) -> f32 {
        self.penetration_power - self.effective_armor
    }
}
