//! Zone classification and effective armor
//!
//! Angles are in degrees. The classification angle is measured between the
//! hull's facing vector and the direction the shot came from (the reversed
//! incoming velocity): 0° is a shot straight into the front plate, 180° a
//! shot straight up the rear.

use super::{ArmorProfile, ArmorZone};
use glam::Vec2;

/// Unsigned angle between two vectors in degrees, in `[0, 180]`
///
/// A zero-length input yields 90°, the most conservative answer for the
/// callers in this crate.
pub fn angle_between(a: Vec2, b: Vec2) -> f32 {
    let a = a.normalize_or_zero();
    let b = b.normalize_or_zero();
    a.dot(b).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Classification angle for a shot travelling along `incoming` into a hull facing `facing`
pub fn impact_angle(facing: Vec2, incoming: Vec2) -> f32 {
    angle_between(facing, -incoming)
}

/// Map a classification angle to its armor zone
pub fn classify_zone(profile: &ArmorProfile, angle: f32) -> ArmorZone {
    if angle <= profile.front_zone_angle() {
        ArmorZone::Front
    } else if angle <= profile.side_zone_angle() {
        ArmorZone::Side
    } else {
        ArmorZone::Back
    }
}

/// Fold a classification angle onto the plate it strikes, in `[0, 90]`
///
/// Rear hits are measured against the rear plate, so 180° is a square hit.
pub fn obliquity(angle: f32) -> f32 {
    let angle = angle.clamp(0.0, 180.0);
    if angle > 90.0 {
        180.0 - angle
    } else {
        angle
    }
}

/// Armor after adjusting for impact obliquity
///
/// `base / cos(angle)`, with `|cos|` floored at `min_cos` so grazing hits
/// saturate at `base / min_cos` instead of diverging.
pub fn effective_armor(base_armor: f32, angle: f32, min_cos: f32) -> f32 {
    if base_armor <= 0.0 {
        return 0.0;
    }
    let cos = angle.to_radians().cos().abs().max(min_cos);
    base_armor / cos
}

/// Everything the penetration rule needs to know about where a shot landed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneHit {
    pub zone: ArmorZone,
    /// Classification angle, `[0, 180]`
    pub impact_angle: f32,
    /// Angle against the struck plate, `[0, 90]`
    pub obliquity: f32,
    pub base_armor: f32,
    pub effective_armor: f32,
}

/// Resolve the zone and effective armor for a shot
pub fn resolve_zone(profile: &ArmorProfile, facing: Vec2, incoming: Vec2, min_cos: f32) -> ZoneHit {
    let impact_angle = impact_angle(facing, incoming);
    let zone = classify_zone(profile, impact_angle);
    let base_armor = profile.base_armor(zone);

    ZoneHit {
        zone,
        impact_angle,
        obliquity: obliquity(impact_angle),
        base_armor,
        effective_armor: effective_armor(base_armor, impact_angle, min_cos),
    }
}
