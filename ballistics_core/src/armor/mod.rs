//! Armor system - Directional armor zones and effective armor

mod zone;

pub use zone::{angle_between, classify_zone, effective_armor, impact_angle, obliquity, resolve_zone, ZoneHit};

use crate::error::BallisticsError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Angular region around a hull's facing vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmorZone {
    Front,
    Side,
    Back,
}

impl ArmorZone {
    pub fn all() -> &'static [ArmorZone] {
        &[ArmorZone::Front, ArmorZone::Side, ArmorZone::Back]
    }

    pub fn name(self) -> &'static str {
        match self {
            ArmorZone::Front => "front",
            ArmorZone::Side => "side",
            ArmorZone::Back => "back",
        }
    }
}

impl fmt::Display for ArmorZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Direction-dependent armor values for a hull
///
/// Zone angles are measured in degrees from the hull's facing vector:
/// `[0, front_zone_angle]` is the front plate, `(front_zone_angle,
/// side_zone_angle]` the sides and everything past that the rear.
///
/// A profile can only be obtained through [`ArmorProfile::new`] (or
/// deserialization, which routes through it), so the zone ordering and
/// non-negative armor always hold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ArmorProfileSpec", into = "ArmorProfileSpec")]
pub struct ArmorProfile {
    front_armor: f32,
    side_armor: f32,
    back_armor: f32,
    front_zone_angle: f32,
    side_zone_angle: f32,
}

impl ArmorProfile {
    pub const DEFAULT_FRONT_ZONE_ANGLE: f32 = 45.0;
    pub const DEFAULT_SIDE_ZONE_ANGLE: f32 = 135.0;

    pub fn new(
        front_armor: f32,
        side_armor: f32,
        back_armor: f32,
        front_zone_angle: f32,
        side_zone_angle: f32,
    ) -> Result<Self, BallisticsError> {
        check_armor("front", front_armor)?;
        check_armor("side", side_armor)?;
        check_armor("back", back_armor)?;

        let ordered = front_zone_angle >= 0.0
            && front_zone_angle < side_zone_angle
            && side_zone_angle <= 180.0;
        if !ordered {
            return Err(BallisticsError::InvalidArmorZones {
                front: front_zone_angle,
                side: side_zone_angle,
            });
        }

        Ok(ArmorProfile {
            front_armor,
            side_armor,
            back_armor,
            front_zone_angle,
            side_zone_angle,
        })
    }

    /// Profile using the default 45°/135° zone split
    pub fn with_default_zones(
        front_armor: f32,
        side_armor: f32,
        back_armor: f32,
    ) -> Result<Self, BallisticsError> {
        Self::new(
            front_armor,
            side_armor,
            back_armor,
            Self::DEFAULT_FRONT_ZONE_ANGLE,
            Self::DEFAULT_SIDE_ZONE_ANGLE,
        )
    }

    pub fn front_armor(&self) -> f32 {
        self.front_armor
    }

    pub fn side_armor(&self) -> f32 {
        self.side_armor
    }

    pub fn back_armor(&self) -> f32 {
        self.back_armor
    }

    pub fn front_zone_angle(&self) -> f32 {
        self.front_zone_angle
    }

    pub fn side_zone_angle(&self) -> f32 {
        self.side_zone_angle
    }

    /// Base armor of a zone
    pub fn base_armor(&self, zone: ArmorZone) -> f32 {
        match zone {
            ArmorZone::Front => self.front_armor,
            ArmorZone::Side => self.side_armor,
            ArmorZone::Back => self.back_armor,
        }
    }
}

fn check_armor(zone: &'static str, value: f32) -> Result<(), BallisticsError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(BallisticsError::NegativeArmor { zone, value })
    }
}

/// Unvalidated wire form of [`ArmorProfile`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ArmorProfileSpec {
    front_armor: f32,
    side_armor: f32,
    back_armor: f32,
    #[serde(default = "default_front_zone_angle")]
    front_zone_angle: f32,
    #[serde(default = "default_side_zone_angle")]
    side_zone_angle: f32,
}

fn default_front_zone_angle() -> f32 {
    ArmorProfile::DEFAULT_FRONT_ZONE_ANGLE
}

fn default_side_zone_angle() -> f32 {
    ArmorProfile::DEFAULT_SIDE_ZONE_ANGLE
}

impl TryFrom<ArmorProfileSpec> for ArmorProfile {
    type Error = BallisticsError;

    fn try_from(spec: ArmorProfileSpec) -> Result<Self, Self::Error> {
        ArmorProfile::new(
            spec.front_armor,
            spec.side_armor,
            spec.back_armor,
            spec.front_zone_angle,
            spec.side_zone_angle,
        )
    }
}

impl From<ArmorProfile> for ArmorProfileSpec {
    fn from(profile: ArmorProfile) -> Self {
        ArmorProfileSpec {
            front_armor: profile.front_armor,
            side_armor: profile.side_armor,
            back_armor: profile.back_armor,
            front_zone_angle: profile.front_zone_angle,
            side_zone_angle: profile.side_zone_angle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_profile() {
        let profile = ArmorProfile::new(50.0, 30.0, 15.0, 30.0, 120.0).unwrap();
        assert!((profile.base_armor(ArmorZone::Front) - 50.0).abs() < f32::EPSILON);
        assert!((profile.base_armor(ArmorZone::Side) - 30.0).abs() < f32::EPSILON);
        assert!((profile.base_armor(ArmorZone::Back) - 15.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_zone_order_and_names() {
        let names: Vec<&str> = ArmorZone::all().iter().map(|z| z.name()).collect();
        assert_eq!(names, vec!["front", "side", "back"]);
        assert_eq!(ArmorZone::Side.to_string(), "side");
    }

    #[test]
    fn test_rejects_non_monotonic_zones() {
        let err = ArmorProfile::new(50.0, 30.0, 15.0, 120.0, 30.0).unwrap_err();
        assert!(matches!(err, BallisticsError::InvalidArmorZones { .. }));

        // Equal angles leave no side zone at all
        assert!(ArmorProfile::new(50.0, 30.0, 15.0, 60.0, 60.0).is_err());
    }

    #[test]
    fn test_rejects_out_of_range_zones() {
        assert!(ArmorProfile::new(50.0, 30.0, 15.0, -5.0, 90.0).is_err());
        assert!(ArmorProfile::new(50.0, 30.0, 15.0, 45.0, 190.0).is_err());
        assert!(ArmorProfile::new(50.0, 30.0, 15.0, f32::NAN, 90.0).is_err());
    }

    #[test]
    fn test_rejects_negative_armor() {
        let err = ArmorProfile::with_default_zones(50.0, -1.0, 15.0).unwrap_err();
        assert!(matches!(err, BallisticsError::NegativeArmor { zone: "side", .. }));
        assert!(ArmorProfile::with_default_zones(f32::INFINITY, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_zero_front_angle_allowed() {
        assert!(ArmorProfile::new(0.0, 0.0, 0.0, 0.0, 180.0).is_ok());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: ArmorProfile = toml::from_str("front_armor = 50.0\nside_armor = 30.0\nback_armor = 10.0\n").unwrap();
        assert!((ok.front_zone_angle() - 45.0).abs() < f32::EPSILON);

        let bad = toml::from_str::<ArmorProfile>(
            "front_armor = 50.0\nside_armor = 30.0\nback_armor = 10.0\nfront_zone_angle = 100.0\nside_zone_angle = 90.0\n",
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_serialize_round_trip_keeps_values() {
        let profile = ArmorProfile::new(50.0, 30.0, 15.0, 30.0, 120.0).unwrap();
        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains("front_zone_angle"));
        let back: ArmorProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);
    }
}
