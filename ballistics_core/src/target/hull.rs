//! Hull - A tank body implementing `Target`

use super::Target;
use crate::armor::ArmorProfile;
use crate::error::BallisticsError;
use crate::types::EntityId;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A tank hull with health, facing and optional armor
///
/// Deserialization routes through [`Hull::new`], so facing is always a unit
/// vector and health stays within `[0, max_health]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HullSpec", into = "HullSpec")]
pub struct Hull {
    pub id: EntityId,
    pub armor: Option<ArmorProfile>,
    facing: Vec2,
    current_health: f32,
    max_health: f32,
}

impl Hull {
    /// Create a full-health hull. A zero facing vector defaults to +X.
    pub fn new(id: EntityId, max_health: f32, facing: Vec2) -> Self {
        let max_health = max_health.max(0.0);
        Hull {
            id,
            armor: None,
            facing: normalize_facing(facing),
            current_health: max_health,
            max_health,
        }
    }

    pub fn with_armor(mut self, armor: ArmorProfile) -> Self {
        self.armor = Some(armor);
        self
    }

    pub fn facing(&self) -> Vec2 {
        self.facing
    }

    /// Turn the hull. A zero vector leaves the facing unchanged.
    pub fn set_facing(&mut self, facing: Vec2) {
        let facing = facing.normalize_or_zero();
        if facing != Vec2::ZERO {
            self.facing = facing;
        }
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    /// Set current health, clamped to `[0, max_health]`
    pub fn set_health(&mut self, health: f32) {
        self.current_health = health.clamp(0.0, self.max_health);
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead()
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        self.current_health / self.max_health
    }
}

fn normalize_facing(facing: Vec2) -> Vec2 {
    let facing = facing.normalize_or_zero();
    if facing == Vec2::ZERO {
        Vec2::X
    } else {
        facing
    }
}

/// Unvalidated wire form of [`Hull`]
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HullSpec {
    id: EntityId,
    #[serde(default)]
    armor: Option<ArmorProfile>,
    facing: Vec2,
    max_health: f32,
    /// Full health when omitted
    #[serde(default)]
    current_health: Option<f32>,
}

impl TryFrom<HullSpec> for Hull {
    type Error = BallisticsError;

    fn try_from(spec: HullSpec) -> Result<Self, Self::Error> {
        if !spec.max_health.is_finite() || spec.max_health < 0.0 {
            return Err(BallisticsError::InvalidHealth(spec.max_health));
        }
        if !spec.facing.is_finite() {
            return Err(BallisticsError::ZeroDirection);
        }

        let mut hull = Hull::new(spec.id, spec.max_health, spec.facing);
        hull.armor = spec.armor;
        if let Some(current) = spec.current_health {
            if current.is_nan() {
                return Err(BallisticsError::InvalidHealth(current));
            }
            hull.set_health(current);
        }
        Ok(hull)
    }
}

impl From<Hull> for HullSpec {
    fn from(hull: Hull) -> Self {
        HullSpec {
            id: hull.id,
            armor: hull.armor,
            facing: hull.facing,
            max_health: hull.max_health,
            current_health: Some(hull.current_health),
        }
    }
}

impl Target for Hull {
    fn armor_profile(&self) -> Option<ArmorProfile> {
        self.armor
    }

    fn facing_direction(&self) -> Vec2 {
        self.facing
    }

    fn current_health(&self) -> f32 {
        self.current_health
    }

    fn apply_damage(&mut self, amount: f32) {
        if amount.is_nan() || amount <= 0.0 {
            return;
        }
        self.current_health = (self.current_health - amount).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_clamps_at_zero() {
        let mut hull = Hull::new(EntityId(1), 100.0, Vec2::X);
        hull.apply_damage(30.0);
        assert!((hull.current_health() - 70.0).abs() < f32::EPSILON);
        assert!(hull.is_alive());

        hull.apply_damage(500.0);
        assert_eq!(hull.current_health(), 0.0);
        assert!(hull.is_dead());
    }

    #[test]
    fn test_negative_damage_ignored() {
        let mut hull = Hull::new(EntityId(1), 100.0, Vec2::X);
        hull.apply_damage(-20.0);
        hull.apply_damage(f32::NAN);
        assert!((hull.current_health() - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_facing_normalized() {
        let mut hull = Hull::new(EntityId(1), 100.0, Vec2::new(0.0, 5.0));
        assert_eq!(hull.facing(), Vec2::Y);

        hull.set_facing(Vec2::ZERO);
        assert_eq!(hull.facing(), Vec2::Y);

        let default = Hull::new(EntityId(2), 100.0, Vec2::ZERO);
        assert_eq!(default.facing(), Vec2::X);
    }

    #[test]
    fn test_set_health_clamped() {
        let mut hull = Hull::new(EntityId(1), 100.0, Vec2::X);
        hull.set_health(250.0);
        assert!((hull.current_health() - 100.0).abs() < f32::EPSILON);
        hull.set_health(-3.0);
        assert_eq!(hull.health_fraction(), 0.0);
    }

    #[test]
    fn test_deserialize_clamps_health_and_facing() {
        let hull: Hull = serde_json::from_str(
            r#"{"id":7,"facing":[0.0,0.0],"current_health":500.0,"max_health":100.0}"#,
        )
        .unwrap();
        assert_eq!(hull.facing(), Vec2::X);
        assert!((hull.current_health() - 100.0).abs() < f32::EPSILON);
        assert!(hull.is_alive());

        let hull: Hull = serde_json::from_str(
            r#"{"id":8,"facing":[3.0,4.0],"current_health":-5.0,"max_health":100.0}"#,
        )
        .unwrap();
        assert!((hull.facing() - Vec2::new(0.6, 0.8)).length() < 1e-6);
        assert_eq!(hull.current_health(), 0.0);
        assert!(hull.is_dead());
    }

    #[test]
    fn test_deserialize_defaults_to_full_health() {
        let hull: Hull = toml::from_str(
            r#"
id = 3
facing = [0.0, 2.0]
max_health = 80.0
armor = { front_armor = 40.0, side_armor = 20.0, back_armor = 10.0 }
"#,
        )
        .unwrap();
        assert!((hull.current_health() - 80.0).abs() < f32::EPSILON);
        assert_eq!(hull.facing(), Vec2::Y);
        assert!(hull.armor.is_some());
    }

    #[test]
    fn test_deserialize_rejects_invalid_max_health() {
        let result = serde_json::from_str::<Hull>(
            r#"{"id":9,"facing":[1.0,0.0],"max_health":-10.0}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_round_trip_keeps_damage() {
        let mut hull = Hull::new(EntityId(4), 120.0, Vec2::Y);
        hull.apply_damage(45.0);
        let json = serde_json::to_string(&hull).unwrap();
        let back: Hull = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hull);
    }
}
