//! Ballistics tuning constants

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable ballistics constants
///
/// Every section and field falls back to the canonical value when omitted,
/// so a TOML file only needs to list what it overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallisticsConstants {
    pub armor: ArmorConstants,
    pub penetration: PenetrationConstants,
    pub ricochet: RicochetConstants,
    pub timing: TimingConstants,
}

impl BallisticsConstants {
    /// Load constants from a TOML file and validate them
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let constants: BallisticsConstants = super::load_toml(path)?;
        constants.validate()?;
        Ok(constants)
    }

    /// Parse constants from a TOML string and validate them
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let constants: BallisticsConstants = super::parse_toml(content)?;
        constants.validate()?;
        Ok(constants)
    }

    /// Reject values that would break the resolvers' invariants
    pub fn validate(&self) -> Result<(), ConfigError> {
        let min_cos = self.armor.min_cos;
        if !(min_cos > 0.0 && min_cos <= 1.0) {
            return Err(invalid(format!("armor.min_cos must be in (0, 1], got {min_cos}")));
        }

        check_angle("penetration.ricochet_threshold", self.penetration.ricochet_threshold, 180.0)?;
        check_angle("ricochet.wall_ricochet_threshold", self.ricochet.wall_ricochet_threshold, 90.0)?;

        check_factor("ricochet.penetration_decay", self.ricochet.penetration_decay)?;
        check_factor("ricochet.damage_decay", self.ricochet.damage_decay)?;

        if !(self.ricochet.min_penetration >= 0.0 && self.ricochet.min_penetration.is_finite()) {
            return Err(invalid(format!(
                "ricochet.min_penetration must be >= 0, got {}",
                self.ricochet.min_penetration
            )));
        }
        if !(self.ricochet.nudge_distance >= 0.0 && self.ricochet.nudge_distance.is_finite()) {
            return Err(invalid(format!(
                "ricochet.nudge_distance must be >= 0, got {}",
                self.ricochet.nudge_distance
            )));
        }
        if !(self.timing.lifetime_tolerance >= 0.0 && self.timing.lifetime_tolerance.is_finite()) {
            return Err(invalid(format!(
                "timing.lifetime_tolerance must be >= 0, got {}",
                self.timing.lifetime_tolerance
            )));
        }

        Ok(())
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::ValidationError(message)
}

fn check_angle(name: &str, value: f32, max: f32) -> Result<(), ConfigError> {
    if (0.0..=max).contains(&value) {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be within [0, {max}] degrees, got {value}")))
    }
}

fn check_factor(name: &str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be in (0, 1], got {value}")))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmorConstants {
    /// Floor applied to |cos(angle)| in `base / cos(angle)`
    #[serde(default = "default_min_cos")]
    pub min_cos: f32,
}

impl Default for ArmorConstants {
    fn default() -> Self {
        ArmorConstants {
            min_cos: default_min_cos(),
        }
    }
}

fn default_min_cos() -> f32 {
    0.05
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenetrationConstants {
    /// Obliquity (degrees) above which a hit on armor always ricochets
    #[serde(default = "default_ricochet_threshold")]
    pub ricochet_threshold: f32,
}

impl Default for PenetrationConstants {
    fn default() -> Self {
        PenetrationConstants {
            ricochet_threshold: default_ricochet_threshold(),
        }
    }
}

fn default_ricochet_threshold() -> f32 {
    70.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RicochetConstants {
    /// Multiplier applied to penetration power per ricochet
    #[serde(default = "default_penetration_decay")]
    pub penetration_decay: f32,
    /// Multiplier applied to damage per ricochet
    #[serde(default = "default_damage_decay")]
    pub damage_decay: f32,
    /// Below this penetration power a ricocheting shell is spent
    #[serde(default = "default_min_penetration")]
    pub min_penetration: f32,
    /// Distance a ricocheting shell is pushed off the surface
    #[serde(default = "default_nudge_distance")]
    pub nudge_distance: f32,
    /// Obstacle impact angle (degrees from the normal) below which shells bounce.
    /// At or above it they embed.
    #[serde(default = "default_wall_ricochet_threshold")]
    pub wall_ricochet_threshold: f32,
}

impl Default for RicochetConstants {
    fn default() -> Self {
        RicochetConstants {
            penetration_decay: default_penetration_decay(),
            damage_decay: default_damage_decay(),
            min_penetration: default_min_penetration(),
            nudge_distance: default_nudge_distance(),
            wall_ricochet_threshold: default_wall_ricochet_threshold(),
        }
    }
}

fn default_penetration_decay() -> f32 {
    0.8
}
fn default_damage_decay() -> f32 {
    0.7
}
fn default_min_penetration() -> f32 {
    1e-3
}
fn default_nudge_distance() -> f32 {
    0.05
}
fn default_wall_ricochet_threshold() -> f32 {
    80.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConstants {
    /// Slack (seconds) when comparing projectile age against its lifetime
    #[serde(default = "default_lifetime_tolerance")]
    pub lifetime_tolerance: f64,
}

impl Default for TimingConstants {
    fn default() -> Self {
        TimingConstants {
            lifetime_tolerance: default_lifetime_tolerance(),
        }
    }
}

fn default_lifetime_tolerance() -> f64 {
    1e-6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let constants = BallisticsConstants::default();
        assert!((constants.armor.min_cos - 0.05).abs() < f32::EPSILON);
        assert!((constants.ricochet.penetration_decay - 0.8).abs() < f32::EPSILON);
        assert!((constants.ricochet.damage_decay - 0.7).abs() < f32::EPSILON);
        assert!((constants.penetration.ricochet_threshold - 70.0).abs() < f32::EPSILON);
        assert!(constants.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_constants() {
        let toml = r#"
[penetration]
ricochet_threshold = 45.0

[ricochet]
damage_decay = 0.5
"#;

        let constants = BallisticsConstants::parse(toml).unwrap();
        assert!((constants.penetration.ricochet_threshold - 45.0).abs() < f32::EPSILON);
        assert!((constants.ricochet.damage_decay - 0.5).abs() < f32::EPSILON);
        // Untouched fields keep their defaults
        assert!((constants.ricochet.penetration_decay - 0.8).abs() < f32::EPSILON);
        assert!((constants.armor.min_cos - 0.05).abs() < f32::EPSILON);
    }

    #[test]
    fn test_empty_document_is_default() {
        let constants = BallisticsConstants::parse("").unwrap();
        assert_eq!(constants, BallisticsConstants::default());
    }

    #[test]
    fn test_rejects_zero_min_cos() {
        let err = BallisticsConstants::parse("[armor]\nmin_cos = 0.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_rejects_amplifying_decay() {
        let err = BallisticsConstants::parse("[ricochet]\npenetration_decay = 1.2\n").unwrap_err();
        assert!(err.to_string().contains("penetration_decay"));
    }

    #[test]
    fn test_rejects_wall_threshold_past_grazing() {
        let err =
            BallisticsConstants::parse("[ricochet]\nwall_ricochet_threshold = 95.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_parse_error_surfaces() {
        let err = BallisticsConstants::parse("[armor\nmin_cos = ").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
