//! Shell types - named presets for `fire`

use crate::error::BallisticsError;
use crate::types::EntityId;
use super::FireParams;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration for a shell type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Unique identifier (e.g., "ap", "he", "bouncer")
    pub id: String,
    /// Display name
    pub name: String,
    /// Muzzle speed in world units per second
    pub speed: f32,
    pub damage: f32,
    pub penetration_power: f32,
    #[serde(default)]
    pub max_bounces: u32,
    /// Seconds before the shell expires
    #[serde(default = "default_lifetime")]
    pub lifetime: f32,
}

fn default_lifetime() -> f32 {
    5.0
}

impl ShellConfig {
    /// Fire parameters for this shell
    pub fn fire_params(&self, direction: Vec2, owner: EntityId) -> FireParams {
        FireParams {
            direction,
            speed: self.speed,
            damage: self.damage,
            penetration_power: self.penetration_power,
            owner,
            max_bounces: self.max_bounces,
            lifetime: self.lifetime,
        }
    }

    /// Same checks `fire` applies, with a placeholder direction
    pub fn validate(&self) -> Result<(), BallisticsError> {
        self.fire_params(Vec2::X, EntityId(0)).validate().map(|_| ())
    }

    /// Distance covered over the full lifetime, ignoring bounces
    pub fn range(&self) -> f32 {
        self.speed * self.lifetime
    }
}

/// Shell type registry
#[derive(Debug, Clone, Default)]
pub struct ShellRegistry {
    /// Mapping from shell ID to configuration
    configs: HashMap<String, ShellConfig>,
}

impl ShellRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        ShellRegistry {
            configs: HashMap::new(),
        }
    }

    /// Register a shell type, replacing any with the same id
    pub fn register(&mut self, config: ShellConfig) {
        self.configs.insert(config.id.clone(), config);
    }

    pub fn get(&self, id: &str) -> Option<&ShellConfig> {
        self.configs.get(id)
    }

    /// Like `get`, but an unknown id is an error
    pub fn require(&self, id: &str) -> Result<&ShellConfig, BallisticsError> {
        self.get(id)
            .ok_or_else(|| BallisticsError::UnknownShell(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Registered ids, sorted
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.configs.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Load default shell types
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        // Armor piercing - the general-purpose round
        registry.register(ShellConfig {
            id: "ap".to_string(),
            name: "Armor Piercing".to_string(),
            speed: 14.0,
            damage: 40.0,
            penetration_power: 60.0,
            max_bounces: 1,
            lifetime: 4.0,
        });

        // High explosive - heavy hit, poor penetration, never bounces
        registry.register(ShellConfig {
            id: "he".to_string(),
            name: "High Explosive".to_string(),
            speed: 10.0,
            damage: 70.0,
            penetration_power: 25.0,
            max_bounces: 0,
            lifetime: 4.0,
        });

        // Bouncer - light round built to ricochet around cover
        registry.register(ShellConfig {
            id: "bouncer".to_string(),
            name: "Bouncer".to_string(),
            speed: 9.0,
            damage: 25.0,
            penetration_power: 35.0,
            max_bounces: 4,
            lifetime: 6.0,
        });

        // Sabot - fast, deep penetration, low damage
        registry.register(ShellConfig {
            id: "sabot".to_string(),
            name: "Sabot".to_string(),
            speed: 22.0,
            damage: 30.0,
            penetration_power: 110.0,
            max_bounces: 0,
            lifetime: 2.5,
        });

        registry
    }
}
