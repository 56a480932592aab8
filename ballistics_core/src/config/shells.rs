//! Shell catalogue loading

use crate::projectile::{ShellConfig, ShellRegistry};
use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Container for shell configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellsConfig {
    #[serde(rename = "shells")]
    pub shells: Vec<ShellConfig>,
}

/// Load shell configurations from a TOML file
pub fn load_shell_configs(path: &Path) -> Result<ShellRegistry, ConfigError> {
    let config: ShellsConfig = super::load_toml(path)?;
    build_registry(config)
}

/// Load shell configurations from a TOML string
pub fn parse_shell_configs(content: &str) -> Result<ShellRegistry, ConfigError> {
    let config: ShellsConfig = super::parse_toml(content)?;
    build_registry(config)
}

fn build_registry(config: ShellsConfig) -> Result<ShellRegistry, ConfigError> {
    let mut registry = ShellRegistry::new();
    for shell in config.shells {
        shell
            .validate()
            .map_err(|e| ConfigError::ValidationError(format!("shell '{}': {e}", shell.id)))?;
        registry.register(shell);
    }
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shells() {
        let toml = r#"
[[shells]]
id = "ap"
name = "Armor Piercing"
speed = 14.0
damage = 40.0
penetration_power = 60.0
max_bounces = 1
lifetime = 4.0

[[shells]]
id = "bouncer"
name = "Bouncer"
speed = 9.0
damage = 15.0
penetration_power = 20.0
max_bounces = 4
lifetime = 6.0
"#;

        let registry = parse_shell_configs(toml).unwrap();
        assert!(registry.get("ap").is_some());
        assert!(registry.get("bouncer").is_some());

        let bouncer = registry.get("bouncer").unwrap();
        assert_eq!(bouncer.max_bounces, 4);
    }

    #[test]
    fn test_rejects_invalid_shell() {
        let toml = r#"
[[shells]]
id = "dud"
name = "Dud"
speed = 0.0
damage = 10.0
penetration_power = 10.0
max_bounces = 0
lifetime = 2.0
"#;

        let err = parse_shell_configs(toml).unwrap_err();
        assert!(err.to_string().contains("dud"));
    }
}
