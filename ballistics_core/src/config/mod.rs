//! Configuration loading from TOML files

mod constants;
mod shells;

pub use constants::{
    ArmorConstants, BallisticsConstants, PenetrationConstants, RicochetConstants, TimingConstants,
};
pub use shells::{load_shell_configs, parse_shell_configs, ShellsConfig};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading ballistics tuning or shell catalogues
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read ballistics config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed ballistics TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("invalid ballistics tuning: {0}")]
    ValidationError(String),
}

/// Read a TOML file from disk and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_toml(&content)
}

/// Deserialize an in-memory TOML document
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    Ok(toml::from_str(content)?)
}
