//! knave - rules core for a Knave-style adventure game
//!
//! Dice, saving throws, random tables and the death table, plus the
//! slot-and-backpack equipment model that limits what a character carries.

pub mod chargen;
pub mod combat;
pub mod equipment;
pub mod living;
pub mod objects;
pub mod rules;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use living::Lethality;

/// Prefix of environment variables that override configuration
pub const ENV_PREFIX: &str = "KNAVE_";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] figment::Error),
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(()),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Seed for the roll engine; random when unset
    pub seed: Option<u64>,
    /// Whether defeats may kill player characters
    pub allow_death: bool,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            allow_death: true,
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration: defaults, then the TOML file (if given), then
    /// `KNAVE_*` environment variables
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            figment = figment.merge(Toml::file(path));
        }

        Ok(figment.merge(Env::prefixed(ENV_PREFIX)).extract()?)
    }

    /// Lethality of defeats under this configuration
    pub fn lethality(&self) -> Lethality {
        Lethality::from_allow_death(self.allow_death)
    }
}
