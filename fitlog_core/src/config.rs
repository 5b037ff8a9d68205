//! Configuration file support for fitlog.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/fitlog/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub ledger: LedgerConfig,
}

/// Data export configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            export_dir: default_export_dir(),
        }
    }
}

/// How the ledger groups entries when presenting them
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Bucketing {
    /// One list in insertion order, entries deletable by id
    Flat,
    /// Grouped by category
    Categorized,
    /// Grouped by day, then by category
    #[default]
    CategorizedByDate,
}

impl std::str::FromStr for Bucketing {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "flat" => Ok(Bucketing::Flat),
            "categorized" => Ok(Bucketing::Categorized),
            "categorized_by_date" | "by_date" => Ok(Bucketing::CategorizedByDate),
            other => Err(Error::Config(format!("Unknown bucketing mode: {}", other))),
        }
    }
}

/// Ledger behaviour switches
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Calorie-aware mode: entries need a profile and carry calories
    #[serde(default = "default_require_profile")]
    pub require_profile_for_calories: bool,

    #[serde(default)]
    pub bucketing: Bucketing,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            require_profile_for_calories: default_require_profile(),
            bucketing: Bucketing::default(),
        }
    }
}

impl LedgerConfig {
    /// Flat list variant: categories optional, no calories
    pub fn flat() -> Self {
        Self {
            require_profile_for_calories: false,
            bucketing: Bucketing::Flat,
        }
    }
}

// Default value functions
fn default_export_dir() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(std::env::temp_dir);
    base.join("fitlog")
}

fn default_require_profile() -> bool {
    true
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(std::env::temp_dir);
        base.join("fitlog").join("config.toml")
    }
}
