//! Configuration for libranet.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variable (LIBRANET_FINE_RATE)
//! 2. Config file (.libranet/config.yaml)
//! 3. Defaults (fine rate 10 per day)
//!
//! Config file discovery:
//! - Searches current directory and parents for .libranet/config.yaml
//! - Falls back to ~/.libranet/config.yaml
//!
//! Library types never read configuration on their own; only the binary
//! resolves it and hands a [`LibraryConfig`] to the catalog.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable overriding the fine rate
pub const FINE_RATE_ENV: &str = "LIBRANET_FINE_RATE";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub fines: FinesConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FinesConfig {
    /// Fine charged per overdue day
    pub rate_per_day: Option<u64>,
}

/// Settings the catalog runs with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryConfig {
    /// Fine charged per overdue day, in whole currency units
    pub fine_rate_per_day: u64,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            fine_rate_per_day: default_fine_rate(),
        }
    }
}

fn default_fine_rate() -> u64 {
    10
}

/// Resolved configuration plus where it came from
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub library: LibraryConfig,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Find config file by searching current directory and parents, then home
fn find_config_file() -> Option<PathBuf> {
    if let Ok(mut current) = std::env::current_dir() {
        loop {
            let config_path = current.join(".libranet").join("config.yaml");
            if config_path.exists() {
                return Some(config_path);
            }

            if !current.pop() {
                break;
            }
        }
    }

    let home_config = dirs::home_dir()?.join(".libranet").join("config.yaml");
    home_config.exists().then_some(home_config)
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Combine file settings and an optional env override
fn resolve(file: Option<&ConfigFile>, env_rate: Option<&str>) -> Result<LibraryConfig> {
    let fine_rate_per_day = if let Some(raw) = env_rate {
        raw.trim().parse::<u64>().with_context(|| {
            format!("{} must be a non-negative integer, got '{}'", FINE_RATE_ENV, raw)
        })?
    } else {
        file.and_then(|f| f.fines.rate_per_day)
            .unwrap_or_else(default_fine_rate)
    };

    Ok(LibraryConfig { fine_rate_per_day })
}

/// Load configuration from all sources
pub fn load_config() -> Result<ResolvedConfig> {
    let config_file = find_config_file();

    let parsed = match config_file {
        Some(ref path) => Some(load_config_file(path)?),
        None => None,
    };

    let env_rate = std::env::var(FINE_RATE_ENV).ok();
    let library = resolve(parsed.as_ref(), env_rate.as_deref())?;

    if let Some(ref path) = config_file {
        tracing::debug!(path = %path.display(), "Loaded config file");
    }

    Ok(ResolvedConfig {
        library,
        config_file,
    })
}
