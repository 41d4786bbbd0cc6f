//! Configuration loading
//!
//! Reads an optional TOML file from the data directory. A missing file
//! means defaults; a malformed file is a user error and is surfaced.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::debug;

/// Free-tier key accepted by the Financial Modeling Prep search endpoint
pub const DEMO_API_KEY: &str = "demo";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API key for the secondary quote source
    pub fmp_api_key: Option<String>,
    /// Override for where the holdings database lives
    pub data_dir: Option<PathBuf>,
}

impl Config {
    /// Load config from `<data dir>/config.toml`, falling back to defaults
    pub fn load() -> Result<Self> {
        let path = base_dir()?.join("config.toml");
        if !path.exists() {
            debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config at {:?}", path))?;
        toml::from_str(&raw).with_context(|| format!("Failed to parse config at {:?}", path))
    }

    pub fn fmp_api_key(&self) -> &str {
        self.fmp_api_key.as_deref().unwrap_or(DEMO_API_KEY)
    }

    /// Path of the holdings database, honoring the `data_dir` override
    pub fn db_path(&self) -> Result<PathBuf> {
        let dir = match &self.data_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create data directory {:?}", dir))?;
                dir.clone()
            }
            None => base_dir()?,
        };
        Ok(dir.join("holdings.db"))
    }
}

/// Get the data directory (`$DIVVY_HOME`, or `~/.divvy`)
pub fn base_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("DIVVY_HOME") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let home = std::env::var("HOME").context("HOME environment variable not set")?;
            PathBuf::from(home).join(".divvy")
        }
    };

    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create data directory {:?}", dir))?;

    Ok(dir)
}
