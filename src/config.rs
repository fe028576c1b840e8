//! Runtime configuration
//!
//! Defaults come from [`crate::constants`], are overridden by an optional
//! `~/.wikiquiz/config.yaml`, and finally by `WIKIQUIZ_*` environment variables.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    CONFIG_DIR_NAME, DEFAULT_API_BASE_URL, DEFAULT_LOG_FILTER, DEFAULT_TIMEOUT_MS, REFERENCE_DOMAIN,
};

pub const ENV_BASE_URL: &str = "WIKIQUIZ_API_BASE_URL";
pub const ENV_TIMEOUT_MS: &str = "WIKIQUIZ_TIMEOUT_MS";
pub const ENV_LOG: &str = "WIKIQUIZ_LOG";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub timeout_ms: u64,
    pub reference_domain: String,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: String::from(DEFAULT_API_BASE_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            reference_domain: String::from(REFERENCE_DOMAIN),
            log_filter: String::from(DEFAULT_LOG_FILTER),
        }
    }
}

impl Config {
    /// Load from the default config directory, then apply env overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::from_file(&config_dir().join("config.yaml"))?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Read a YAML config file; a missing file yields the defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_yaml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = lookup(ENV_BASE_URL) {
            self.api_base_url = url;
        }
        if let Some(ms) = lookup(ENV_TIMEOUT_MS) {
            self.timeout_ms = ms
                .parse()
                .with_context(|| format!("{} must be a number of milliseconds", ENV_TIMEOUT_MS))?;
        }
        if let Some(filter) = lookup(ENV_LOG) {
            self.log_filter = filter;
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }
}

/// Directory holding the config file and log
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}
