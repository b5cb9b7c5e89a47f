//! Console configuration management.
//!
//! This module handles loading and saving the console configuration, which
//! holds the backend base URL and the last email used to log in.
//!
//! Configuration is stored at `~/.config/nuclearvet/config.json`. The base URL
//! can be overridden with the `NUCLEARVET_API_URL` environment variable.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Application name used for config/data directory paths
const APP_NAME: &str = "nuclearvet";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Durable storage file name in the data directory
const STORAGE_FILE: &str = "storage.json";

/// Environment variable selecting the backend base URL
pub const API_URL_ENV: &str = "NUCLEARVET_API_URL";

/// Local development backend
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub last_email: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            Ok(serde_json::from_str(&contents).context("Failed to parse config file")?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Backend base URL: environment first, then the config file, then the
    /// local development default.
    pub fn resolved_base_url(&self) -> String {
        Self::pick_base_url(
            std::env::var(API_URL_ENV).ok(),
            self.api_base_url.clone(),
        )
    }

    fn pick_base_url(from_env: Option<String>, from_file: Option<String>) -> String {
        from_env
            .filter(|v| !v.trim().is_empty())
            .or_else(|| from_file.filter(|v| !v.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    /// Location of the durable session storage file.
    pub fn storage_path(&self) -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME).join(STORAGE_FILE))
    }
}
