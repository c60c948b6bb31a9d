//! Application configuration management.
//!
//! This module handles loading and saving the client configuration, which
//! covers the notes server URL and the last email used to sign in.
//!
//! Configuration is stored at `~/.config/jotter/config.json`. The server URL
//! resolves in order: `JOTTER_SERVER_URL` (a `.env` file is honored), the
//! config file, then the development default.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/data directory paths
const APP_NAME: &str = "jotter";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the server URL
const SERVER_URL_ENV: &str = "JOTTER_SERVER_URL";

/// Development default when nothing else is configured
const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub server_url: Option<String>,
    pub last_email: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load .env if present (silently ignore if not found)
        let _ = dotenvy::dotenv();

        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
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

    /// Resolve the notes server base URL.
    pub fn server_url(&self) -> String {
        if let Ok(url) = std::env::var(SERVER_URL_ENV) {
            if !url.trim().is_empty() {
                return url;
            }
        }
        self.server_url
            .clone()
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory holding the durable session snapshot.
    pub fn data_dir(&self) -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_url_default() {
        let config = Config::default();
        assert_eq!(config.server_url(), DEFAULT_SERVER_URL);
    }

    #[test]
    fn test_server_url_from_config_file_value() {
        let config = Config {
            server_url: Some("https://notes.example.com".to_string()),
            ..Config::default()
        };
        assert_eq!(config.server_url(), "https://notes.example.com");
    }

    #[test]
    fn test_config_roundtrip_json() {
        let config = Config {
            server_url: Some("https://notes.example.com".to_string()),
            last_email: Some("ada@example.com".to_string()),
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.server_url, config.server_url);
        assert_eq!(back.last_email, config.last_email);
    }
}
