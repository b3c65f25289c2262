//! Configuration for the companion server origin.
//!
//! Resolution order (highest wins): `--server` flag (applied by the CLI),
//! the `TETHER_SERVER` environment variable, the JSON config file under the
//! platform config directory, then the built-in default. Endpoint paths and
//! the heartbeat period are fixed constants and not configurable.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TetherError};

/// Default companion server origin.
pub const DEFAULT_SERVER: &str = "http://127.0.0.1:7878";

/// Environment variable overriding the config file.
pub const SERVER_ENV_VAR: &str = "TETHER_SERVER";

/// Tether configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Companion server origin, e.g. `http://127.0.0.1:7878`.
    pub server: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
        }
    }
}

impl Config {
    /// Configuration directory (`~/.config/tether` on Linux).
    pub fn dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tether")
    }

    /// Path to the config file.
    pub fn path() -> PathBuf {
        Self::dir().join("config.json")
    }

    /// Load configuration: environment variable, then config file, then
    /// the built-in default.
    pub fn load() -> Result<Self> {
        if let Ok(server) = std::env::var(SERVER_ENV_VAR) {
            let server = server.trim();
            if !server.is_empty() {
                return Ok(Self {
                    server: server.to_string(),
                });
            }
        }

        let path = Self::path();
        if path.exists() {
            return Self::load_from(&path);
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            TetherError::Config(format!("invalid config file {}: {}", path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_server() {
        let config = Config::default();
        assert_eq!(config.server, DEFAULT_SERVER);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"server": "http://10.0.0.5:9000"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.server, "http://10.0.0.5:9000");
    }

    #[test]
    fn test_load_from_missing_fields_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{}").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.server, DEFAULT_SERVER);
    }

    #[test]
    fn test_load_from_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(TetherError::Config(_))));
    }

    #[test]
    fn test_load_from_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(TetherError::Io(_))));
    }

    #[test]
    fn test_env_override() {
        std::env::set_var(SERVER_ENV_VAR, "http://192.168.1.10:8080");
        let config = Config::load().unwrap();
        std::env::remove_var(SERVER_ENV_VAR);

        assert_eq!(config.server, "http://192.168.1.10:8080");
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config {
            server: "https://example.com".to_string(),
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
