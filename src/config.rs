//! Server configuration.
//!
//! Values are layered, later sources winning:
//! 1. Built-in defaults
//! 2. `config.json` under `<config dir>/car-directory/`
//! 3. Environment variables prefixed with `CAR_DIRECTORY_`
//! 4. Command-line flags (applied by the binary)

use std::fs;
use std::path::{Path, PathBuf};

use dirs::config_dir;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const APP_NAME: &str = "car-directory";
const CONFIG_FILE: &str = "config.json";

const ENV_HOST: &str = "CAR_DIRECTORY_HOST";
const ENV_PORT: &str = "CAR_DIRECTORY_PORT";
const ENV_SEED: &str = "CAR_DIRECTORY_SEED";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub host: String,
    pub port: u16,
    /// Start with the sample cars instead of an empty directory.
    pub seed_sample_data: bool,
    /// Default tracing filter, used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            seed_sample_data: true,
            log_filter: "car_directory=debug,tower_http=debug".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load from the user's config directory and the process environment.
    pub fn load() -> Result<Self> {
        let mut config = match default_config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load from a specific file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!("failed to read {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&content)
            .map_err(|e| Error::config(format!("failed to parse {}: {}", path.display(), e)))
    }

    /// Override fields from environment variables, looked up through `var`.
    pub fn apply_env<F>(&mut self, var: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = var(ENV_HOST) {
            self.host = host;
        }

        if let Some(port) = var(ENV_PORT) {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| Error::config(format!("{} is not a valid port: {}", ENV_PORT, port)))?;
        }

        if let Some(seed) = var(ENV_SEED) {
            self.seed_sample_data = parse_bool(&seed).ok_or_else(|| {
                Error::config(format!("{} is not a boolean: {}", ENV_SEED, seed))
            })?;
        }

        Ok(())
    }

    /// Apply command-line flags, the highest-precedence layer.
    pub fn apply_overrides(&mut self, host: Option<String>, port: Option<u16>, empty: bool) {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        if empty {
            self.seed_sample_data = false;
        }
    }

    /// `host:port` for binding the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Location of the config file, if the platform has a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    let mut path = config_dir()?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Some(path)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = ServerConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "port": 8080, "seed_sample_data": false }"#).unwrap();

        let config = ServerConfig::load_from(&path).unwrap();
        assert_eq!(config.port, 8080);
        assert!(!config.seed_sample_data);
        assert_eq!(config.host, "127.0.0.1");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        let err = ServerConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("failed to parse"));
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config = ServerConfig {
            port: 8080,
            ..ServerConfig::default()
        };
        config
            .apply_env(env(&[
                ("CAR_DIRECTORY_HOST", "0.0.0.0"),
                ("CAR_DIRECTORY_PORT", "9090"),
                ("CAR_DIRECTORY_SEED", "off"),
            ]))
            .unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9090);
        assert!(!config.seed_sample_data);
    }

    #[test]
    fn unset_env_leaves_config_alone() {
        let mut config = ServerConfig::default();
        config.apply_env(env(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn invalid_env_port_is_an_error() {
        let mut config = ServerConfig::default();
        let err = config
            .apply_env(env(&[("CAR_DIRECTORY_PORT", "eighty")]))
            .unwrap_err();
        assert!(err.to_string().contains("CAR_DIRECTORY_PORT"));
    }

    #[test]
    fn invalid_env_seed_is_an_error() {
        let mut config = ServerConfig::default();
        assert!(config
            .apply_env(env(&[("CAR_DIRECTORY_SEED", "maybe")]))
            .is_err());
    }

    #[test]
    fn cli_flags_override_env_values() {
        let mut config = ServerConfig::default();
        config
            .apply_env(env(&[("CAR_DIRECTORY_HOST", "0.0.0.0"), ("CAR_DIRECTORY_PORT", "9090")]))
            .unwrap();

        config.apply_overrides(Some("localhost".to_string()), Some(4000), true);

        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 4000);
        assert!(!config.seed_sample_data);
    }

    #[test]
    fn absent_cli_flags_leave_config_alone() {
        let mut config = ServerConfig {
            port: 9090,
            seed_sample_data: true,
            ..ServerConfig::default()
        };

        config.apply_overrides(None, None, false);

        assert_eq!(config.port, 9090);
        assert!(config.seed_sample_data);
        assert_eq!(config.host, "127.0.0.1");
    }

    #[test]
    fn bind_addr_joins_host_and_port() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr(), "127.0.0.1:3000");
    }
}
