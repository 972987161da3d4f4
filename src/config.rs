//! Configuration loading and management.
//!
//! Configuration is TOML with serde defaults for every field, so a missing
//! file (or an empty one) yields a fully usable default setup.

use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::path::Path;
use thiserror::Error;

/// Default config file path when no argument is given.
pub const DEFAULT_PATH: &str = "mdboard.toml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database settings.
    #[serde(default)]
    pub database: DatabaseConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (default: all interfaces).
    #[serde(default = "default_listen")]
    pub listen: String,
    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            port: default_port(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file (`:memory:` for ephemeral boards).
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path, or fall back to [`DEFAULT_PATH`] when it
    /// exists and built-in defaults when it does not.
    pub fn load_or_default(path: Option<&str>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None if Path::new(DEFAULT_PATH).exists() => Self::load(DEFAULT_PATH),
            None => Ok(Self::default()),
        }
    }

    /// Socket address the HTTP server binds to.
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.server.listen.parse().map_err(|_| {
            ConfigError::Invalid(format!(
                "server.listen is not an IP address: {}",
                self.server.listen
            ))
        })?;
        Ok(SocketAddr::new(ip, self.server.port))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "database.path must not be empty".to_string(),
            ));
        }
        self.listen_addr()?;
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    13478
}

fn default_db_path() -> String {
    "mdboard.db".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let config = Config::default();
        assert_eq!(config.server.port, 13478);
        assert_eq!(config.server.listen, "0.0.0.0");
        assert_eq!(config.database.path, "mdboard.db");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 13478);
    }

    #[test]
    fn partial_toml_overrides_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 8080

            [database]
            path = "/var/lib/mdboard/board.db"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.listen, "0.0.0.0");
        assert_eq!(config.database.path, "/var/lib/mdboard/board.db");
    }

    #[test]
    fn listen_addr_combines_ip_and_port() {
        let config = Config::default();
        let addr = config.listen_addr().unwrap();
        assert_eq!(addr.port(), 13478);
    }

    #[test]
    fn bad_listen_address_is_rejected() {
        let mut config = Config::default();
        config.server.listen = "not-an-ip".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn empty_db_path_is_rejected() {
        let mut config = Config::default();
        config.database.path = "  ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }
}
