//! User configuration — a small TOML file plus CLI overrides.
//!
//! The config lives at `$XDG_CONFIG_HOME/ledrelay/config.toml` (falling
//! back to `~/.config/ledrelay/`) and is created with defaults on first
//! run. Every field has a default, so a partial file is fine; CLI flags
//! override individual fields on top.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::store::DEFAULT_FALLBACK_BRIGHTNESS;
use ledrelay_protocol::DEFAULT_PORT;

/// Relay configuration as loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// UDP port the `listen` daemon binds.
    pub port: u16,
    /// Brightness (0-255) applied when a datagram carries an unrecognized
    /// state token.
    pub fallback_brightness: u8,
    /// Default destination address for the `send` utility.
    pub destination: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            fallback_brightness: DEFAULT_FALLBACK_BRIGHTNESS,
            destination: format!("127.0.0.1:{DEFAULT_PORT}"),
        }
    }
}

/// Written on first run so the file documents itself.
const DEFAULT_CONFIG_TOML: &str = r#"# ledrelay configuration

# UDP port the listen daemon binds.
port = 8888

# Brightness (0-255) applied when a datagram carries a state token other
# than ON/OFF.
fallback_brightness = 100

# Default destination for `ledrelay send`.
destination = "127.0.0.1:8888"
"#;

impl Config {
    /// Parse from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| format!("parse TOML: {e}"))
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("read {}: {e}", path.display()))?;
        Self::from_toml(&content)
    }

    /// Load the config from the user config directory, creating the file
    /// with defaults if it doesn't exist.
    pub fn load_default() -> Result<Self, String> {
        let path = default_config_path();
        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| format!("create config dir: {e}"))?;
            }
            std::fs::write(&path, DEFAULT_CONFIG_TOML)
                .map_err(|e| format!("write default config: {e}"))?;
            eprintln!("Created default config: {}", path.display());
        }
        Self::load(&path)
    }
}

/// Path to the user config file.
pub fn default_config_path() -> PathBuf {
    dirs_path().join("config.toml")
}

fn dirs_path() -> PathBuf {
    if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
        PathBuf::from(config).join("ledrelay")
    } else if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".config/ledrelay")
    } else {
        PathBuf::from("/tmp/ledrelay")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.port, 8888);
        assert_eq!(config.fallback_brightness, 100);
    }

    #[test]
    fn test_partial_override() {
        let config = Config::from_toml("port = 9000\n").unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.fallback_brightness, 100);
        assert_eq!(config.destination, "127.0.0.1:8888");
    }

    #[test]
    fn test_default_file_matches_defaults() {
        // The self-documenting template must stay in sync with Default.
        let config = Config::from_toml(DEFAULT_CONFIG_TOML).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(Config::from_toml("port = \"not a number\"").is_err());
        assert!(Config::from_toml("port 9000").is_err());
    }
}
