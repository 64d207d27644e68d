use std::path::Path;
use std::sync::OnceLock;

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SatNetConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    /// TOML manifest listing the satellites to load
    #[serde(default = "default_fleet_path")]
    pub fleet_path: String,

    /// Drop deorbited satellites right after loading
    #[serde(default = "default_purge_deorbited")]
    pub purge_deorbited: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_fleet_path() -> String {
    "fleet.toml".to_string()
}

fn default_purge_deorbited() -> bool {
    true
}

impl Default for SatNetConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_dir: default_log_dir(),
            fleet_path: default_fleet_path(),
            purge_deorbited: default_purge_deorbited(),
        }
    }
}

impl SatNetConfig {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file {:?}", path))
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: SatNetConfig = toml::from_str(content)?;
        Ok(config)
    }
}

pub static CONFIG: OnceLock<SatNetConfig> = OnceLock::new();

/// Load the configuration into [`CONFIG`].
///
/// A missing file is not an error; the defaults are used instead. Returns
/// whether the file was found.
pub fn read_config(path: impl AsRef<Path>) -> anyhow::Result<bool> {
    let path = path.as_ref();
    let (config, found) = if path.exists() {
        (SatNetConfig::from_file(path)?, true)
    } else {
        (SatNetConfig::default(), false)
    };

    CONFIG
        .set(config)
        .map_err(|_| anyhow::anyhow!("Configuration already loaded"))?;

    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_file() {
        let config = SatNetConfig::from_toml_str("").unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_dir, "logs");
        assert_eq!(config.fleet_path, "fleet.toml");
        assert!(config.purge_deorbited);
    }

    #[test]
    fn test_partial_config() {
        let config = SatNetConfig::from_toml_str(
            r#"
            log_level = "debug"
            purge_deorbited = false
            "#,
        )
        .unwrap();
        assert_eq!(config.log_level, "debug");
        assert!(!config.purge_deorbited);
        assert_eq!(config.fleet_path, default_fleet_path());
    }

    #[test]
    fn test_bad_config_is_error() {
        assert!(SatNetConfig::from_toml_str("purge_deorbited = \"yes\"").is_err());
        assert!(SatNetConfig::from_file("does/not/exist.toml").is_err());
    }

    #[test]
    fn test_read_config_missing_file_uses_defaults() {
        let found = read_config("does/not/exist.toml").unwrap();
        assert!(!found);
        let config = CONFIG.get().unwrap();
        assert_eq!(config.log_level, "info");
    }
}
