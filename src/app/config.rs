//! Configuration for the editor

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::term::WindowSize;

/// Editor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Read timeout in deciseconds (the redraw tick)
    pub read_timeout_ds: u8,
    /// Size assumed when the terminal cannot report one
    pub fallback_size: WindowSize,
    /// Lines scrolled per mouse wheel report
    pub scroll_step: usize,
    /// Enable mouse reporting
    pub mouse_reporting: bool,
    /// Colour pairs
    pub colors: ColorConfig,
    /// Write logs to this file
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            read_timeout_ds: 1,
            fallback_size: WindowSize::new(80, 25),
            scroll_step: 2,
            mouse_reporting: true,
            colors: ColorConfig::default(),
            log_file: None,
        }
    }
}

/// Colour pair configuration, as SGR parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    /// Highlighted text: selection, current line number, active tab
    pub highlight: String,
    /// Normal text
    pub normal: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            // Black on white
            highlight: "30;47".to_string(),
            // White on black
            normal: "37;40".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from `path`, or the default location, or fall
    /// back to the defaults
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let path = match path {
            Some(path) => Some(path.to_path_buf()),
            None => dirs_config_path().map(|dir| dir.join("config.json")),
        };

        if let Some(path) = path {
            if path.exists() {
                match Self::load(&path) {
                    Ok(config) => return config,
                    Err(e) => tracing::warn!(path = %path.display(), "ignoring config: {}", e),
                }
            }
        }
        Self::default()
    }
}

/// Get the configuration directory path
fn dirs_config_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config").join("mochi-edit"))
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.read_timeout_ds, 1);
        assert_eq!(config.fallback_size, WindowSize::new(80, 25));
        assert_eq!(config.scroll_step, 2);
        assert!(config.mouse_reporting);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"scroll_step": 5}"#).unwrap();
        assert_eq!(config.scroll_step, 5);
        assert_eq!(config.read_timeout_ds, 1);
        assert_eq!(config.colors, ColorConfig::default());
    }

    #[test]
    fn test_config_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.mouse_reporting = false;
        config.colors.highlight = "1;7".to_string();
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
        assert_eq!(Config::load_or_default(Some(&path)), config);
    }

    #[test]
    fn test_broken_config_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::Json(_))));
        assert_eq!(Config::load_or_default(Some(&path)), Config::default());
    }
}
