use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::format::format_plain;
use crate::fuel::{DEFAULT_CONSUMPTION, DEFAULT_FUEL_PRICE, DEFAULT_GAUGE_MARKS, DEFAULT_TANK_SIZE};

/// Default location of the settings file.
pub const CONFIG_FILE: &str = "config.toml";

/// Initial text of the shared form fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormDefaults {
    pub fuel_price: String,
    pub consumption: String,
    pub tank_size: String,
    pub gauge_total_marks: String,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            fuel_price: format_plain(DEFAULT_FUEL_PRICE),
            consumption: format_plain(DEFAULT_CONSUMPTION),
            tank_size: format_plain(DEFAULT_TANK_SIZE),
            gauge_total_marks: format_plain(DEFAULT_GAUGE_MARKS),
        }
    }
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Language code or "auto"
    pub language: String,
    /// Directory with `<lang>.toml` language packs overriding the built-in ones
    pub language_pack_dir: Option<String>,
    /// Directory exported reports are written to
    pub export_dir: PathBuf,
    /// User font (.ttf/.otf) for the GUI
    pub font_path: Option<String>,
    pub window_alpha: f32,
    pub defaults: FormDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            language_pack_dir: None,
            export_dir: PathBuf::from("."),
            font_path: None,
            window_alpha: 1.0,
            defaults: FormDefaults::default(),
        }
    }
}

/// Errors while loading or saving the settings file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Loads config.toml, creating it with defaults when missing.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_from(Path::new(CONFIG_FILE))
}

/// Loads the settings at `path`, creating the file with defaults when missing.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        debug!("loaded config from {}", path.display());
        Ok(cfg)
    } else {
        let cfg = Config::default();
        save_to(&cfg, path)?;
        debug!("wrote default config to {}", path.display());
        Ok(cfg)
    }
}

fn save_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    /// Saves the settings to config.toml.
    pub fn save(&self) -> Result<(), ConfigError> {
        save_to(self, Path::new(CONFIG_FILE))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        save_to(self, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn saved_settings_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.language = "vi-vn".into();
        cfg.defaults.fuel_price = "23500".into();
        cfg.save_to(&path).unwrap();
        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded.language, "vi-vn");
        assert_eq!(loaded.defaults.fuel_price, "23500");
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "language = \"en-us\"\n").unwrap();
        let cfg = load_from(&path).unwrap();
        assert_eq!(cfg.language, "en-us");
        assert_eq!(cfg.defaults, FormDefaults::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "language = [").unwrap();
        assert!(matches!(load_from(&path), Err(ConfigError::Parse(_))));
    }
}
