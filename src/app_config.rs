use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::language_utils::Locale;

/// Application configuration module
/// This module handles loading, validating and saving the settings of the
/// catnav binary, and derives the UI context handed to the navigation core.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Locale the UI is displayed in (ISO 639-1 or 639-3 code)
    #[serde(default, deserialize_with = "deserialize_locale")]
    pub default_locale: Locale,

    /// Color theme
    #[serde(default)]
    pub theme: Theme,

    /// Catalog JSON file; the embedded catalog is used when absent
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Color theme of the site
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Log level for the application
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

/// Session-wide UI settings, passed explicitly to the components that use them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiContext {
    pub locale: Locale,
    pub theme: Theme,
}

impl UiContext {
    pub fn new(locale: Locale, theme: Theme) -> Self {
        Self { locale, theme }
    }

    pub fn with_locale(self, locale: Locale) -> Self {
        Self { locale, ..self }
    }
}

fn deserialize_locale<'de, D>(deserializer: D) -> std::result::Result<Locale, D::Error>
where
    D: Deserializer<'de>,
{
    let code = String::deserialize(deserializer)?;
    Locale::from_code(&code).map_err(serde::de::Error::custom)
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .context(format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Write this configuration as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .context(format!("Failed to write config to file: {:?}", path))?;

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(catalog_path) = &self.catalog_path {
            if !catalog_path.is_file() {
                return Err(anyhow!("Catalog file does not exist: {:?}", catalog_path));
            }
        }

        Ok(())
    }

    pub fn ui_context(&self) -> UiContext {
        UiContext::new(self.default_locale, self.theme)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            default_locale: Locale::default(),
            theme: Theme::default(),
            catalog_path: None,
            log_level: LogLevel::default(),
        }
    }
}
