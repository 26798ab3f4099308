//! Configuration for tplot-rs
//!
//! Settings are read from a TOML file. Every field is optional and falls
//! back to its default, so an empty file is a valid configuration.
//!
//! # Location
//!
//! The default file lives in the platform configuration directory:
//! - **Linux**: `~/.config/tplot-rs/config.toml`
//! - **macOS**: `~/Library/Application Support/tplot-rs/config.toml`
//! - **Windows**: `%APPDATA%\tplot-rs\config.toml`
//!
//! # Example
//!
//! ```toml
//! legacy_extension = "tplot"
//! log_filter = "warn,tplot_rs=info"
//!
//! [interactive]
//! window_size = [800, 500]
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, TplotError};

/// Application identifier for the configuration directory
pub const APP_ID: &str = "tplot-rs";

/// Configuration filename
pub const CONFIG_FILE: &str = "config.toml";

/// Extension selecting the legacy (IDL SAVE) restore path
pub const DEFAULT_LEGACY_EXTENSION: &str = "tplot";

/// Extension given to snapshots written without one
pub const DEFAULT_SNAPSHOT_EXTENSION: &str = "pytplot";

/// Default tracing filter directive
pub const DEFAULT_LOG_FILTER: &str = "info,tplot_rs=debug";

/// Path of the default configuration file
pub fn config_path() -> Option<PathBuf> {
    dirs_next::config_dir().map(|p| p.join(APP_ID).join(CONFIG_FILE))
}

/// Settings for the interactive slice window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractiveConfig {
    /// Window size in pixels (width, height)
    pub window_size: [u32; 2],
    /// Window title
    pub title: String,
}

impl Default for InteractiveConfig {
    fn default() -> Self {
        Self {
            window_size: [1000, 600],
            title: "2D Interactive Plot".to_string(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TplotConfig {
    /// File extension (without dot) restored as a legacy save file
    pub legacy_extension: String,
    /// Extension appended by `convert` when the output has none
    pub snapshot_extension: String,
    /// Tracing filter used when `RUST_LOG` is unset
    pub log_filter: String,
    pub interactive: InteractiveConfig,
}

impl Default for TplotConfig {
    fn default() -> Self {
        Self {
            legacy_extension: DEFAULT_LEGACY_EXTENSION.to_string(),
            snapshot_extension: DEFAULT_SNAPSHOT_EXTENSION.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            interactive: InteractiveConfig::default(),
        }
    }
}

impl TplotConfig {
    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            TplotError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the default location, returning defaults on any error
    pub fn load_or_default() -> Self {
        let Some(path) = config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        Self::load(&path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save configuration to disk as TOML
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TplotError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| TplotError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content).map_err(|e| {
            TplotError::Config(format!("Failed to write config file {:?}: {}", path, e))
        })
    }

    fn validate(&self) -> Result<()> {
        for (key, ext) in [
            ("legacy_extension", &self.legacy_extension),
            ("snapshot_extension", &self.snapshot_extension),
        ] {
            if ext.is_empty() || ext.contains('.') {
                return Err(TplotError::Config(format!(
                    "{} must be a bare extension, got '{}'",
                    key, ext
                )));
            }
        }
        Ok(())
    }
}
