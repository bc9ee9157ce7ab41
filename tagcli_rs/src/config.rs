//! Configuration file support for tagcli.
//!
//! Loads optional `.tagcli/config.toml` from the working directory, or an
//! explicit file named by `TAGCLI_CONFIG`.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigurationError;
use crate::types::ColorMode;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "TAGCLI_CONFIG";

/// Environment variable overriding the configured color mode.
pub const COLOR_ENV: &str = "TAGCLI_COLOR";

/// Dispatcher configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Color mode for terminal output
    pub color: ColorMode,
    /// Reject values that would otherwise be coerced (`abc` as int, bad lists)
    pub strict: bool,
    /// Fallback log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
            strict: false,
            log_level: "warn".to_string(),
        }
    }
}

impl DispatchConfig {
    /// Load config from `.tagcli/config.toml` in the given root directory.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(".tagcli").join("config.toml");
        Self::load_from_path(&config_path)
    }

    /// Load config from a specific path, falling back to defaults.
    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match Self::load_required(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("[tagcli][warn] {}", e);
                Self::default()
            }
        }
    }

    /// Load config from a path the user asked for explicitly. Any failure is
    /// a configuration error.
    pub fn load_required(path: &Path) -> Result<Self, ConfigurationError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigurationError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigurationError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// `TAGCLI_CONFIG` if set, otherwise `.tagcli/config.toml` under `root`.
    pub fn discover(root: &Path) -> Result<Self, ConfigurationError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Self::load_required(Path::new(&path)),
            _ => Ok(Self::load(root)),
        }
    }

    /// Color mode after applying `TAGCLI_COLOR`, then `NO_COLOR`.
    pub fn color_mode(&self) -> ColorMode {
        let mode = std::env::var(COLOR_ENV)
            .ok()
            .and_then(|v| ColorMode::parse(&v))
            .unwrap_or(self.color);
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        if mode == ColorMode::Auto && no_color {
            ColorMode::Never
        } else {
            mode
        }
    }
}
