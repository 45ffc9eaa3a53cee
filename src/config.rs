//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

use crate::export::DEFAULT_DISABLED_DIRECTIVE;

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "KEYSCHEME_CONFIG_DIR";

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Directory searched for profiles given by bare name
    #[serde(default)]
    pub profiles_dir: Option<PathBuf>,
}

/// Macro script export settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Write a `;` comment header at the top of exported scripts
    #[serde(default = "default_include_header")]
    pub include_header: bool,
    /// Right-hand side emitted for disabled keys
    #[serde(default = "default_disabled_directive")]
    pub disabled_directive: String,
}

const fn default_include_header() -> bool {
    true
}

fn default_disabled_directive() -> String {
    DEFAULT_DISABLED_DIRECTIVE.to_string()
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            include_header: default_include_header(),
            disabled_directive: default_disabled_directive(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log level when `RUST_LOG` is unset ("error", "warn", "info", "debug", "trace", "off")
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/keyscheme/config.toml`
/// - macOS: `~/Library/Application Support/keyscheme/config.toml`
/// - Windows: `%APPDATA%\keyscheme\config.toml`
///
/// The directory can be overridden with `KEYSCHEME_CONFIG_DIR`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the config directory path.
    ///
    /// - Linux: `~/.config/keyscheme/`
    /// - macOS: `~/Library/Application Support/keyscheme/`
    /// - Windows: `%APPDATA%\keyscheme\`
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("keyscheme");

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        Self::from_toml(&content).context(format!(
            "Failed to load config file: {}",
            config_path.display()
        ))
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Invalid configuration TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        // Ensure config directory exists
        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        // Atomic rename
        fs::rename(&temp_path, &config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - `profiles_dir` is a directory when it exists
    /// - `disabled_directive` is a single non-empty line
    /// - `level` is a known log level
    pub fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.paths.profiles_dir {
            if dir.exists() && !dir.is_dir() {
                anyhow::bail!("Profiles path is not a directory: {}", dir.display());
            }
        }

        let directive = self.export.disabled_directive.trim();
        if directive.is_empty() || directive.contains('\n') {
            anyhow::bail!(
                "Disabled directive must be a single non-empty line (got {:?})",
                self.export.disabled_directive
            );
        }

        self.log_level()?;

        Ok(())
    }

    /// Parses the configured log level.
    pub fn log_level(&self) -> Result<LevelFilter> {
        self.logging
            .level
            .trim()
            .parse::<LevelFilter>()
            .map_err(|_| anyhow::anyhow!("Unknown log level '{}'", self.logging.level))
    }
}
