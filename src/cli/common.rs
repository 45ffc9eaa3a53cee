//! Shared CLI error and loading helpers.

use std::fmt;
use std::path::Path;

use crate::catalog::KeyCatalog;
use crate::config::Config;
use crate::models::Profile;
use crate::services::{ProfileRejected, ProfileService};
use crate::validator::ValidationReport;

/// Process exit codes used by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Input was understood but is invalid
    ValidationFailed = 1,
    /// A file could not be read, parsed or written
    IoError = 2,
}

impl ExitCode {
    /// Numeric code for `std::process::exit`.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Category of a CLI failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorKind {
    /// Maps to [`ExitCode::ValidationFailed`]
    Validation,
    /// Maps to [`ExitCode::IoError`]
    Io,
}

/// Error returned by command handlers.
#[derive(Debug, Clone)]
pub struct CliError {
    /// Failure category
    pub kind: CliErrorKind,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// I/O or load failure (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Io,
            message: message.into(),
        }
    }

    /// Validation failure (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Validation,
            message: message.into(),
        }
    }

    /// Exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self.kind {
            CliErrorKind::Validation => ExitCode::ValidationFailed,
            CliErrorKind::Io => ExitCode::IoError,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for command handlers.
pub type CliResult<T> = Result<T, CliError>;

/// Loads the config file, falling back to defaults if it is unreadable.
pub fn load_config() -> Config {
    Config::load().unwrap_or_default()
}

/// Loads the built-in key catalog.
pub fn load_catalog() -> CliResult<KeyCatalog> {
    KeyCatalog::load().map_err(|e| CliError::io(format!("Failed to load key catalog: {e:#}")))
}

/// Loads a profile and returns it with its catalog snapshot.
pub fn load_profile(path: &Path, base: &KeyCatalog) -> CliResult<(Profile, KeyCatalog)> {
    let profile = ProfileService::load(path)
        .map_err(|e| CliError::io(format!("Failed to load profile: {e:#}")))?;
    let catalog = profile
        .catalog_snapshot(base)
        .map_err(|e| CliError::io(format!("Invalid custom keys in profile: {e:#}")))?;
    Ok((profile, catalog))
}

/// Saves through [`ProfileService::save`], turning a rejected profile into a
/// validation failure.
pub fn save_profile(
    profile: &mut Profile,
    path: &Path,
    base: &KeyCatalog,
) -> CliResult<ValidationReport> {
    ProfileService::save(profile, path, base).map_err(|e| {
        if let Some(rejected) = e.downcast_ref::<ProfileRejected>() {
            CliError::validation(rejected.to_string())
        } else {
            CliError::io(format!("Failed to save profile: {e:#}"))
        }
    })
}

/// Serializes `value` as pretty JSON and prints it.
pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}
