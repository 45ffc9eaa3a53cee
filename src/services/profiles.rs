//! Profile file I/O service.
//!
//! Profiles are stored as pretty-printed JSON, one file per profile.
//! Saving always recomputes the derived search craft fields first, and a
//! profile that fails validation is never written.

use anyhow::{Context, Result};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::catalog::KeyCatalog;
use crate::config::Config;
use crate::models::Profile;
use crate::validator::{ProfileValidator, ValidationReport};

/// Returned (inside `anyhow::Error`) when a profile fails validation on save.
#[derive(Debug, Clone)]
pub struct ProfileRejected {
    /// Full validation report
    pub report: ValidationReport,
}

impl fmt::Display for ProfileRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Profile not saved:\n{}",
            self.report.format_message().trim_end()
        )
    }
}

impl std::error::Error for ProfileRejected {}

/// Service for managing profile file I/O operations.
pub struct ProfileService;

impl ProfileService {
    /// Loads a profile from a JSON file.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    /// use keyscheme::services::ProfileService;
    ///
    /// let profile = ProfileService::load(Path::new("raid.json"))?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(path: &Path) -> Result<Profile> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read profile from {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse profile {}", path.display()))
    }

    /// Refreshes derived fields, validates and saves a profile.
    ///
    /// The refresh and validation run on a copy; `profile` is only updated
    /// once the file has been written, so a rejected or failed save leaves
    /// it exactly as it was. The write goes to a temp file that is then
    /// renamed over `path`, so an interrupted save never leaves a truncated
    /// profile behind.
    ///
    /// # Errors
    ///
    /// Fails with [`ProfileRejected`] if validation reports errors, or with
    /// an I/O error if the file cannot be written.
    pub fn save(profile: &mut Profile, path: &Path, base: &KeyCatalog) -> Result<ValidationReport> {
        let catalog = profile.catalog_snapshot(base)?;

        let mut candidate = profile.clone();
        if !candidate.search_craft_enabled {
            candidate.search_crafts.clear();
        }
        let failures = candidate.refresh_derived(&catalog);
        for failure in &failures {
            debug!(
                "Search #{} could not be refreshed: {}",
                failure.sequence, failure.error
            );
        }

        let report = ProfileValidator::new(&candidate, &catalog).validate();
        if !report.is_valid() || !failures.is_empty() {
            return Err(ProfileRejected { report }.into());
        }

        let json =
            serde_json::to_string_pretty(&candidate).context("Failed to serialize profile")?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create profile directory {}", parent.display())
                })?;
            }
        }

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, json + "\n")
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to save profile to {}", path.display()))?;

        *profile = candidate;
        Ok(report)
    }

    /// Resolves a profile argument.
    ///
    /// Paths that exist (or are absolute) are used as given; otherwise the
    /// name is looked up in the configured profiles directory, adding a
    /// `.json` extension when missing.
    #[must_use]
    pub fn resolve_path(arg: &Path, config: &Config) -> PathBuf {
        if arg.exists() || arg.is_absolute() {
            return arg.to_path_buf();
        }

        match &config.paths.profiles_dir {
            Some(dir) => {
                let mut candidate = dir.join(arg);
                if candidate.extension().is_none() {
                    candidate.set_extension("json");
                }
                candidate
            }
            None => arg.to_path_buf(),
        }
    }
}
