//! Export command for generating macro scripts.

use crate::cli::common::{load_catalog, load_config, load_profile, CliError, CliResult};
use crate::export::{script_file_name, MacroExportEmitter, ScriptOptions};
use crate::models::Profile;
use crate::services::ProfileService;
use clap::Args;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Export a profile's remaps as a macro script
#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Profile JSON file
    #[arg(short, long, value_name = "FILE")]
    pub profile: PathBuf,

    /// Export only these entry positions (comma-separated, 0-based)
    #[arg(short, long, value_name = "INDICES", value_delimiter = ',')]
    pub select: Vec<usize>,

    /// Write the script here instead of stdout (a directory gets [profile_name].ahk)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Omit the comment header
    #[arg(long)]
    pub no_header: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config();
        let path = ProfileService::resolve_path(&self.profile, &config);
        let base = load_catalog()?;
        let (profile, catalog) = load_profile(&path, &base)?;

        let emitter = MacroExportEmitter::new(&catalog)
            .with_disabled_directive(config.export.disabled_directive.trim());
        let selection: Option<BTreeSet<usize>> = if self.select.is_empty() {
            None
        } else {
            Some(self.select.iter().copied().collect())
        };
        let options = ScriptOptions {
            include_header: config.export.include_header && !self.no_header,
            ..ScriptOptions::default()
        };

        let script = emitter.emit_script(&profile, selection.as_ref(), &options);

        match &self.output {
            Some(output) => {
                let output_path = Self::get_output_path(output, &profile);
                fs::write(&output_path, &script)
                    .map_err(|e| CliError::io(format!("Failed to write output file: {e}")))?;
                println!("✓ Exported remaps to: {}", output_path.display());
            }
            None => print!("{script}"),
        }

        Ok(())
    }

    /// Resolves `--output`: directories receive the profile's default file name.
    fn get_output_path(output: &Path, profile: &Profile) -> PathBuf {
        if output.is_dir() {
            output.join(script_file_name(profile))
        } else {
            output.to_path_buf()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_output_path_directory() {
        let temp = TempDir::new().unwrap();
        let profile = Profile::new("My Test Profile").unwrap();
        let path = ExportArgs::get_output_path(temp.path(), &profile);
        assert_eq!(path, temp.path().join("my_test_profile.ahk"));
    }

    #[test]
    fn test_get_output_path_custom() {
        let custom_path = PathBuf::from("/tmp/does/not/exist/remaps.ahk");
        let profile = Profile::new("Test").unwrap();
        assert_eq!(
            ExportArgs::get_output_path(&custom_path, &profile),
            custom_path
        );
    }
}
