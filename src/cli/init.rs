//! Profile creation command.

use crate::cli::common::{load_catalog, load_config, print_json, save_profile, CliError, CliResult};
use crate::models::Profile;
use crate::services::ProfileService;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Create an empty profile file
#[derive(Debug, Clone, Args)]
pub struct InitProfileArgs {
    /// Where to write the profile (or a name inside the configured profiles directory)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Profile name
    #[arg(short, long, value_name = "NAME")]
    pub name: String,

    /// Create the profile with search crafting disabled
    #[arg(long)]
    pub no_search_craft: bool,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct InitResponse {
    id: String,
    name: String,
    path: String,
}

impl InitProfileArgs {
    /// Execute the init-profile command
    pub fn execute(&self) -> CliResult<()> {
        let path = ProfileService::resolve_path(&self.file, &load_config());
        if path.exists() && !self.force {
            return Err(CliError::validation(format!(
                "File {} already exists (use --force to overwrite)",
                path.display()
            )));
        }

        let mut profile = Profile::new(self.name.trim())
            .map_err(|e| CliError::validation(format!("Invalid profile: {e}")))?;
        if self.no_search_craft {
            profile.set_search_craft_enabled(false);
        }

        let base = load_catalog()?;
        save_profile(&mut profile, &path, &base)?;

        let response = InitResponse {
            id: profile.id.clone(),
            name: profile.name.clone(),
            path: path.display().to_string(),
        };

        if self.json {
            print_json(&response)?;
        } else {
            println!("✓ Created profile '{}' at {}", response.name, response.path);
        }
        Ok(())
    }
}
