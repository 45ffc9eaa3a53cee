//! Custom key commands.

use crate::cli::common::{
    load_catalog, load_config, load_profile, print_json, save_profile, CliError, CliResult,
};
use crate::services::ProfileService;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Manage a profile's custom keys
#[derive(Debug, Clone, Args)]
pub struct CustomArgs {
    /// Custom key subcommand
    #[command(subcommand)]
    pub command: CustomCommand,
}

/// Custom key subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum CustomCommand {
    /// Mint a new custom key and save the profile
    Mint(MintArgs),
    /// List the profile's custom keys
    List(ListCustomArgs),
}

/// Mint a new custom key and save the profile
#[derive(Debug, Clone, Args)]
pub struct MintArgs {
    /// Profile JSON file
    #[arg(short, long, value_name = "FILE")]
    pub profile: PathBuf,

    /// Display label for the key (need not be unique)
    #[arg(short, long, value_name = "LABEL")]
    pub label: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// List the profile's custom keys
#[derive(Debug, Clone, Args)]
pub struct ListCustomArgs {
    /// Profile JSON file
    #[arg(short, long, value_name = "FILE")]
    pub profile: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct CustomKeyItem {
    code: String,
    legacy: String,
    label: String,
}

#[derive(Debug, Serialize)]
struct ListCustomResponse {
    keys: Vec<CustomKeyItem>,
    count: usize,
    next_index: u64,
}

impl CustomArgs {
    /// Execute the custom command
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            CustomCommand::Mint(args) => args.execute(),
            CustomCommand::List(args) => args.execute(),
        }
    }
}

impl MintArgs {
    /// Execute the mint command
    pub fn execute(&self) -> CliResult<()> {
        let path = ProfileService::resolve_path(&self.profile, &load_config());
        let base = load_catalog()?;
        let (mut profile, mut catalog) = load_profile(&path, &base)?;

        let key = profile.mint_custom_key(&mut catalog, &self.label);
        save_profile(&mut profile, &path, &base)?;

        let item = CustomKeyItem {
            legacy: key.legacy.clone().ok_or_else(|| {
                CliError::io(format!("Minted key '{}' has no legacy alias", key.code))
            })?,
            code: key.code,
            label: key.name,
        };

        if self.json {
            print_json(&item)?;
        } else {
            println!("Minted {} ({}) labelled '{}'.", item.code, item.legacy, item.label);
        }
        Ok(())
    }
}

impl ListCustomArgs {
    /// Execute the list command
    pub fn execute(&self) -> CliResult<()> {
        let path = ProfileService::resolve_path(&self.profile, &load_config());
        let base = load_catalog()?;
        let (profile, catalog) = load_profile(&path, &base)?;

        let keys: Vec<CustomKeyItem> = catalog
            .custom_keys()
            .iter()
            .map(|key| CustomKeyItem {
                code: key.code.clone(),
                legacy: key.legacy.clone().unwrap_or_default(),
                label: key.name.clone(),
            })
            .collect();

        let response = ListCustomResponse {
            count: keys.len(),
            keys,
            next_index: profile.next_custom_key_index,
        };

        if self.json {
            print_json(&response)?;
        } else if response.count == 0 {
            println!("No custom keys defined.");
        } else {
            println!("Custom keys ({}):", response.count);
            println!();
            for key in &response.keys {
                println!("  {:<28} {:<32} {}", key.code, key.legacy, key.label);
            }
        }
        Ok(())
    }
}
