//! Remap editing commands.

use crate::cli::common::{
    load_catalog, load_config, load_profile, print_json, save_profile, CliError, CliResult,
};
use crate::constants::DISABLED_SENTINEL;
use crate::models::RemapTarget;
use crate::services::ProfileService;
use crate::translate::NamespaceTranslator;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Edit a profile's remap entries
#[derive(Debug, Clone, Args)]
pub struct RemapArgs {
    /// Remap subcommand
    #[command(subcommand)]
    pub command: RemapCommand,
}

/// Remap subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum RemapCommand {
    /// List remap entries in authoring order
    List(ListRemapsArgs),
    /// Remap SOURCE to TARGET (use "Disabled" to make the key inert)
    Set(SetRemapArgs),
    /// Remove every remap entry for SOURCE
    Remove(RemoveRemapArgs),
}

/// List remap entries in authoring order
#[derive(Debug, Clone, Args)]
pub struct ListRemapsArgs {
    /// Profile JSON file
    #[arg(short, long, value_name = "FILE")]
    pub profile: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Remap SOURCE to TARGET
#[derive(Debug, Clone, Args)]
pub struct SetRemapArgs {
    /// Profile JSON file
    #[arg(short, long, value_name = "FILE")]
    pub profile: PathBuf,

    /// Physical key (canonical code or legacy identifier)
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// Output key, or "Disabled"
    #[arg(value_name = "TARGET")]
    pub target: String,
}

/// Remove every remap entry for SOURCE
#[derive(Debug, Clone, Args)]
pub struct RemoveRemapArgs {
    /// Profile JSON file
    #[arg(short, long, value_name = "FILE")]
    pub profile: PathBuf,

    /// Physical key (canonical code or legacy identifier)
    #[arg(value_name = "SOURCE")]
    pub source: String,
}

#[derive(Debug, Serialize)]
struct RemapItem {
    index: usize,
    source: String,
    target: String,
    source_display: String,
    target_display: String,
    effective: bool,
}

impl RemapArgs {
    /// Execute the remap command
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            RemapCommand::List(args) => args.execute(),
            RemapCommand::Set(args) => args.execute(),
            RemapCommand::Remove(args) => args.execute(),
        }
    }
}

impl ListRemapsArgs {
    /// Execute the list command
    pub fn execute(&self) -> CliResult<()> {
        let path = ProfileService::resolve_path(&self.profile, &load_config());
        let base = load_catalog()?;
        let (profile, catalog) = load_profile(&path, &base)?;

        let translator = NamespaceTranslator::new(&catalog);
        let index = profile.remap_index(&catalog);
        let items: Vec<RemapItem> = index
            .entries()
            .iter()
            .enumerate()
            .map(|(i, entry)| RemapItem {
                index: i,
                source: entry.source_key.clone(),
                target: entry.target_key.as_str().to_string(),
                source_display: translator.display_name(&entry.source_key),
                target_display: translator.display_name(entry.target_key.as_str()),
                effective: index.is_effective(i),
            })
            .collect();

        if self.json {
            print_json(&items)?;
        } else if items.is_empty() {
            println!("No remaps defined.");
        } else {
            for item in &items {
                let note = if item.effective { "" } else { "  (shadowed)" };
                println!(
                    "  {:>3}  {:<20} -> {}{note}",
                    item.index, item.source_display, item.target_display
                );
            }
        }
        Ok(())
    }
}

impl SetRemapArgs {
    /// Execute the set command
    pub fn execute(&self) -> CliResult<()> {
        let path = ProfileService::resolve_path(&self.profile, &load_config());
        let base = load_catalog()?;
        let (mut profile, catalog) = load_profile(&path, &base)?;

        let translator = NamespaceTranslator::new(&catalog);
        let source = translator.normalize(self.source.trim());
        if source == DISABLED_SENTINEL {
            return Err(CliError::validation("Cannot remap the Disabled sentinel"));
        }
        let target = RemapTarget::from(translator.normalize(self.target.trim()));

        profile.set_remap(&catalog, &source, target.clone());
        save_profile(&mut profile, &path, &base)?;

        println!(
            "{} -> {}",
            translator.display_name(&source),
            translator.display_name(target.as_str())
        );
        Ok(())
    }
}

impl RemoveRemapArgs {
    /// Execute the remove command
    pub fn execute(&self) -> CliResult<()> {
        let path = ProfileService::resolve_path(&self.profile, &load_config());
        let base = load_catalog()?;
        let (mut profile, catalog) = load_profile(&path, &base)?;

        let source = NamespaceTranslator::new(&catalog).normalize(self.source.trim());
        let removed = profile.remove_remap(&catalog, &source);
        if removed == 0 {
            return Err(CliError::validation(format!("No remap for '{source}'")));
        }
        save_profile(&mut profile, &path, &base)?;

        println!("Removed {removed} remap entries for {source}.");
        Ok(())
    }
}
