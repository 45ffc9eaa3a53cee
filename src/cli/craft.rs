//! Search craft commands: encode, decode, add and refresh.

use crate::cli::common::{
    load_catalog, load_config, load_profile, print_json, save_profile, CliError, CliResult,
};
use crate::search::SearchStringCodec;
use crate::services::ProfileService;
use crate::translate::NamespaceTranslator;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Encode and maintain search craft strings
#[derive(Debug, Clone, Args)]
pub struct CraftArgs {
    /// Craft subcommand
    #[command(subcommand)]
    pub command: CraftCommand,
}

/// Search craft subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum CraftCommand {
    /// Show the keys to press to type a search string
    Encode(EncodeArgs),
    /// Show the text a physical key sequence types
    Decode(DecodeArgs),
    /// Add a search craft entry and save the profile
    Add(AddCraftArgs),
    /// Recompute derived key sequences and save the profile
    Refresh(RefreshArgs),
}

/// Show the keys to press to type a search string
#[derive(Debug, Clone, Args)]
pub struct EncodeArgs {
    /// Profile JSON file
    #[arg(short, long, value_name = "FILE")]
    pub profile: PathBuf,

    /// Search string (at most 4 characters)
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Show the text a physical key sequence types
#[derive(Debug, Clone, Args)]
pub struct DecodeArgs {
    /// Profile JSON file
    #[arg(short, long, value_name = "FILE")]
    pub profile: PathBuf,

    /// Physical keys in press order (canonical codes or legacy identifiers)
    #[arg(value_name = "CODES", required = true, num_args = 1..)]
    pub codes: Vec<String>,
}

/// Add a search craft entry and save the profile
#[derive(Debug, Clone, Args)]
pub struct AddCraftArgs {
    /// Profile JSON file
    #[arg(short, long, value_name = "FILE")]
    pub profile: PathBuf,

    /// Search string (at most 4 characters)
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Content reference (repeatable, at most 3)
    #[arg(long = "item", value_name = "REF")]
    pub items: Vec<String>,
}

/// Recompute derived key sequences and save the profile
#[derive(Debug, Clone, Args)]
pub struct RefreshArgs {
    /// Profile JSON file
    #[arg(short, long, value_name = "FILE")]
    pub profile: PathBuf,
}

#[derive(Debug, Serialize)]
struct EncodeResponse {
    literal: String,
    intended: Vec<String>,
    physical: Vec<String>,
    physical_display: Vec<String>,
}

impl CraftArgs {
    /// Execute the craft command
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            CraftCommand::Encode(args) => args.execute(),
            CraftCommand::Decode(args) => args.execute(),
            CraftCommand::Add(args) => args.execute(),
            CraftCommand::Refresh(args) => args.execute(),
        }
    }
}

impl EncodeArgs {
    /// Execute the encode command
    pub fn execute(&self) -> CliResult<()> {
        let path = ProfileService::resolve_path(&self.profile, &load_config());
        let base = load_catalog()?;
        let (profile, catalog) = load_profile(&path, &base)?;

        let index = profile.remap_index(&catalog);
        let codec = SearchStringCodec::new(&catalog);
        let encoded = codec
            .encode(&self.text, &index)
            .map_err(|e| CliError::validation(e.to_string()))?;

        let response = EncodeResponse {
            literal: self.text.clone(),
            intended: encoded.intended_codes(),
            physical: encoded.physical_codes(),
            physical_display: encoded.physical.iter().map(|k| k.name.clone()).collect(),
        };

        if self.json {
            print_json(&response)?;
        } else {
            println!("Literal:  {}", response.literal);
            println!("Intended: {}", response.intended.join(" "));
            println!("Press:    {}", response.physical_display.join(", "));
        }

        Ok(())
    }
}

impl DecodeArgs {
    /// Execute the decode command
    pub fn execute(&self) -> CliResult<()> {
        let path = ProfileService::resolve_path(&self.profile, &load_config());
        let base = load_catalog()?;
        let (profile, catalog) = load_profile(&path, &base)?;

        let translator = NamespaceTranslator::new(&catalog);
        let index = profile.remap_index(&catalog);
        let codes: Vec<String> = self
            .codes
            .iter()
            .map(|code| translator.normalize(code.trim()))
            .collect();

        let literal = SearchStringCodec::new(&catalog)
            .decode_codes(&codes, &index)
            .map_err(|e| CliError::validation(e.to_string()))?;

        println!("{literal}");
        Ok(())
    }
}

impl AddCraftArgs {
    /// Execute the add command
    pub fn execute(&self) -> CliResult<()> {
        let path = ProfileService::resolve_path(&self.profile, &load_config());
        let base = load_catalog()?;
        let (mut profile, _) = load_profile(&path, &base)?;

        if !profile.search_craft_enabled {
            return Err(CliError::validation(format!(
                "Search crafting is disabled for profile '{}'",
                profile.name
            )));
        }

        let sequence = profile.add_search_craft(&self.text, self.items.clone());
        save_profile(&mut profile, &path, &base)?;

        println!("Search craft #{} '{}' added.", sequence, self.text);
        Ok(())
    }
}

impl RefreshArgs {
    /// Execute the refresh command
    pub fn execute(&self) -> CliResult<()> {
        let path = ProfileService::resolve_path(&self.profile, &load_config());
        let base = load_catalog()?;
        let (mut profile, _) = load_profile(&path, &base)?;

        let report = save_profile(&mut profile, &path, &base)?;

        println!(
            "Refreshed {} search craft entries in '{}'.",
            profile.search_crafts.len(),
            path.display()
        );
        if !report.warnings.is_empty() {
            print!("{}", report.format_message());
        }
        Ok(())
    }
}
