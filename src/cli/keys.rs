//! Key catalog browsing commands.

use crate::cli::common::{load_catalog, print_json, CliError, CliResult};
use crate::export::macro_token;
use crate::models::{KeyCategory, KeyIdentifier};
use clap::{Args, Subcommand};
use serde::Serialize;

/// Browse the key catalog
#[derive(Debug, Clone, Args)]
pub struct KeysArgs {
    /// Keys subcommand
    #[command(subcommand)]
    pub command: KeysCommand,
}

/// Key catalog subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum KeysCommand {
    /// Search keys by display name or code
    Search(SearchKeysArgs),
    /// Show one key by canonical code
    Show(ShowKeyArgs),
}

/// Search keys by display name or code
#[derive(Debug, Clone, Args)]
pub struct SearchKeysArgs {
    /// Case-insensitive search text (empty lists every key)
    #[arg(value_name = "QUERY", default_value = "")]
    pub query: String,

    /// Restrict results to a category (e.g. "letter", "mouse", "locale_specific")
    #[arg(short, long, value_name = "CATEGORY")]
    pub category: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Show one key by canonical code
#[derive(Debug, Clone, Args)]
pub struct ShowKeyArgs {
    /// Canonical code (e.g. "KeyA", "ShiftLeft", "Literal.å")
    #[arg(value_name = "CODE")]
    pub code: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// One key in command output.
#[derive(Debug, Serialize)]
struct KeyInfo {
    code: String,
    name: String,
    category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    legacy: Option<String>,
    #[serde(rename = "macro")]
    macro_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    row: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    col: Option<u8>,
}

impl From<&KeyIdentifier> for KeyInfo {
    fn from(key: &KeyIdentifier) -> Self {
        Self {
            code: key.code.clone(),
            name: key.name.clone(),
            category: key.category.id().to_string(),
            legacy: key.legacy.clone(),
            macro_token: macro_token(key),
            row: key.position.map(|p| p.row),
            col: key.position.map(|p| p.col),
        }
    }
}

#[derive(Debug, Serialize)]
struct SearchResponse {
    query: String,
    count: usize,
    keys: Vec<KeyInfo>,
}

impl KeysArgs {
    /// Execute the keys command
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            KeysCommand::Search(args) => args.execute(),
            KeysCommand::Show(args) => args.execute(),
        }
    }
}

impl SearchKeysArgs {
    /// Execute the search command
    pub fn execute(&self) -> CliResult<()> {
        let catalog = load_catalog()?;

        let results = match &self.category {
            Some(id) => {
                let category = KeyCategory::from_id(id).ok_or_else(|| {
                    let known: Vec<&str> = KeyCategory::ALL.iter().map(|c| c.id()).collect();
                    CliError::validation(format!(
                        "Unknown category '{id}'. Known categories: {}",
                        known.join(", ")
                    ))
                })?;
                catalog.search_in_category(&self.query, category)
            }
            None => catalog.search(&self.query),
        };

        let response = SearchResponse {
            query: self.query.clone(),
            count: results.len(),
            keys: results.into_iter().map(KeyInfo::from).collect(),
        };

        if self.json {
            print_json(&response)?;
        } else if response.count == 0 {
            println!("No keys match '{}'.", response.query);
        } else {
            println!("Keys ({}):", response.count);
            println!();
            for key in &response.keys {
                println!(
                    "  {:<16} {:<24} {:<16} {}",
                    key.code,
                    key.name,
                    key.category,
                    key.legacy.as_deref().unwrap_or("-")
                );
            }
        }

        Ok(())
    }
}

impl ShowKeyArgs {
    /// Execute the show command
    pub fn execute(&self) -> CliResult<()> {
        let catalog = load_catalog()?;

        let key = catalog
            .resolve(&self.code)
            .ok_or_else(|| CliError::validation(format!("Unknown key code '{}'", self.code)))?;
        let info = KeyInfo::from(&*key);

        if self.json {
            print_json(&info)?;
        } else {
            println!("Code:     {}", info.code);
            println!("Name:     {}", info.name);
            println!("Category: {}", info.category);
            println!("Legacy:   {}", info.legacy.as_deref().unwrap_or("-"));
            println!("Macro:    {}", info.macro_token);
            if let (Some(row), Some(col)) = (info.row, info.col) {
                println!("Position: row {row}, col {col}");
            }
        }

        Ok(())
    }
}
