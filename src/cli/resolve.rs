//! Remap resolution command.

use crate::cli::common::{load_catalog, load_config, load_profile, print_json, CliResult};
use crate::services::ProfileService;
use crate::translate::NamespaceTranslator;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Resolve a key through a profile's remaps
#[derive(Debug, Clone, Args)]
pub struct ResolveArgs {
    /// Profile JSON file (or name inside the configured profiles directory)
    #[arg(short, long, value_name = "FILE")]
    pub profile: PathBuf,

    /// Key to resolve (canonical code or legacy identifier)
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Find the physical key that produces KEY instead
    #[arg(long)]
    pub reverse: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ResolveResponse {
    input: String,
    key: String,
    direction: &'static str,
    /// Resolved code; absent when the key is disabled
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<String>,
    remapped: bool,
    disabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    display: Option<String>,
}

impl ResolveArgs {
    /// Execute the resolve command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config();
        let path = ProfileService::resolve_path(&self.profile, &config);
        let base = load_catalog()?;
        let (profile, catalog) = load_profile(&path, &base)?;

        let translator = NamespaceTranslator::new(&catalog);
        let index = profile.remap_index(&catalog);
        let key = translator.normalize(self.key.trim());

        let (direction, result) = if self.reverse {
            ("reverse", Some(index.reverse_source(&key).to_string()))
        } else {
            ("forward", index.effective_output(&key).map(str::to_string))
        };

        let response = ResolveResponse {
            input: self.key.clone(),
            remapped: result.as_deref() != Some(key.as_str()),
            disabled: result.is_none(),
            display: result.as_deref().map(|code| translator.display_name(code)),
            direction,
            result,
            key,
        };

        if self.json {
            print_json(&response)?;
        } else {
            let arrow = if self.reverse { "<-" } else { "->" };
            match (&response.result, &response.display) {
                (Some(code), Some(display)) => {
                    println!("{} {arrow} {code} ({display})", response.key);
                }
                _ => println!("{} {arrow} (disabled)", response.key),
            }
        }

        Ok(())
    }
}
