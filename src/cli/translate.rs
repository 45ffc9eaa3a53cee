//! Namespace translation command.

use crate::cli::common::{load_catalog, print_json, CliResult};
use crate::export::token_for_code;
use crate::translate::{LegacyOrigin, NamespaceTranslator};
use clap::{Args, ValueEnum};
use serde::Serialize;

/// Namespace to print with `--to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TranslateTarget {
    /// Canonical code (e.g. "ShiftLeft")
    Canonical,
    /// Legacy game identifier (e.g. "key.lshift")
    Legacy,
    /// Human display name (e.g. "Left Shift")
    Display,
    /// Macro tool token (e.g. "LShift")
    Macro,
}

/// Translate a key identifier between namespaces
#[derive(Debug, Clone, Args)]
pub struct TranslateArgs {
    /// Canonical code or legacy identifier
    #[arg(value_name = "ID")]
    pub id: String,

    /// Print only this namespace
    #[arg(long, value_enum, value_name = "NAMESPACE")]
    pub to: Option<TranslateTarget>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct TranslateResponse {
    input: String,
    /// How the input was interpreted: "canonical", "legacy", "custom" or "pass_through"
    source: &'static str,
    canonical: String,
    legacy: String,
    display: String,
    #[serde(rename = "macro")]
    macro_token: String,
}

impl TranslateResponse {
    fn field(&self, target: TranslateTarget) -> &str {
        match target {
            TranslateTarget::Canonical => &self.canonical,
            TranslateTarget::Legacy => &self.legacy,
            TranslateTarget::Display => &self.display,
            TranslateTarget::Macro => &self.macro_token,
        }
    }
}

impl TranslateArgs {
    /// Execute the translate command
    pub fn execute(&self) -> CliResult<()> {
        let catalog = load_catalog()?;
        let translator = NamespaceTranslator::new(&catalog);
        let input = self.id.trim();

        let (canonical, source) = if translator.is_canonical(input) {
            (input.to_string(), "canonical")
        } else {
            let resolution = translator.resolve_legacy(input);
            let source = match resolution.origin {
                LegacyOrigin::Catalog => "legacy",
                LegacyOrigin::DerivedCustom => "custom",
                LegacyOrigin::PassThrough => "pass_through",
            };
            (resolution.code, source)
        };

        let response = TranslateResponse {
            input: input.to_string(),
            source,
            legacy: translator.legacy_from_canonical(&canonical),
            display: translator.display_name(&canonical),
            macro_token: token_for_code(&canonical, &translator),
            canonical,
        };

        if self.json {
            print_json(&response)?;
        } else if let Some(target) = self.to {
            println!("{}", response.field(target));
        } else {
            println!("Canonical: {}", response.canonical);
            println!("Legacy:    {}", response.legacy);
            println!("Display:   {}", response.display);
            println!("Macro:     {}", response.macro_token);
            if response.source == "pass_through" {
                println!("Note:      unknown identifier, passed through unchanged");
            }
        }

        Ok(())
    }
}
