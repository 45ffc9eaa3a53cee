//! Validation command for profile files.

use crate::cli::common::{load_catalog, load_config, load_profile, print_json, CliError, CliResult};
use crate::services::ProfileService;
use crate::validator::{ProfileValidator, ValidationErrorKind};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Validate a profile file for errors and warnings
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Profile JSON file
    #[arg(short, long, value_name = "FILE")]
    pub profile: PathBuf,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat warnings as errors (exit non-zero)
    #[arg(long)]
    pub strict: bool,
}

/// Per-area check status: "passed" or "failed".
#[derive(Debug, Serialize)]
struct ValidationChecks {
    search_crafts: &'static str,
    custom_keys: &'static str,
}

#[derive(Debug, Serialize)]
struct ValidationMessage {
    severity: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<ValidationErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sequence: Option<u32>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<String>,
}

#[derive(Debug, Serialize)]
struct ValidationResponse {
    valid: bool,
    checks: ValidationChecks,
    messages: Vec<ValidationMessage>,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        let path = ProfileService::resolve_path(&self.profile, &load_config());
        let base = load_catalog()?;
        let (profile, catalog) = load_profile(&path, &base)?;

        let report = ProfileValidator::new(&profile, &catalog).validate();

        let mut checks = ValidationChecks {
            search_crafts: "passed",
            custom_keys: "passed",
        };
        let mut messages = Vec::new();

        for error in &report.errors {
            match error.kind {
                ValidationErrorKind::InvalidCustomKey => checks.custom_keys = "failed",
                ValidationErrorKind::LiteralTooLong
                | ValidationErrorKind::UnresolvableCharacters
                | ValidationErrorKind::TooManyItemRefs
                | ValidationErrorKind::DuplicateSequence => checks.search_crafts = "failed",
            }

            messages.push(ValidationMessage {
                severity: "error",
                kind: Some(error.kind),
                sequence: error.sequence,
                message: error.message.clone(),
                suggestion: error.suggestion.clone(),
            });
        }

        for warning in &report.warnings {
            messages.push(ValidationMessage {
                severity: "warning",
                kind: None,
                sequence: None,
                message: warning.message.clone(),
                suggestion: None,
            });
        }

        let response = ValidationResponse {
            valid: report.is_valid(),
            checks,
            messages,
        };

        if self.json {
            print_json(&response)?;
        } else {
            if response.valid {
                println!("✓ Validation passed");
            } else {
                println!("✗ Validation failed");
            }

            println!("\nChecks:");
            println!("  Search crafts: {}", response.checks.search_crafts);
            println!("  Custom keys:   {}", response.checks.custom_keys);

            if !response.messages.is_empty() {
                println!("\nIssues:");
                for msg in &response.messages {
                    let prefix = if msg.severity == "error" { "  ✗" } else { "  ⚠" };
                    match msg.sequence {
                        Some(seq) => println!("{prefix} [Search #{seq}] {}", msg.message),
                        None => println!("{prefix} {}", msg.message),
                    }
                    if let Some(suggestion) = &msg.suggestion {
                        println!("      {suggestion}");
                    }
                }
            }
        }

        if !response.valid {
            return Err(CliError::validation("Validation failed"));
        }

        if self.strict && !report.warnings.is_empty() {
            return Err(CliError::validation("Warnings found in strict mode"));
        }

        Ok(())
    }
}
