//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Directory searched for profiles given by bare name
    #[arg(long, value_name = "DIR")]
    profiles_dir: Option<PathBuf>,

    /// Write a comment header into exported scripts (true or false)
    #[arg(long, value_name = "BOOL")]
    include_header: Option<bool>,

    /// Right-hand side exported for disabled keys
    #[arg(long, value_name = "TEXT")]
    disabled_directive: Option<String>,

    /// Default log level (error, warn, info, debug, trace, off)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

#[derive(Serialize, Debug)]
struct ConfigOutput<'a> {
    file: String,
    exists: bool,
    #[serde(flatten)]
    settings: &'a Config,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;
        let file = Config::config_file_path()
            .map_err(|e| CliError::io(format!("{e:#}")))?
            .display()
            .to_string();
        let exists = Config::exists();

        if self.json {
            return print_json(&ConfigOutput {
                file,
                exists,
                settings: &config,
            });
        }

        println!("keyscheme configuration");
        println!("=======================");
        println!();
        if exists {
            println!("File: {file}");
        } else {
            println!("File: {file} (not created, using defaults)");
        }
        println!();

        println!("Paths:");
        match &config.paths.profiles_dir {
            Some(dir) => println!("  Profiles Directory: {}", dir.display()),
            None => println!("  Profiles Directory: (not configured)"),
        }
        println!();

        println!("Export:");
        println!("  Include Header: {}", config.export.include_header);
        println!("  Disabled Directive: {}", config.export.disabled_directive);
        println!();

        println!("Logging:");
        println!("  Level: {}", config.logging.level);

        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.profiles_dir.is_none()
            && self.include_header.is_none()
            && self.disabled_directive.is_none()
            && self.log_level.is_none()
        {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --profiles-dir, --include-header, --disabled-directive, or --log-level",
            ));
        }

        let mut config = Config::load().unwrap_or_default();

        if let Some(dir) = &self.profiles_dir {
            if !dir.is_dir() {
                return Err(CliError::validation(format!(
                    "Profiles directory does not exist: {}",
                    dir.display()
                )));
            }
            config.paths.profiles_dir = Some(dir.clone());
        }
        if let Some(include_header) = self.include_header {
            config.export.include_header = include_header;
        }
        if let Some(directive) = &self.disabled_directive {
            config.export.disabled_directive = directive.trim().to_string();
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.trim().to_lowercase();
        }

        config
            .validate()
            .map_err(|e| CliError::validation(format!("{e:#}")))?;
        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");
        Ok(())
    }
}
