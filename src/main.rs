//! keyscheme - key identity, remap resolution and macro export
//!
//! Command-line front end over the keyscheme library. Every subcommand
//! exits with 0 on success, 1 on validation failure and 2 on I/O failure.

use clap::{Parser, Subcommand};
use keyscheme::cli::{
    CliResult, ConfigArgs, CraftArgs, CustomArgs, ExportArgs, InitProfileArgs, KeysArgs,
    RemapArgs, ResolveArgs, TranslateArgs, ValidateArgs,
};
use keyscheme::config::Config;
use keyscheme::constants::APP_BINARY_NAME;
use keyscheme::logging;

/// Key identity, remap resolution and macro export for control-scheme profiles
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Browse the key catalog
    Keys(KeysArgs),
    /// Translate a key identifier between namespaces
    Translate(TranslateArgs),
    /// Resolve a key through a profile's remaps
    Resolve(ResolveArgs),
    /// Edit a profile's remap entries
    Remap(RemapArgs),
    /// Encode and maintain search craft strings
    Craft(CraftArgs),
    /// Manage a profile's custom keys
    Custom(CustomArgs),
    /// Export a profile's remaps as a macro script
    Export(ExportArgs),
    /// Validate a profile file
    Validate(ValidateArgs),
    /// Create an empty profile file
    InitProfile(InitProfileArgs),
    /// Show or change the configuration file
    Config(ConfigArgs),
}

fn run(command: &Command) -> CliResult<()> {
    match command {
        Command::Keys(args) => args.execute(),
        Command::Translate(args) => args.execute(),
        Command::Resolve(args) => args.execute(),
        Command::Remap(args) => args.execute(),
        Command::Craft(args) => args.execute(),
        Command::Custom(args) => args.execute(),
        Command::Export(args) => args.execute(),
        Command::Validate(args) => args.execute(),
        Command::InitProfile(args) => args.execute(),
        Command::Config(args) => args.execute(),
    }
}

fn main() {
    let args = Cli::parse();

    // Logging needs the config, so a bad config file is reported once the
    // subscriber is up.
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    logging::init(args.verbose, &config);
    if let Some(err) = config_error {
        tracing::warn!("Ignoring config file: {err:#}");
    }

    if let Err(err) = run(&args.command) {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code().code());
    }
}
