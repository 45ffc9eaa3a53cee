//! CLI command handlers for keyscheme.
//!
//! Every engine operation is reachable from a subcommand so profiles can be
//! inspected, edited and exported from scripts.

pub mod common;
pub mod config;
pub mod craft;
pub mod custom;
pub mod export;
pub mod init;
pub mod keys;
pub mod remap;
pub mod resolve;
pub mod translate;
pub mod validate;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliErrorKind, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use craft::CraftArgs;
pub use custom::CustomArgs;
pub use export::ExportArgs;
pub use init::InitProfileArgs;
pub use keys::KeysArgs;
pub use remap::RemapArgs;
pub use resolve::ResolveArgs;
pub use translate::TranslateArgs;
pub use validate::ValidateArgs;
