//! Application-wide constants.
//!
//! This module defines the application name along with the reserved
//! identifiers and limits shared by the catalog, the remap index and the
//! search string codec.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "keyscheme";

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "keyscheme";

/// Canonical target meaning "this key is inert".
pub const DISABLED_SENTINEL: &str = "Disabled";

/// Prefix of canonical codes minted for custom keys (`Custom.<scope>.<n>`).
pub const CUSTOM_CODE_PREFIX: &str = "Custom.";

/// Prefix of legacy game identifiers for custom keys (`key.custom.<scope>.<n>`).
pub const CUSTOM_LEGACY_PREFIX: &str = "key.custom.";

/// Prefix of canonical codes for literal-character keys (`Literal.<char>`).
pub const LITERAL_CODE_PREFIX: &str = "Literal.";

/// Maximum number of visible characters in a search craft literal.
pub const MAX_SEARCH_LITERAL_CHARS: usize = 4;

/// Maximum number of content references attached to a search craft entry.
pub const MAX_ITEM_REFS: usize = 3;

/// File extension of exported macro scripts.
pub const MACRO_SCRIPT_EXTENSION: &str = "ahk";
