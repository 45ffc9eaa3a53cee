//! Search string codec errors.

use std::fmt;

/// Field-level validation failure for a search craft literal.
///
/// Every variant names all offending input, not just the first, so the
/// user can fix the whole string in one edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchCodecError {
    /// Literal exceeds the character limit
    TooLong {
        /// Number of characters in the literal
        length: usize,
        /// Maximum allowed
        max: usize,
    },
    /// Characters no physical key produces under the current remaps
    Unresolvable {
        /// Offending characters, in input order
        chars: Vec<char>,
    },
    /// Keys that do not render to a character
    Unrenderable {
        /// Offending canonical codes, in input order
        keys: Vec<String>,
    },
}

impl fmt::Display for SearchCodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLong { length, max } => write!(
                f,
                "Search string has {length} characters (maximum {max})"
            ),
            Self::Unresolvable { chars } => {
                let list: Vec<String> = chars.iter().map(|c| format!("'{c}'")).collect();
                write!(
                    f,
                    "No physical key produces {} with the current remaps",
                    list.join(", ")
                )
            }
            Self::Unrenderable { keys } => {
                write!(f, "Keys have no text rendering: {}", keys.join(", "))
            }
        }
    }
}

impl std::error::Error for SearchCodecError {}
