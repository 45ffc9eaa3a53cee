//! Conversion between search craft literals and key sequences.
//!
//! A search literal is what the user wants to appear in the game's search
//! box. The *intended* keys are the keys that type those characters; the
//! *physical* keys are what must actually be pressed once the profile's
//! remaps are applied.
//!
//! For every literal `s` accepted by [`SearchStringCodec::encode`]:
//!
//! ```text
//! to_literal_string(to_physical(parse_literal(s), R), R) == s.to_lowercase()
//! ```

pub mod error;

use crate::catalog::KeyCatalog;
use crate::constants::MAX_SEARCH_LITERAL_CHARS;
use crate::models::{KeyCategory, KeyIdentifier};
use crate::remap::RemapIndex;

pub use error::SearchCodecError;

/// Intended and physical key sequences for one literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedSearch {
    /// Keys that type the literal
    pub intended: Vec<KeyIdentifier>,
    /// Keys to press under the remap configuration
    pub physical: Vec<KeyIdentifier>,
}

impl EncodedSearch {
    /// Canonical codes of the intended keys.
    #[must_use]
    pub fn intended_codes(&self) -> Vec<String> {
        self.intended.iter().map(|k| k.code.clone()).collect()
    }

    /// Canonical codes of the physical keys.
    #[must_use]
    pub fn physical_codes(&self) -> Vec<String> {
        self.physical.iter().map(|k| k.code.clone()).collect()
    }
}

/// Bidirectional search string codec over a catalog snapshot.
#[derive(Debug, Clone, Copy)]
pub struct SearchStringCodec<'a> {
    catalog: &'a KeyCatalog,
}

impl<'a> SearchStringCodec<'a> {
    /// Creates a codec over `catalog`.
    #[must_use]
    pub const fn new(catalog: &'a KeyCatalog) -> Self {
        Self { catalog }
    }

    /// Splits a literal into the keys that type it.
    ///
    /// ASCII letters map to letter keys (either case), ASCII digits to digit
    /// keys, and every other character to a literal-character key.
    /// The length limit is not checked here; see [`Self::encode`].
    #[must_use]
    pub fn parse_literal(&self, literal: &str) -> Vec<KeyIdentifier> {
        literal
            .chars()
            .map(|ch| {
                let code = if ch.is_ascii_alphabetic() {
                    Some(format!("Key{}", ch.to_ascii_uppercase()))
                } else if ch.is_ascii_digit() {
                    Some(format!("Digit{ch}"))
                } else {
                    None
                };

                code.and_then(|code| self.catalog.get(&code).cloned())
                    .unwrap_or_else(|| KeyIdentifier::literal(ch))
            })
            .collect()
    }

    /// Maps intended keys to the physical keys that produce them.
    ///
    /// A physical key is usable when it is a real input (not a literal
    /// character) and pressing it produces the intended key under `index`.
    /// All unusable characters are reported together.
    pub fn to_physical(
        &self,
        intended: &[KeyIdentifier],
        index: &RemapIndex,
    ) -> Result<Vec<KeyIdentifier>, SearchCodecError> {
        let mut physical = Vec::with_capacity(intended.len());
        let mut unresolvable = Vec::new();

        for key in intended {
            let source = index.reverse_source(&key.code);
            let produces_intended = index.effective_output(source) == Some(key.code.as_str());

            match self.catalog.resolve(source) {
                Some(found)
                    if produces_intended && found.category != KeyCategory::LiteralCharacter =>
                {
                    physical.push(found.into_owned());
                }
                _ => unresolvable.push(key_char(key)),
            }
        }

        if unresolvable.is_empty() {
            Ok(physical)
        } else {
            Err(SearchCodecError::Unresolvable {
                chars: unresolvable,
            })
        }
    }

    /// Renders the text that pressing `physical` in order would type.
    ///
    /// Disabled keys and keys whose output is not a letter, digit or
    /// literal character are reported together.
    pub fn to_literal_string(
        &self,
        physical: &[KeyIdentifier],
        index: &RemapIndex,
    ) -> Result<String, SearchCodecError> {
        let mut literal = String::new();
        let mut unrenderable = Vec::new();

        for key in physical {
            let rendered = index.effective_output(&key.code).and_then(|output| {
                self.catalog
                    .resolve(output)
                    .and_then(|k| k.rendered_char())
            });

            match rendered {
                Some(ch) => literal.push(ch),
                None => unrenderable.push(key.code.clone()),
            }
        }

        if unrenderable.is_empty() {
            Ok(literal)
        } else {
            Err(SearchCodecError::Unrenderable { keys: unrenderable })
        }
    }

    /// Validates the length of `literal` and computes both key sequences.
    pub fn encode(
        &self,
        literal: &str,
        index: &RemapIndex,
    ) -> Result<EncodedSearch, SearchCodecError> {
        let length = literal.chars().count();
        if length > MAX_SEARCH_LITERAL_CHARS {
            return Err(SearchCodecError::TooLong {
                length,
                max: MAX_SEARCH_LITERAL_CHARS,
            });
        }

        let intended = self.parse_literal(literal);
        let physical = self.to_physical(&intended, index)?;
        Ok(EncodedSearch { intended, physical })
    }

    /// Renders a stored physical key sequence given as canonical codes.
    pub fn decode_codes<S: AsRef<str>>(
        &self,
        codes: &[S],
        index: &RemapIndex,
    ) -> Result<String, SearchCodecError> {
        let mut keys = Vec::with_capacity(codes.len());
        let mut unknown = Vec::new();

        for code in codes {
            match self.catalog.resolve(code.as_ref()) {
                Some(key) => keys.push(key.into_owned()),
                None => unknown.push(code.as_ref().to_string()),
            }
        }

        if !unknown.is_empty() {
            return Err(SearchCodecError::Unrenderable { keys: unknown });
        }
        self.to_literal_string(&keys, index)
    }
}

fn key_char(key: &KeyIdentifier) -> char {
    key.character
        .or_else(|| key.name.chars().next())
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}
