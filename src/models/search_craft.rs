//! Search craft entry data structures.

use serde::{Deserialize, Serialize};

use crate::constants::MAX_ITEM_REFS;
use crate::remap::RemapIndex;
use crate::search::{SearchCodecError, SearchStringCodec};

/// A short text shortcut typed into the game's search box.
///
/// `literal` is authoritative. `intended_keys` and `physical_keys` are
/// derived from it and from the profile's remaps; they are stored for
/// convenience and must be refreshed whenever either input changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCraftEntry {
    /// Ordering key within the profile
    pub sequence: u32,
    /// Content references (at most three)
    #[serde(default)]
    pub item_refs: Vec<String>,
    /// Text to type (0-4 characters)
    pub literal: String,
    /// Derived: keys that type `literal`
    #[serde(default)]
    pub intended_keys: Vec<String>,
    /// Derived: keys to press under the current remaps
    #[serde(default)]
    pub physical_keys: Vec<String>,
}

impl SearchCraftEntry {
    /// Creates an entry with empty derived fields.
    ///
    /// ASCII letters are stored lower-case, since letter keys type
    /// lower-case characters.
    pub fn new(sequence: u32, literal: &str, item_refs: Vec<String>) -> Self {
        Self {
            sequence,
            item_refs,
            literal: normalize_literal(literal),
            intended_keys: Vec::new(),
            physical_keys: Vec::new(),
        }
    }

    /// Replaces the literal and clears the now-stale derived fields.
    pub fn set_literal(&mut self, literal: &str) {
        self.literal = normalize_literal(literal);
        self.intended_keys.clear();
        self.physical_keys.clear();
    }

    /// Returns true if more content references are attached than allowed.
    #[must_use]
    pub fn has_too_many_refs(&self) -> bool {
        self.item_refs.len() > MAX_ITEM_REFS
    }

    /// Recomputes the derived key sequences.
    ///
    /// On failure both derived fields are cleared so a stale sequence can
    /// never be mistaken for a valid one.
    pub fn refresh(
        &mut self,
        codec: &SearchStringCodec<'_>,
        index: &RemapIndex,
    ) -> Result<(), SearchCodecError> {
        match codec.encode(&self.literal, index) {
            Ok(encoded) => {
                self.intended_keys = encoded.intended_codes();
                self.physical_keys = encoded.physical_codes();
                Ok(())
            }
            Err(err) => {
                self.intended_keys.clear();
                self.physical_keys.clear();
                Err(err)
            }
        }
    }
}

fn normalize_literal(literal: &str) -> String {
    literal
        .chars()
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
