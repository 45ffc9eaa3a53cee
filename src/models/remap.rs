//! Remap entry data structures.

use crate::constants::DISABLED_SENTINEL;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a remapped key produces.
///
/// Serialized as a plain string: the canonical target code, or the reserved
/// `"Disabled"` sentinel for an inert key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RemapTarget {
    /// The key behaves as the given canonical key
    Key(String),
    /// The key produces nothing
    Disabled,
}

impl RemapTarget {
    /// Returns the target code, or `None` for a disabled key.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Key(code) => Some(code),
            Self::Disabled => None,
        }
    }

    /// Returns true for the disabled sentinel.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }

    /// Returns the string form stored in profiles.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Key(code) => code,
            Self::Disabled => DISABLED_SENTINEL,
        }
    }
}

impl From<String> for RemapTarget {
    fn from(value: String) -> Self {
        if value == DISABLED_SENTINEL {
            Self::Disabled
        } else {
            Self::Key(value)
        }
    }
}

impl From<&str> for RemapTarget {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<RemapTarget> for String {
    fn from(value: RemapTarget) -> Self {
        match value {
            RemapTarget::Key(code) => code,
            RemapTarget::Disabled => DISABLED_SENTINEL.to_string(),
        }
    }
}

impl fmt::Display for RemapTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-authored rule: pressing `source_key` acts as `target_key`.
///
/// Entries are stored in authoring order. Duplicate sources and many-to-one
/// targets are legal; the remap index decides which entry is effective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemapEntry {
    /// Canonical code of the physical input
    pub source_key: String,
    /// Canonical code produced, or the disabled sentinel
    pub target_key: RemapTarget,
}

impl RemapEntry {
    /// Creates a remap from `source` to `target`.
    pub fn new(source: impl Into<String>, target: impl Into<RemapTarget>) -> Self {
        Self {
            source_key: source.into(),
            target_key: target.into(),
        }
    }

    /// Creates a remap that disables `source`.
    pub fn disabled(source: impl Into<String>) -> Self {
        Self {
            source_key: source.into(),
            target_key: RemapTarget::Disabled,
        }
    }
}
