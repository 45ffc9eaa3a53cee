//! Control-scheme profile: the persisted per-user document.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::catalog::{CustomKeyScope, KeyCatalog};
use crate::models::{KeyIdentifier, RemapEntry, RemapTarget, SearchCraftEntry};
use crate::remap::RemapIndex;
use crate::search::{SearchCodecError, SearchStringCodec};
use crate::translate::NamespaceTranslator;

/// A custom key minted for a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomKeyRecord {
    /// Canonical code (`Custom.<scope>.<n>`)
    pub code: String,
    /// User-supplied label (not unique)
    pub label: String,
}

/// A search craft entry whose derived fields could not be computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCraftFailure {
    /// Sequence number of the failing entry
    pub sequence: u32,
    /// Why it failed
    pub error: SearchCodecError,
}

/// A user's control-scheme profile.
///
/// # Validation
///
/// - name must be non-empty, max 100 characters
/// - search craft literals must encode under the current remaps before the
///   profile is saved (see `ProfileService::save`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Profile identifier (UUID v4)
    pub id: String,
    /// Profile name
    pub name: String,
    /// Creation timestamp
    pub created: DateTime<Utc>,
    /// Last modification timestamp
    pub modified: DateTime<Utc>,
    /// Remap entries in authoring order
    #[serde(default)]
    pub remaps: Vec<RemapEntry>,
    /// Whether search crafting is enabled for this profile
    #[serde(default = "default_true")]
    pub search_craft_enabled: bool,
    /// Search craft entries
    #[serde(default)]
    pub search_crafts: Vec<SearchCraftEntry>,
    /// Custom keys minted for this profile
    #[serde(default)]
    pub custom_keys: Vec<CustomKeyRecord>,
    /// Next custom key index; never decreases
    #[serde(default)]
    pub next_custom_key_index: u64,
}

const fn default_true() -> bool {
    true
}

impl Profile {
    /// Creates an empty profile with a fresh identifier.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        Self::validate_name(&name)?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name,
            created: now,
            modified: now,
            remaps: Vec::new(),
            search_craft_enabled: true,
            search_crafts: Vec::new(),
            custom_keys: Vec::new(),
            next_custom_key_index: 0,
        })
    }

    /// Validates the profile name.
    pub fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            anyhow::bail!("Profile name cannot be empty");
        }

        if name.chars().count() > 100 {
            anyhow::bail!(
                "Profile name '{}' exceeds maximum length of 100 characters (got {})",
                name,
                name.chars().count()
            );
        }

        Ok(())
    }

    /// Updates the modification timestamp to now.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    /// Returns `base` with this profile's custom keys registered.
    pub fn catalog_snapshot(&self, base: &KeyCatalog) -> Result<KeyCatalog> {
        base.clone().with_custom_keys(&self.custom_keys)
    }

    /// The custom key counter owned by this profile.
    #[must_use]
    pub fn custom_key_scope(&self) -> CustomKeyScope {
        CustomKeyScope::new(&self.id, self.next_custom_key_index)
    }

    /// Mints a custom key, registers it in `catalog` and records it here.
    pub fn mint_custom_key(&mut self, catalog: &mut KeyCatalog, label: &str) -> KeyIdentifier {
        let mut scope = self.custom_key_scope();
        let key = catalog.mint_custom_key(&mut scope, label);

        self.next_custom_key_index = scope.next_index();
        self.custom_keys.push(CustomKeyRecord {
            code: key.code.clone(),
            label: key.name.clone(),
        });
        self.touch();
        key
    }

    /// Removes a custom key record. The counter is not rewound, and remaps
    /// that still mention the code keep resolving through derivation.
    pub fn remove_custom_key(&mut self, code: &str) -> bool {
        let before = self.custom_keys.len();
        self.custom_keys.retain(|record| record.code != code);
        let removed = self.custom_keys.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Sets the remap for `source`, replacing its effective entry if any.
    ///
    /// Stored sources are compared in canonical form, so an entry saved
    /// under a legacy id is replaced rather than shadowed. The replaced
    /// entry's source is rewritten in canonical form.
    pub fn set_remap(
        &mut self,
        catalog: &KeyCatalog,
        source: &str,
        target: impl Into<RemapTarget>,
    ) {
        let translator = NamespaceTranslator::new(catalog);
        let source = translator.normalize(source);
        let target = target.into();
        if let Some(entry) = self
            .remaps
            .iter_mut()
            .find(|e| translator.normalize(&e.source_key) == source)
        {
            entry.source_key = source;
            entry.target_key = target;
        } else {
            self.remaps.push(RemapEntry::new(source, target));
        }
        self.touch();
    }

    /// Removes every remap entry for `source`, in either namespace. Returns
    /// the number removed.
    pub fn remove_remap(&mut self, catalog: &KeyCatalog, source: &str) -> usize {
        let translator = NamespaceTranslator::new(catalog);
        let source = translator.normalize(source);
        let before = self.remaps.len();
        self.remaps
            .retain(|e| translator.normalize(&e.source_key) != source);
        let removed = before - self.remaps.len();
        if removed > 0 {
            self.touch();
        }
        removed
    }

    /// Builds the remap index for this profile.
    #[must_use]
    pub fn remap_index(&self, catalog: &KeyCatalog) -> RemapIndex {
        RemapIndex::build(&self.remaps, &NamespaceTranslator::new(catalog))
    }

    /// Adds a search craft entry and returns its sequence number.
    ///
    /// Derived fields stay empty until [`Self::refresh_derived`] runs.
    pub fn add_search_craft(&mut self, literal: &str, item_refs: Vec<String>) -> u32 {
        let sequence = self
            .search_crafts
            .iter()
            .map(|e| e.sequence)
            .max()
            .map_or(0, |max| max.saturating_add(1));

        self.search_crafts
            .push(SearchCraftEntry::new(sequence, literal, item_refs));
        self.touch();
        sequence
    }

    /// Removes the search craft entry with `sequence`.
    pub fn remove_search_craft(&mut self, sequence: u32) -> bool {
        let before = self.search_crafts.len();
        self.search_crafts.retain(|e| e.sequence != sequence);
        let removed = self.search_crafts.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    /// Enables or disables search crafting. Disabling deletes every entry.
    pub fn set_search_craft_enabled(&mut self, enabled: bool) {
        self.search_craft_enabled = enabled;
        if !enabled {
            self.search_crafts.clear();
        }
        self.touch();
    }

    /// Recomputes the derived fields of every search craft entry against the
    /// current remaps. Returns the entries that failed.
    pub fn refresh_derived(&mut self, catalog: &KeyCatalog) -> Vec<SearchCraftFailure> {
        let index = self.remap_index(catalog);
        let codec = SearchStringCodec::new(catalog);

        let failures: Vec<SearchCraftFailure> = self
            .search_crafts
            .iter_mut()
            .filter_map(|entry| {
                entry
                    .refresh(&codec, &index)
                    .err()
                    .map(|error| SearchCraftFailure {
                        sequence: entry.sequence,
                        error,
                    })
            })
            .collect();

        debug!(
            "Refreshed {} search craft entries for profile '{}' ({} failed)",
            self.search_crafts.len(),
            self.name,
            failures.len()
        );

        failures
    }
}
