//! Key catalog: the registry of every known physical input.
//!
//! The static table is embedded in the binary and parsed once by
//! [`KeyCatalog::load`]. A catalog snapshot may additionally carry the
//! custom keys of one profile, either restored from the profile file via
//! [`KeyCatalog::with_custom_keys`] or minted with
//! [`KeyCatalog::mint_custom_key`].

pub mod custom;

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;

use crate::constants::{CUSTOM_CODE_PREFIX, DISABLED_SENTINEL, LITERAL_CODE_PREFIX};
use crate::models::key::parse_literal_code;
use crate::models::{CustomKeyRecord, KeyCategory, KeyIdentifier};

pub use custom::CustomKeyScope;

/// Database schema of keys.json.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogDatabase {
    version: String,
    keys: Vec<KeyIdentifier>,
}

/// Registry of physical inputs with lookup by canonical code, legacy
/// identifier and display name.
#[derive(Debug, Clone)]
pub struct KeyCatalog {
    /// Schema version of the embedded table
    version: String,
    /// Static keys followed by the custom overlay
    keys: Vec<KeyIdentifier>,
    /// Number of static keys at the front of `keys`
    static_len: usize,
    /// Canonical code → index into `keys`
    by_code: HashMap<String, usize>,
    /// Legacy identifier → index into `keys`
    by_legacy: HashMap<String, usize>,
    /// Compiled custom-namespace legacy pattern
    custom_legacy: Regex,
}

impl KeyCatalog {
    /// Loads the catalog from the embedded keys.json file.
    pub fn load() -> Result<Self> {
        Self::from_json(include_str!("keys.json"))
            .context("Failed to parse embedded keys.json")
    }

    /// Builds a catalog from a JSON document in the keys.json schema.
    ///
    /// Fails if two keys share a canonical code or a legacy identifier, or
    /// if a static key claims a reserved canonical namespace.
    pub fn from_json(json: &str) -> Result<Self> {
        let db: CatalogDatabase =
            serde_json::from_str(json).context("Invalid key catalog JSON")?;
        let custom_legacy = Regex::new(custom::CUSTOM_LEGACY_PATTERN)
            .context("Failed to compile custom key pattern")?;

        let mut catalog = Self {
            version: db.version,
            keys: Vec::with_capacity(db.keys.len()),
            static_len: 0,
            by_code: HashMap::with_capacity(db.keys.len()),
            by_legacy: HashMap::with_capacity(db.keys.len()),
            custom_legacy,
        };

        for key in db.keys {
            if key.code.starts_with(CUSTOM_CODE_PREFIX)
                || key.code.starts_with(LITERAL_CODE_PREFIX)
                || key.code == DISABLED_SENTINEL
            {
                anyhow::bail!(
                    "Key '{}' uses a reserved canonical namespace",
                    key.code
                );
            }
            catalog.insert(key)?;
        }
        catalog.static_len = catalog.keys.len();

        Ok(catalog)
    }

    /// Returns a snapshot with the given custom keys registered.
    pub fn with_custom_keys(mut self, records: &[CustomKeyRecord]) -> Result<Self> {
        for record in records {
            if !custom::is_custom_code(&record.code) {
                anyhow::bail!(
                    "Custom key '{}' is not in the {} namespace",
                    record.code,
                    CUSTOM_CODE_PREFIX
                );
            }
            let key = custom_key(&record.code, &record.label);
            self.insert(key)
                .with_context(|| format!("Failed to register custom key '{}'", record.code))?;
        }
        Ok(self)
    }

    fn insert(&mut self, key: KeyIdentifier) -> Result<()> {
        if self.by_code.contains_key(&key.code) {
            anyhow::bail!("Duplicate canonical code '{}'", key.code);
        }
        if let Some(legacy) = &key.legacy {
            if let Some(existing) = self.by_legacy.get(legacy) {
                anyhow::bail!(
                    "Legacy identifier '{}' is claimed by both '{}' and '{}'",
                    legacy,
                    self.keys[*existing].code,
                    key.code
                );
            }
        }

        let idx = self.keys.len();
        self.by_code.insert(key.code.clone(), idx);
        if let Some(legacy) = &key.legacy {
            self.by_legacy.insert(legacy.clone(), idx);
        }
        self.keys.push(key);
        Ok(())
    }

    /// Gets a registered key by canonical code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&KeyIdentifier> {
        let idx = self.by_code.get(code)?;
        self.keys.get(*idx)
    }

    /// Gets a key by canonical code, synthesizing keys that are never
    /// registered: literal characters (`Literal.x`) and custom keys minted
    /// by an older snapshot (`Custom.scope.n`).
    #[must_use]
    pub fn resolve(&self, code: &str) -> Option<Cow<'_, KeyIdentifier>> {
        if let Some(key) = self.get(code) {
            return Some(Cow::Borrowed(key));
        }
        if let Some(ch) = parse_literal_code(code) {
            return Some(Cow::Owned(KeyIdentifier::literal(ch)));
        }
        if custom::is_custom_code(code) {
            let label = crate::translate::title_case_trailing_segment(code);
            return Some(Cow::Owned(custom_key(code, &label)));
        }
        None
    }

    /// Gets a key by its legacy game identifier.
    #[must_use]
    pub fn get_by_legacy(&self, legacy: &str) -> Option<&KeyIdentifier> {
        let idx = self.by_legacy.get(legacy)?;
        self.keys.get(*idx)
    }

    /// Returns true if `code` is a registered canonical code.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.by_code.contains_key(code)
    }

    /// Searches keys by display name or canonical code.
    ///
    /// Matching is a case-insensitive substring test. Results are ordered
    /// exact matches first, then prefix matches, then other substring
    /// matches, keeping catalog order within each group.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyscheme::catalog::KeyCatalog;
    ///
    /// let catalog = KeyCatalog::load().unwrap();
    /// let results = catalog.search("shift");
    /// assert!(results.iter().any(|k| k.code == "ShiftLeft"));
    /// ```
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&KeyIdentifier> {
        let query = query.trim();
        if query.is_empty() {
            return self.keys.iter().collect();
        }

        let query_lower = query.to_lowercase();
        let mut results: Vec<(&KeyIdentifier, u8)> = self
            .keys
            .iter()
            .filter_map(|key| {
                let code_lower = key.code.to_lowercase();
                let name_lower = key.name.to_lowercase();

                if code_lower == query_lower || name_lower == query_lower {
                    return Some((key, 0));
                }
                if code_lower.starts_with(&query_lower) || name_lower.starts_with(&query_lower) {
                    return Some((key, 1));
                }
                if code_lower.contains(&query_lower) || name_lower.contains(&query_lower) {
                    return Some((key, 2));
                }
                None
            })
            .collect();

        // Stable sort keeps catalog order within a tier
        results.sort_by_key(|(_, tier)| *tier);
        results.into_iter().map(|(key, _)| key).collect()
    }

    /// Searches keys within one category.
    #[must_use]
    pub fn search_in_category(&self, query: &str, category: KeyCategory) -> Vec<&KeyIdentifier> {
        self.search(query)
            .into_iter()
            .filter(|k| k.category == category)
            .collect()
    }

    /// Gets all keys in a category.
    #[must_use]
    pub fn keys_in_category(&self, category: KeyCategory) -> Vec<&KeyIdentifier> {
        self.keys.iter().filter(|k| k.category == category).collect()
    }

    /// Allocates a new custom key for the profile owning `scope`.
    ///
    /// The code is unique within the scope's sequence: the counter advances
    /// on every call and indices already present in this snapshot are
    /// skipped, so a stale counter can never hand out a code twice.
    pub fn mint_custom_key(&mut self, scope: &mut CustomKeyScope, label: &str) -> KeyIdentifier {
        loop {
            let index = scope.allocate();
            let code = custom::custom_code(scope.scope(), index);
            if self.by_code.contains_key(&code) {
                continue;
            }

            let label = label.trim();
            let label = if label.is_empty() {
                format!("Custom {index}")
            } else {
                label.to_string()
            };

            let key = custom_key(&code, &label);
            let idx = self.keys.len();
            self.by_code.insert(code, idx);
            if let Some(legacy) = &key.legacy {
                self.by_legacy.insert(legacy.clone(), idx);
            }
            self.keys.push(key.clone());
            return key;
        }
    }

    /// Custom keys registered in this snapshot.
    #[must_use]
    pub fn custom_keys(&self) -> &[KeyIdentifier] {
        &self.keys[self.static_len..]
    }

    /// All keys (static table followed by custom keys).
    #[must_use]
    pub fn keys(&self) -> &[KeyIdentifier] {
        &self.keys
    }

    /// Derives a canonical code from a custom-namespace legacy identifier.
    #[must_use]
    pub fn derive_custom_code(&self, legacy: &str) -> Option<String> {
        custom::derive_custom_code(&self.custom_legacy, legacy)
    }

    /// Schema version of the embedded table.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Total number of keys in this snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if the snapshot holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

fn custom_key(code: &str, label: &str) -> KeyIdentifier {
    KeyIdentifier {
        code: code.to_string(),
        name: label.to_string(),
        category: KeyCategory::Custom,
        position: None,
        legacy: custom::custom_legacy_from_code(code),
        macro_alias: None,
        character: None,
    }
}
