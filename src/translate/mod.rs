//! Conversions between the canonical key namespace and the legacy game
//! namespace, plus human display names.
//!
//! Lookups never fail. Identifiers the catalog does not know are passed
//! through unchanged (with a warning) so that keys added by a newer game
//! build survive a round trip through this crate.

use tracing::warn;

use crate::catalog::{custom, KeyCatalog};
use crate::constants::DISABLED_SENTINEL;
use crate::models::key::parse_literal_code;

/// How a legacy identifier was turned into a canonical code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyOrigin {
    /// Exact match in the catalog
    Catalog,
    /// Derived from a `key.custom.*` path
    DerivedCustom,
    /// Unknown identifier, returned unchanged
    PassThrough,
}

/// Result of resolving a legacy identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyResolution {
    /// Canonical code (or the untouched input for pass-through)
    pub code: String,
    /// Which rule produced `code`
    pub origin: LegacyOrigin,
}

/// Namespace conversions backed by a catalog snapshot.
#[derive(Debug, Clone, Copy)]
pub struct NamespaceTranslator<'a> {
    catalog: &'a KeyCatalog,
}

impl<'a> NamespaceTranslator<'a> {
    /// Creates a translator over `catalog`.
    #[must_use]
    pub const fn new(catalog: &'a KeyCatalog) -> Self {
        Self { catalog }
    }

    /// The catalog snapshot this translator reads from.
    #[must_use]
    pub const fn catalog(&self) -> &'a KeyCatalog {
        self.catalog
    }

    /// Resolves a legacy identifier and reports which rule applied.
    pub fn resolve_legacy(&self, legacy: &str) -> LegacyResolution {
        let legacy = legacy.trim();

        if let Some(key) = self.catalog.get_by_legacy(legacy) {
            return LegacyResolution {
                code: key.code.clone(),
                origin: LegacyOrigin::Catalog,
            };
        }

        if let Some(code) = self.catalog.derive_custom_code(legacy) {
            return LegacyResolution {
                code,
                origin: LegacyOrigin::DerivedCustom,
            };
        }

        warn!(
            "Unknown legacy key identifier '{}', passing through unchanged",
            legacy
        );
        LegacyResolution {
            code: legacy.to_string(),
            origin: LegacyOrigin::PassThrough,
        }
    }

    /// Converts a legacy game identifier to a canonical code.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyscheme::catalog::KeyCatalog;
    /// use keyscheme::translate::NamespaceTranslator;
    ///
    /// let catalog = KeyCatalog::load().unwrap();
    /// let translator = NamespaceTranslator::new(&catalog);
    /// assert_eq!(translator.canonical_from_legacy("key.lshift"), "ShiftLeft");
    /// assert_eq!(translator.canonical_from_legacy("key.custom.p1.2"), "Custom.p1.2");
    /// assert_eq!(translator.canonical_from_legacy("key.brand_new"), "key.brand_new");
    /// ```
    pub fn canonical_from_legacy(&self, legacy: &str) -> String {
        self.resolve_legacy(legacy).code
    }

    /// Converts a canonical code to its legacy game identifier.
    ///
    /// Codes without a legacy alias are returned unchanged.
    #[must_use]
    pub fn legacy_from_canonical(&self, code: &str) -> String {
        if let Some(legacy) = self.catalog.get(code).and_then(|k| k.legacy.clone()) {
            return legacy;
        }
        custom::custom_legacy_from_code(code).unwrap_or_else(|| code.to_string())
    }

    /// Human-readable label for a canonical code.
    #[must_use]
    pub fn display_name(&self, code: &str) -> String {
        if let Some(key) = self.catalog.resolve(code) {
            return key.name.clone();
        }
        if code == DISABLED_SENTINEL {
            return "Disabled".to_string();
        }
        title_case_trailing_segment(code)
    }

    /// Returns true if `code` belongs to the canonical namespace: a catalog
    /// key, a custom or literal code, or the disabled sentinel.
    #[must_use]
    pub fn is_canonical(&self, code: &str) -> bool {
        self.catalog.contains(code)
            || custom::is_custom_code(code)
            || parse_literal_code(code).is_some()
            || code == DISABLED_SENTINEL
    }

    /// Normalizes a stored identifier to canonical form.
    ///
    /// Canonical codes are returned as-is; anything else is treated as a
    /// legacy identifier.
    pub fn normalize(&self, code: &str) -> String {
        if self.is_canonical(code) {
            code.to_string()
        } else {
            self.canonical_from_legacy(code)
        }
    }
}

/// Last-resort label: the trailing `.` segment of a code, title-cased with
/// `_` and `-` read as word breaks (`key.new_thing` → `New Thing`).
#[must_use]
pub fn title_case_trailing_segment(code: &str) -> String {
    let segment = match code.rsplit_once('.') {
        Some((_, tail)) if !tail.is_empty() => tail,
        _ => code,
    };

    segment
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
