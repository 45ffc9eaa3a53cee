//! Profile validation before saving or exporting.
//!
//! Errors block persistence: a profile whose search craft literals cannot be
//! typed under its own remaps must be fixed first. Everything the engine
//! tolerates (remap cycles, many-to-one targets, unknown
//! identifiers) is reported as a warning only.

// Allow format! appended to String - more readable for building messages
#![allow(clippy::format_push_string)]

use serde::Serialize;
use std::collections::HashSet;

use crate::catalog::{custom, KeyCatalog};
use crate::constants::MAX_ITEM_REFS;
use crate::models::{Profile, RemapTarget};
use crate::remap::RemapIndex;
use crate::search::{SearchCodecError, SearchStringCodec};
use crate::translate::NamespaceTranslator;

/// Validation result with specific errors and warnings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    /// Problems that block saving
    pub errors: Vec<ValidationError>,
    /// Non-blocking observations
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// Creates a new empty validation report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Returns true if there are no errors (warnings are allowed).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Adds an error to the report.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Adds a warning to the report.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Formats the report as a user-friendly message.
    #[must_use]
    pub fn format_message(&self) -> String {
        let mut message = String::new();

        if !self.errors.is_empty() {
            message.push_str(&format!("❌ {} validation errors:\n", self.errors.len()));
            for (idx, error) in self.errors.iter().enumerate() {
                message.push_str(&format!("  {}. {}\n", idx + 1, error));
            }
        }

        if !self.warnings.is_empty() {
            message.push_str(&format!("\n⚠️  {} warnings:\n", self.warnings.len()));
            for (idx, warning) in self.warnings.iter().enumerate() {
                message.push_str(&format!("  {}. {}\n", idx + 1, warning));
            }
        }

        message
    }
}

/// Validation error with context.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationError {
    /// Type of validation error
    pub kind: ValidationErrorKind,
    /// Search craft sequence number, if the error concerns one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u32>,
    /// Human-readable error message
    pub message: String,
    /// Optional suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            sequence: None,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Sets the search craft context.
    #[must_use]
    pub const fn with_sequence(mut self, sequence: u32) -> Self {
        self.sequence = Some(sequence);
        self
    }

    /// Sets a suggestion for fixing the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(sequence) = self.sequence {
            write!(f, "[Search #{}] {}: {}", sequence, self.kind, self.message)?;
        } else {
            write!(f, "{}: {}", self.kind, self.message)?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n    → {suggestion}")?;
        }

        Ok(())
    }
}

/// Types of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// Search literal longer than the limit
    LiteralTooLong,
    /// Search literal contains characters no key produces
    UnresolvableCharacters,
    /// More content references than allowed
    TooManyItemRefs,
    /// Two search craft entries share a sequence number
    DuplicateSequence,
    /// Custom key record outside the custom namespace or duplicated
    InvalidCustomKey,
}

impl std::fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LiteralTooLong => write!(f, "Literal Too Long"),
            Self::UnresolvableCharacters => write!(f, "Unresolvable Characters"),
            Self::TooManyItemRefs => write!(f, "Too Many Item References"),
            Self::DuplicateSequence => write!(f, "Duplicate Sequence"),
            Self::InvalidCustomKey => write!(f, "Invalid Custom Key"),
        }
    }
}

/// Validation warning (non-blocking).
#[derive(Debug, Clone, Serialize)]
pub struct ValidationWarning {
    /// Warning message
    pub message: String,
}

impl ValidationWarning {
    /// Creates a new validation warning
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Profile validator.
///
/// `catalog` should be the profile's snapshot (see
/// [`Profile::catalog_snapshot`]) so custom keys resolve.
pub struct ProfileValidator<'a> {
    profile: &'a Profile,
    catalog: &'a KeyCatalog,
}

impl<'a> ProfileValidator<'a> {
    /// Creates a new profile validator.
    #[must_use]
    pub const fn new(profile: &'a Profile, catalog: &'a KeyCatalog) -> Self {
        Self { profile, catalog }
    }

    /// Validates the profile.
    ///
    /// Checks:
    /// - Search craft literals encode under the current remaps
    /// - Search craft entries have unique sequences and at most three refs
    /// - Custom key records are well formed
    /// - Remap entries (warnings only)
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        let translator = NamespaceTranslator::new(self.catalog);
        let index = RemapIndex::build(&self.profile.remaps, &translator);

        self.validate_search_crafts(&mut report, &index);
        self.validate_custom_keys(&mut report);
        self.validate_remaps(&mut report, &translator, &index);

        report
    }

    fn validate_search_crafts(&self, report: &mut ValidationReport, index: &RemapIndex) {
        if !self.profile.search_craft_enabled && !self.profile.search_crafts.is_empty() {
            report.add_warning(ValidationWarning::new(format!(
                "Search crafting is disabled but {} entries are stored; they will be dropped",
                self.profile.search_crafts.len()
            )));
        }

        let codec = SearchStringCodec::new(self.catalog);
        let mut seen_sequences = HashSet::new();

        for entry in &self.profile.search_crafts {
            if !seen_sequences.insert(entry.sequence) {
                report.add_error(
                    ValidationError::new(
                        ValidationErrorKind::DuplicateSequence,
                        format!("Sequence {} is used more than once", entry.sequence),
                    )
                    .with_sequence(entry.sequence),
                );
            }

            if entry.has_too_many_refs() {
                report.add_error(
                    ValidationError::new(
                        ValidationErrorKind::TooManyItemRefs,
                        format!(
                            "{} content references attached (maximum {})",
                            entry.item_refs.len(),
                            MAX_ITEM_REFS
                        ),
                    )
                    .with_sequence(entry.sequence)
                    .with_suggestion("Remove the extra references"),
                );
            }

            match codec.encode(&entry.literal, index) {
                Ok(encoded) => {
                    if encoded.intended_codes() != entry.intended_keys
                        || encoded.physical_codes() != entry.physical_keys
                    {
                        report.add_warning(ValidationWarning::new(format!(
                            "Search #{}: stored key sequence is out of date and will be refreshed",
                            entry.sequence
                        )));
                    }
                }
                Err(err @ SearchCodecError::TooLong { .. }) => report.add_error(
                    ValidationError::new(ValidationErrorKind::LiteralTooLong, err.to_string())
                        .with_sequence(entry.sequence)
                        .with_suggestion("Shorten the search text"),
                ),
                Err(err) => report.add_error(
                    ValidationError::new(
                        ValidationErrorKind::UnresolvableCharacters,
                        err.to_string(),
                    )
                    .with_sequence(entry.sequence)
                    .with_suggestion("Remap a key to each listed character or change the text"),
                ),
            }
        }
    }

    fn validate_custom_keys(&self, report: &mut ValidationReport) {
        let mut seen = HashSet::new();
        for record in &self.profile.custom_keys {
            if !custom::is_custom_code(&record.code) {
                report.add_error(ValidationError::new(
                    ValidationErrorKind::InvalidCustomKey,
                    format!("'{}' is not a custom key code", record.code),
                ));
            } else if !seen.insert(record.code.as_str()) {
                report.add_error(ValidationError::new(
                    ValidationErrorKind::InvalidCustomKey,
                    format!("Custom key '{}' is recorded twice", record.code),
                ));
            }
        }
    }

    fn validate_remaps(
        &self,
        report: &mut ValidationReport,
        translator: &NamespaceTranslator<'_>,
        index: &RemapIndex,
    ) {
        for (position, entry) in self.profile.remaps.iter().enumerate() {
            let mut codes = vec![entry.source_key.as_str()];
            if let RemapTarget::Key(target) = &entry.target_key {
                codes.push(target);
            }
            for code in codes {
                if !self.is_known(translator, code) {
                    report.add_warning(ValidationWarning::new(format!(
                        "Remap #{position}: unknown key identifier '{code}' is kept as-is"
                    )));
                }
            }
        }

        for position in index.shadowed_entries() {
            report.add_warning(ValidationWarning::new(format!(
                "Remap #{}: '{}' is already remapped by an earlier entry; this one is ignored",
                position,
                translator.display_name(&index.entries()[position].source_key)
            )));
        }

        for (target, sources) in index.many_to_one_targets() {
            let names: Vec<String> = sources.iter().map(|s| translator.display_name(s)).collect();
            report.add_warning(ValidationWarning::new(format!(
                "'{}' is produced by {}; search crafts use {}",
                translator.display_name(&target),
                names.join(", "),
                names[0]
            )));
        }

        for cycle in index.cycles() {
            let names: Vec<String> = cycle.iter().map(|c| translator.display_name(c)).collect();
            report.add_warning(ValidationWarning::new(format!(
                "Remap cycle: {}",
                names.join(" → ")
            )));
        }
    }

    fn is_known(&self, translator: &NamespaceTranslator<'_>, code: &str) -> bool {
        translator.is_canonical(code)
            || self.catalog.get_by_legacy(code).is_some()
            || self.catalog.derive_custom_code(code).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CustomKeyRecord, RemapEntry, SearchCraftEntry};

    fn catalog() -> KeyCatalog {
        KeyCatalog::load().unwrap()
    }

    #[test]
    fn test_clean_profile_is_valid() {
        let catalog = catalog();
        let mut profile = Profile::new("Clean").unwrap();
        profile.set_remap(&catalog, "KeyQ", "Literal.å");
        profile.add_search_craft("åa", vec![]);
        profile.refresh_derived(&catalog);

        let report = ProfileValidator::new(&profile, &catalog).validate();
        assert!(report.is_valid(), "{}", report.format_message());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_unresolvable_literal_is_an_error() {
        let catalog = catalog();
        let mut profile = Profile::new("Broken").unwrap();
        let seq = profile.add_search_craft("øx", vec![]);

        let report = ProfileValidator::new(&profile, &catalog).validate();
        assert!(!report.is_valid());
        assert_eq!(report.errors[0].kind, ValidationErrorKind::UnresolvableCharacters);
        assert_eq!(report.errors[0].sequence, Some(seq));
        assert!(report.errors[0].message.contains("'ø'"));
    }

    #[test]
    fn test_too_long_and_too_many_refs() {
        let catalog = catalog();
        let mut profile = Profile::new("Long").unwrap();
        profile.search_crafts.push(SearchCraftEntry::new(
            0,
            "abcdef",
            vec!["1".into(), "2".into(), "3".into(), "4".into()],
        ));
        profile.search_crafts.push(SearchCraftEntry::new(0, "a", vec![]));

        let report = ProfileValidator::new(&profile, &catalog).validate();
        let kinds: Vec<_> = report.errors.iter().map(|e| e.kind).collect();
        assert!(kinds.contains(&ValidationErrorKind::LiteralTooLong));
        assert!(kinds.contains(&ValidationErrorKind::TooManyItemRefs));
        assert!(kinds.contains(&ValidationErrorKind::DuplicateSequence));
    }

    #[test]
    fn test_tolerated_remap_shapes_are_warnings() {
        let catalog = catalog();
        let mut profile = Profile::new("Odd").unwrap();
        profile.remaps = vec![
            RemapEntry::new("KeyA", "KeyB"),
            RemapEntry::new("KeyB", "KeyA"),
            RemapEntry::new("KeyC", "KeyA"),
            RemapEntry::new("KeyA", "KeyZ"),
            RemapEntry::new("key.hyper", "KeyD"),
        ];

        let report = ProfileValidator::new(&profile, &catalog).validate();
        assert!(report.is_valid());
        let text = report.format_message();
        assert!(text.contains("Remap cycle: A → B"));
        assert!(text.contains("'A' is produced by B, C"));
        assert!(text.contains("Remap #3"));
        assert!(text.contains("unknown key identifier 'key.hyper'"));
    }

    #[test]
    fn test_stale_derived_fields_warn() {
        let catalog = catalog();
        let mut profile = Profile::new("Stale").unwrap();
        profile.add_search_craft("ab", vec![]);
        profile.refresh_derived(&catalog);
        profile.remaps.push(RemapEntry::new("KeyB", "KeyA"));
        profile.remaps.push(RemapEntry::new("KeyA", "KeyB"));

        let report = ProfileValidator::new(&profile, &catalog).validate();
        assert!(report.is_valid());
        assert!(report.warnings.iter().any(|w| w.message.contains("out of date")));
    }

    #[test]
    fn test_invalid_custom_keys() {
        let catalog = catalog();
        let mut profile = Profile::new("Custom").unwrap();
        profile.custom_keys = vec![
            CustomKeyRecord { code: "Custom.p.0".into(), label: "G1".into() },
            CustomKeyRecord { code: "Custom.p.0".into(), label: "G1".into() },
            CustomKeyRecord { code: "KeyA".into(), label: "A".into() },
            CustomKeyRecord { code: "Custom.a b.0".into(), label: "Bad".into() },
        ];

        let report = ProfileValidator::new(&profile, &catalog).validate();
        assert_eq!(
            report
                .errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::InvalidCustomKey)
                .count(),
            3
        );
    }
}
