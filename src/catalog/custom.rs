//! Custom key allocation and the custom-key namespace grammar.
//!
//! Custom keys are inputs the static table does not know about (macro
//! G-keys, extra mouse buttons). Each profile owns its own counter, so two
//! profiles minting at the same time never contend for shared state.

use crate::constants::{CUSTOM_CODE_PREFIX, CUSTOM_LEGACY_PREFIX};
use regex::Regex;

/// Pattern for legacy identifiers in the custom namespace.
///
/// Capture group 1 holds the path segments after `key.custom.`.
pub const CUSTOM_LEGACY_PATTERN: &str = r"^key\.custom\.([A-Za-z0-9_-]+(?:\.[A-Za-z0-9_-]+)*)$";

/// Per-profile custom key counter.
///
/// The counter is persisted with the profile (`next_custom_key_index`) and
/// only ever moves forward: indices are never reused, even after the key
/// they named has been deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomKeyScope {
    scope: String,
    next_index: u64,
}

impl CustomKeyScope {
    /// Creates a scope for `scope` whose next allocation is `next_index`.
    ///
    /// The scope name is sanitized to the characters allowed in a single
    /// legacy path segment.
    pub fn new(scope: impl AsRef<str>, next_index: u64) -> Self {
        Self {
            scope: sanitize_segment(scope.as_ref()),
            next_index,
        }
    }

    /// Sanitized scope segment.
    #[must_use]
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Index the next mint will use.
    #[must_use]
    pub const fn next_index(&self) -> u64 {
        self.next_index
    }

    /// Takes the next index and advances the counter.
    pub(crate) fn allocate(&mut self) -> u64 {
        let index = self.next_index;
        self.next_index += 1;
        index
    }
}

/// Canonical code for custom key `index` in `scope`.
#[must_use]
pub fn custom_code(scope: &str, index: u64) -> String {
    format!("{CUSTOM_CODE_PREFIX}{scope}.{index}")
}

/// Legacy identifier for a custom canonical code (`Custom.a.1` → `key.custom.a.1`).
#[must_use]
pub fn custom_legacy_from_code(code: &str) -> Option<String> {
    if !is_custom_code(code) {
        return None;
    }
    let rest = code.strip_prefix(CUSTOM_CODE_PREFIX)?;
    Some(format!("{CUSTOM_LEGACY_PREFIX}{rest}"))
}

/// Derives the canonical code from a custom-namespace legacy identifier.
///
/// Derivation is purely textual, so the same legacy path always yields the
/// same canonical code regardless of any counter state.
#[must_use]
pub fn derive_custom_code(pattern: &Regex, legacy: &str) -> Option<String> {
    let captures = pattern.captures(legacy)?;
    let segments = captures.get(1)?.as_str();
    Some(format!("{CUSTOM_CODE_PREFIX}{segments}"))
}

/// Returns true if `code` is a well-formed custom canonical code.
///
/// The path after `Custom.` follows the same segment grammar as
/// [`CUSTOM_LEGACY_PATTERN`], so every accepted code has a legacy form that
/// derives back to it.
#[must_use]
pub fn is_custom_code(code: &str) -> bool {
    code.strip_prefix(CUSTOM_CODE_PREFIX)
        .is_some_and(|rest| rest.split('.').all(is_valid_segment))
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn sanitize_segment(raw: &str) -> String {
    let sanitized: String = raw
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.is_empty() {
        "default".to_string()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern() -> Regex {
        Regex::new(CUSTOM_LEGACY_PATTERN).unwrap()
    }

    #[test]
    fn test_scope_sanitizes_name() {
        let scope = CustomKeyScope::new("my profile.v2", 0);
        assert_eq!(scope.scope(), "my_profile_v2");
        assert_eq!(CustomKeyScope::new("  ", 0).scope(), "default");
    }

    #[test]
    fn test_allocate_is_monotonic() {
        let mut scope = CustomKeyScope::new("p1", 5);
        assert_eq!(scope.allocate(), 5);
        assert_eq!(scope.allocate(), 6);
        assert_eq!(scope.next_index(), 7);
    }

    #[test]
    fn test_derive_custom_code() {
        let re = pattern();
        assert_eq!(
            derive_custom_code(&re, "key.custom.p1.3"),
            Some("Custom.p1.3".to_string())
        );
        assert_eq!(
            derive_custom_code(&re, "key.custom.legacy"),
            Some("Custom.legacy".to_string())
        );
        assert_eq!(derive_custom_code(&re, "key.custom."), None);
        assert_eq!(derive_custom_code(&re, "key.custom.a..b"), None);
        assert_eq!(derive_custom_code(&re, "key.a"), None);
    }

    #[test]
    fn test_custom_legacy_round_trip() {
        let re = pattern();
        let code = custom_code("p1", 9);
        let legacy = custom_legacy_from_code(&code).unwrap();
        assert_eq!(legacy, "key.custom.p1.9");
        assert_eq!(derive_custom_code(&re, &legacy), Some(code));
    }

    #[test]
    fn test_is_custom_code() {
        assert!(is_custom_code("Custom.p1.0"));
        assert!(is_custom_code("Custom.legacy"));
        assert!(!is_custom_code("Custom."));
        assert!(!is_custom_code("KeyA"));
        assert!(!is_custom_code("Custom.a b.0"));
        assert!(!is_custom_code("Custom.a..0"));
        assert!(!is_custom_code("Custom.p1."));
        assert_eq!(custom_legacy_from_code("Custom.a b.0"), None);
    }

    #[test]
    fn test_every_custom_code_derives_back_from_its_legacy_form() {
        let re = pattern();
        for code in ["Custom.p1.0", "Custom.my-profile_2.17", "Custom.legacy"] {
            assert!(is_custom_code(code));
            let legacy = custom_legacy_from_code(code).unwrap();
            assert_eq!(derive_custom_code(&re, &legacy).as_deref(), Some(code));
        }
    }
}
