//! Canonical key → macro tool token table.
//!
//! Tokens follow AutoHotkey key names. Letters are lower-cased, digits and
//! function keys pass through unchanged, modifiers get their left/right
//! prefixed names, and anything the table does not cover falls back to the
//! catalog's macro alias or, failing that, the canonical code itself.

use crate::models::{KeyCategory, KeyIdentifier};
use crate::translate::NamespaceTranslator;

/// Left/right prefixed modifier tokens.
const MODIFIER_TOKENS: &[(&str, &str)] = &[
    ("ShiftLeft", "LShift"),
    ("ShiftRight", "RShift"),
    ("ControlLeft", "LCtrl"),
    ("ControlRight", "RCtrl"),
    ("AltLeft", "LAlt"),
    ("AltRight", "RAlt"),
    ("MetaLeft", "LWin"),
    ("MetaRight", "RWin"),
];

/// Macro tool token for a catalog key.
#[must_use]
pub fn macro_token(key: &KeyIdentifier) -> String {
    match key.category {
        KeyCategory::Letter => key
            .character
            .map(|c| c.to_ascii_lowercase().to_string())
            .unwrap_or_else(|| fallback(key)),
        KeyCategory::Digit | KeyCategory::LiteralCharacter => key
            .character
            .map(String::from)
            .unwrap_or_else(|| fallback(key)),
        KeyCategory::Function => key.code.clone(),
        KeyCategory::Modifier => MODIFIER_TOKENS
            .iter()
            .find(|(code, _)| *code == key.code)
            .map(|(_, token)| (*token).to_string())
            .unwrap_or_else(|| fallback(key)),
        _ => fallback(key),
    }
}

/// Macro tool token for any stored identifier.
///
/// The identifier is normalized first, so legacy ids work too. Codes the
/// catalog cannot resolve are emitted verbatim.
#[must_use]
pub fn token_for_code(code: &str, translator: &NamespaceTranslator<'_>) -> String {
    let canonical = translator.normalize(code);
    translator
        .catalog()
        .resolve(&canonical)
        .map_or_else(|| canonical.clone(), |key| macro_token(&key))
}

fn fallback(key: &KeyIdentifier) -> String {
    key.macro_alias.clone().unwrap_or_else(|| key.code.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::KeyCatalog;

    fn token(code: &str) -> String {
        let catalog = KeyCatalog::load().unwrap();
        token_for_code(code, &NamespaceTranslator::new(&catalog))
    }

    #[test]
    fn test_letters_and_digits() {
        assert_eq!(token("KeyQ"), "q");
        assert_eq!(token("Digit7"), "7");
    }

    #[test]
    fn test_function_keys_pass_through() {
        assert_eq!(token("F1"), "F1");
        assert_eq!(token("F24"), "F24");
    }

    #[test]
    fn test_modifiers_are_side_prefixed() {
        assert_eq!(token("ShiftLeft"), "LShift");
        assert_eq!(token("ControlRight"), "RCtrl");
        assert_eq!(token("MetaLeft"), "LWin");
        assert_eq!(token("CapsLock"), "CapsLock");
    }

    #[test]
    fn test_catalog_aliases() {
        assert_eq!(token("MouseBack"), "XButton1");
        assert_eq!(token("PageDown"), "PgDn");
        assert_eq!(token("Numpad3"), "Numpad3");
    }

    #[test]
    fn test_legacy_identifiers_are_normalized() {
        assert_eq!(token("key.lctrl"), "LCtrl");
        assert_eq!(token("mouse.left"), "LButton");
    }

    #[test]
    fn test_unknown_and_synthesized_codes() {
        assert_eq!(token("Literal.ø"), "ø");
        assert_eq!(token("Custom.p1.0"), "Custom.p1.0");
        assert_eq!(token("key.hyper"), "key.hyper");
    }
}
