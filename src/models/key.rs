//! Key identity data structures.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a physical input (or synthesized key).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCategory {
    /// A-Z
    Letter,
    /// 0-9 on the number row
    Digit,
    /// F1-F24
    Function,
    /// Shift, Ctrl, Alt, Win, Caps Lock
    Modifier,
    /// Arrows, Home/End, Page Up/Down
    Navigation,
    /// Numeric keypad
    Numpad,
    /// Enter, Tab, Backspace, Insert, Delete
    Editing,
    /// Punctuation keys
    Symbol,
    /// Space, Escape, Print Screen and friends
    Special,
    /// Mouse buttons and wheel
    Mouse,
    /// Keys that only exist on some national layouts
    LocaleSpecific,
    /// User-minted custom input (e.g. a G-key)
    Custom,
    /// Synthesized key carrying a raw character
    LiteralCharacter,
}

impl KeyCategory {
    /// Every category, in catalog display order.
    pub const ALL: [Self; 13] = [
        Self::Letter,
        Self::Digit,
        Self::Function,
        Self::Modifier,
        Self::Navigation,
        Self::Numpad,
        Self::Editing,
        Self::Symbol,
        Self::Special,
        Self::Mouse,
        Self::LocaleSpecific,
        Self::Custom,
        Self::LiteralCharacter,
    ];

    /// Stable snake_case identifier (matches the serialized form).
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Letter => "letter",
            Self::Digit => "digit",
            Self::Function => "function",
            Self::Modifier => "modifier",
            Self::Navigation => "navigation",
            Self::Numpad => "numpad",
            Self::Editing => "editing",
            Self::Symbol => "symbol",
            Self::Special => "special",
            Self::Mouse => "mouse",
            Self::LocaleSpecific => "locale_specific",
            Self::Custom => "custom",
            Self::LiteralCharacter => "literal_character",
        }
    }

    /// Parses a category identifier. Accepts hyphens in place of underscores.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        let normalized = id.trim().to_lowercase().replace('-', "_");
        Self::ALL.into_iter().find(|c| c.id() == normalized)
    }

    /// Returns true for categories whose keys type a single character.
    #[must_use]
    pub const fn is_textual(self) -> bool {
        matches!(self, Self::Letter | Self::Digit | Self::LiteralCharacter)
    }
}

impl fmt::Display for KeyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Physical position of a key on a reference ANSI layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayoutPosition {
    /// Row from the number row (0) down to the bottom row (4)
    pub row: u8,
    /// Column from the left edge
    pub col: u8,
}

/// A single physical input (or synthesized key) known to the catalog.
///
/// # Invariants
///
/// - `code` is unique within a catalog snapshot
/// - `legacy` is unique within a catalog snapshot when present
/// - `character` is set for letter, digit and literal-character keys only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyIdentifier {
    /// Canonical code (e.g., "KeyA", "ShiftLeft", "Custom.p1.0")
    pub code: String,
    /// Display name (e.g., "A", "Left Shift")
    pub name: String,
    /// Key category
    pub category: KeyCategory,
    /// Position on the reference layout, if the key has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<LayoutPosition>,
    /// Legacy game identifier (e.g., "key.a", "mouse.left")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy: Option<String>,
    /// Macro tool token (e.g., "a", "LShift")
    #[serde(default, rename = "macro", skip_serializing_if = "Option::is_none")]
    pub macro_alias: Option<String>,
    /// Character typed by this key (letters, digits, literal characters)
    #[serde(default, rename = "char", skip_serializing_if = "Option::is_none")]
    pub character: Option<char>,
}

impl KeyIdentifier {
    /// Builds a literal-character key for `ch`.
    ///
    /// Literal keys are never stored in the catalog; they are synthesized
    /// whenever a character has no dedicated physical key.
    #[must_use]
    pub fn literal(ch: char) -> Self {
        Self {
            code: literal_code(ch),
            name: ch.to_string(),
            category: KeyCategory::LiteralCharacter,
            position: None,
            legacy: None,
            macro_alias: None,
            character: Some(ch),
        }
    }

    /// Returns the single character this key renders to in a search string,
    /// or `None` when the key has no string rendering.
    #[must_use]
    pub fn rendered_char(&self) -> Option<char> {
        if self.category.is_textual() {
            self.character
        } else {
            None
        }
    }
}

impl fmt::Display for KeyIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

/// Canonical code of the literal-character key for `ch`.
#[must_use]
pub fn literal_code(ch: char) -> String {
    format!("{}{ch}", crate::constants::LITERAL_CODE_PREFIX)
}

/// Extracts the payload of a literal-character code (`Literal.å` → `å`).
///
/// Returns `None` unless the code carries exactly one character.
#[must_use]
pub fn parse_literal_code(code: &str) -> Option<char> {
    let payload = code.strip_prefix(crate::constants::LITERAL_CODE_PREFIX)?;
    let mut chars = payload.chars();
    let ch = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    Some(ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_id() {
        assert_eq!(KeyCategory::from_id("letter"), Some(KeyCategory::Letter));
        assert_eq!(
            KeyCategory::from_id("locale-specific"),
            Some(KeyCategory::LocaleSpecific)
        );
        assert_eq!(KeyCategory::from_id("Mouse"), Some(KeyCategory::Mouse));
        assert_eq!(KeyCategory::from_id("media"), None);
    }

    #[test]
    fn test_category_serializes_snake_case() {
        let json = serde_json::to_string(&KeyCategory::LiteralCharacter).unwrap();
        assert_eq!(json, "\"literal_character\"");
    }

    #[test]
    fn test_literal_key() {
        let key = KeyIdentifier::literal('å');
        assert_eq!(key.code, "Literal.å");
        assert_eq!(key.category, KeyCategory::LiteralCharacter);
        assert_eq!(key.rendered_char(), Some('å'));
    }

    #[test]
    fn test_parse_literal_code() {
        assert_eq!(parse_literal_code("Literal.å"), Some('å'));
        assert_eq!(parse_literal_code("Literal.."), Some('.'));
        assert_eq!(parse_literal_code("Literal."), None);
        assert_eq!(parse_literal_code("Literal.ab"), None);
        assert_eq!(parse_literal_code("KeyA"), None);
    }

    #[test]
    fn test_non_textual_key_has_no_rendering() {
        let key = KeyIdentifier {
            code: "ShiftLeft".to_string(),
            name: "Left Shift".to_string(),
            category: KeyCategory::Modifier,
            position: None,
            legacy: Some("key.lshift".to_string()),
            macro_alias: Some("LShift".to_string()),
            character: Some('x'),
        };
        assert_eq!(key.rendered_char(), None);
    }
}
