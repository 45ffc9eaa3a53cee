//! Macro script export.
//!
//! Renders remap entries as AutoHotkey remap directives (`source::target`),
//! one line per entry. The output is a plain text artifact; nothing here
//! runs the script.

pub mod tokens;

use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashSet};
use std::fmt::Write as _;
use tracing::debug;

use crate::catalog::KeyCatalog;
use crate::constants::{APP_NAME, MACRO_SCRIPT_EXTENSION};
use crate::models::{Profile, RemapEntry, RemapTarget};
use crate::translate::NamespaceTranslator;

pub use tokens::{macro_token, token_for_code};

/// Default right-hand side for a disabled key.
pub const DEFAULT_DISABLED_DIRECTIVE: &str = "return";

/// Options for [`MacroExportEmitter::emit_script`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptOptions {
    /// Prepend a `;` comment header naming the profile
    pub include_header: bool,
    /// Timestamp written into the header
    pub generated_at: DateTime<Utc>,
}

impl Default for ScriptOptions {
    fn default() -> Self {
        Self {
            include_header: true,
            generated_at: Utc::now(),
        }
    }
}

/// Emits macro tool directives for remap entries.
#[derive(Debug, Clone)]
pub struct MacroExportEmitter<'a> {
    translator: NamespaceTranslator<'a>,
    disabled_directive: String,
}

impl<'a> MacroExportEmitter<'a> {
    /// Creates an emitter over `catalog`.
    #[must_use]
    pub fn new(catalog: &'a KeyCatalog) -> Self {
        Self {
            translator: NamespaceTranslator::new(catalog),
            disabled_directive: DEFAULT_DISABLED_DIRECTIVE.to_string(),
        }
    }

    /// Overrides what a disabled key is bound to.
    pub fn with_disabled_directive(mut self, directive: impl Into<String>) -> Self {
        self.disabled_directive = directive.into();
        self
    }

    /// Renders one directive line (without newline) for an entry.
    #[must_use]
    pub fn directive(&self, entry: &RemapEntry) -> String {
        let source = token_for_code(&entry.source_key, &self.translator);
        let target = match &entry.target_key {
            RemapTarget::Key(code) => token_for_code(code, &self.translator),
            RemapTarget::Disabled => self.disabled_directive.clone(),
        };
        format!("{source}::{target}")
    }

    /// Renders the directives for `entries`.
    ///
    /// When `selection` is given, only entries at those positions are
    /// emitted; positions outside the list are ignored. An entry whose source
    /// key was already emitted by an earlier selected entry is skipped, since
    /// a script cannot bind one hotkey twice. Output order follows `entries`.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyscheme::catalog::KeyCatalog;
    /// use keyscheme::export::MacroExportEmitter;
    /// use keyscheme::models::RemapEntry;
    ///
    /// let catalog = KeyCatalog::load().unwrap();
    /// let emitter = MacroExportEmitter::new(&catalog);
    /// let text = emitter.emit(&[RemapEntry::new("CapsLock", "ControlLeft")], None);
    /// assert_eq!(text, "CapsLock::LCtrl\n");
    /// ```
    #[must_use]
    pub fn emit(&self, entries: &[RemapEntry], selection: Option<&BTreeSet<usize>>) -> String {
        let mut emitted: HashSet<String> = HashSet::new();
        let mut output = String::new();

        for (position, entry) in entries.iter().enumerate() {
            if selection.is_some_and(|selected| !selected.contains(&position)) {
                continue;
            }
            if !emitted.insert(self.translator.normalize(&entry.source_key)) {
                debug!(
                    "Skipping export of entry {} ({}): source already exported",
                    position, entry.source_key
                );
                continue;
            }
            let _ = writeln!(output, "{}", self.directive(entry));
        }

        output
    }

    /// Renders a complete script for `profile`.
    #[must_use]
    pub fn emit_script(
        &self,
        profile: &Profile,
        selection: Option<&BTreeSet<usize>>,
        options: &ScriptOptions,
    ) -> String {
        let body = self.emit(&profile.remaps, selection);
        if !options.include_header {
            return body;
        }

        let mut output = String::new();
        let _ = writeln!(output, "; {APP_NAME} remap export");
        let _ = writeln!(output, "; Profile: {} ({})", profile.name, profile.id);
        let _ = writeln!(
            output,
            "; Generated: {}",
            options.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
        let _ = writeln!(output, "; Directives: {}", body.lines().count());
        output.push('\n');
        output.push_str(&body);
        output
    }
}

/// Suggested download file name for a profile's script.
#[must_use]
pub fn script_file_name(profile: &Profile) -> String {
    let stem: String = profile
        .name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    let stem = if stem.is_empty() { "profile".to_string() } else { stem };
    format!("{stem}.{MACRO_SCRIPT_EXTENSION}")
}
