//! Forward and reverse remap resolution.
//!
//! A [`RemapIndex`] is built from a profile's remap entries in one pass and
//! is immutable afterwards; any change to the entry set requires a rebuild.
//!
//! Resolution is single-hop: the output of a remap is what the game sees,
//! it is not fed through the remap table a second time.
//!
//! # Ordering rules
//!
//! - If several entries share a source key, only the first one is
//!   effective. Later ones are ignored for both directions.
//! - If several effective entries share a target key (many-to-one), the
//!   reverse lookup returns the source of the first of them.

use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::models::{RemapEntry, RemapTarget};
use crate::translate::NamespaceTranslator;

/// Forward/reverse lookup tables for one set of remap entries.
#[derive(Debug, Clone, Default)]
pub struct RemapIndex {
    /// Normalized entries in input order
    entries: Vec<RemapEntry>,
    /// Whether each entry (by position) is the effective one for its source
    effective: Vec<bool>,
    /// source → target
    forward: HashMap<String, RemapTarget>,
    /// target → source (first effective entry wins)
    reverse: HashMap<String, String>,
}

impl RemapIndex {
    /// Builds the index, normalizing every source and target through
    /// `translator` so legacy identifiers in stored entries still resolve.
    pub fn build(entries: &[RemapEntry], translator: &NamespaceTranslator<'_>) -> Self {
        let mut index = Self {
            entries: Vec::with_capacity(entries.len()),
            effective: Vec::with_capacity(entries.len()),
            forward: HashMap::with_capacity(entries.len()),
            reverse: HashMap::with_capacity(entries.len()),
        };

        for entry in entries {
            let source = translator.normalize(&entry.source_key);
            let target = match &entry.target_key {
                RemapTarget::Key(code) => RemapTarget::Key(translator.normalize(code)),
                RemapTarget::Disabled => RemapTarget::Disabled,
            };

            let is_effective = !index.forward.contains_key(&source);
            if is_effective {
                index.forward.insert(source.clone(), target.clone());
                if let RemapTarget::Key(code) = &target {
                    index
                        .reverse
                        .entry(code.clone())
                        .or_insert_with(|| source.clone());
                }
            } else {
                debug!(
                    "Ignoring remap {} -> {}: source already mapped",
                    source, target
                );
            }

            index.effective.push(is_effective);
            index.entries.push(RemapEntry {
                source_key: source,
                target_key: target,
            });
        }

        debug!(
            "Built remap index: {} entries, {} effective",
            index.entries.len(),
            index.forward.len()
        );

        index
    }

    /// What pressing `physical` is remapped to.
    ///
    /// `None` means no remap is configured and the key behaves as itself.
    #[must_use]
    pub fn forward_target(&self, physical: &str) -> Option<&RemapTarget> {
        self.forward.get(physical)
    }

    /// The physical key to press in order to produce `intended`.
    ///
    /// Falls back to `intended` itself when no remap targets it.
    #[must_use]
    pub fn reverse_source<'s>(&'s self, intended: &'s str) -> &'s str {
        self.reverse
            .get(intended)
            .map_or(intended, String::as_str)
    }

    /// What pressing `physical` actually produces: its remap target, itself
    /// when unmapped, or `None` when the key is disabled.
    #[must_use]
    pub fn effective_output<'s>(&'s self, physical: &'s str) -> Option<&'s str> {
        match self.forward.get(physical) {
            Some(RemapTarget::Key(code)) => Some(code),
            Some(RemapTarget::Disabled) => None,
            None => Some(physical),
        }
    }

    /// Returns true if the entry at `position` is the one consulted for its
    /// source key. Out-of-range positions are not effective.
    #[must_use]
    pub fn is_effective(&self, position: usize) -> bool {
        self.effective.get(position).copied().unwrap_or(false)
    }

    /// Normalized entries in input order (including shadowed duplicates).
    #[must_use]
    pub fn entries(&self) -> &[RemapEntry] {
        &self.entries
    }

    /// Number of effective forward mappings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Returns true if no key is remapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Positions of entries shadowed by an earlier entry with the same source.
    #[must_use]
    pub fn shadowed_entries(&self) -> Vec<usize> {
        self.effective
            .iter()
            .enumerate()
            .filter(|(_, effective)| !**effective)
            .map(|(position, _)| position)
            .collect()
    }

    /// Targets reached from more than one physical key, with their sources
    /// in input order. The first source is the one reverse lookup returns.
    #[must_use]
    pub fn many_to_one_targets(&self) -> Vec<(String, Vec<String>)> {
        let mut order: Vec<String> = Vec::new();
        let mut sources: HashMap<&str, Vec<String>> = HashMap::new();

        for (entry, effective) in self.entries.iter().zip(&self.effective) {
            if !effective {
                continue;
            }
            if let RemapTarget::Key(target) = &entry.target_key {
                let list = sources.entry(target.as_str()).or_default();
                if list.is_empty() {
                    order.push(target.clone());
                }
                list.push(entry.source_key.clone());
            }
        }

        order
            .into_iter()
            .filter_map(|target| {
                let list = sources.remove(target.as_str())?;
                (list.len() > 1).then_some((target, list))
            })
            .collect()
    }

    /// Remap cycles (e.g. a swap `A → B`, `B → A`), each reported once,
    /// starting from the member that appears first in the entry list.
    /// Identity remaps (`A → A`) are not cycles.
    #[must_use]
    pub fn cycles(&self) -> Vec<Vec<String>> {
        let mut in_cycle: HashSet<&str> = HashSet::new();
        let mut cycles = Vec::new();

        for (entry, effective) in self.entries.iter().zip(&self.effective) {
            let start = entry.source_key.as_str();
            if !effective || in_cycle.contains(start) {
                continue;
            }

            let mut path = vec![start];
            let mut current = start;
            while let Some(RemapTarget::Key(next)) = self.forward.get(current) {
                let next = next.as_str();
                if next == start {
                    if path.len() > 1 {
                        in_cycle.extend(path.iter().copied());
                        cycles.push(path.iter().map(|s| (*s).to_string()).collect());
                    }
                    break;
                }
                if path.contains(&next) {
                    break;
                }
                path.push(next);
                current = next;
            }
        }

        cycles
    }
}
