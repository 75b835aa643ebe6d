//! Lookup tables for resolving foreign-key style references.

use std::collections::BTreeMap;
use std::fmt;

/// Why a key could not be resolved to exactly one entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unresolved {
    /// No entry has this key
    Missing,
    /// Several entries share this key
    Ambiguous(usize),
}

impl fmt::Display for Unresolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unresolved::Missing => write!(f, "no matching entry"),
            Unresolved::Ambiguous(n) => write!(f, "{} entries share this key", n),
        }
    }
}

/// Identifier to auxiliary record map.
///
/// Every entry is kept, including entries with duplicate keys, so that a
/// reference to a duplicated key is reported as ambiguous instead of silently
/// picking one of them.
#[derive(Debug, Clone)]
pub struct LookupTable<V> {
    name: String,
    entries: BTreeMap<String, Vec<V>>,
}

impl<V> LookupTable<V> {
    /// Create an empty lookup table
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Index `entries` by the key `key_fn` extracts. Entries without a key are
    /// skipped.
    pub fn build<I, F>(name: impl Into<String>, entries: I, key_fn: F) -> Self
    where
        I: IntoIterator<Item = V>,
        F: Fn(&V) -> Option<String>,
    {
        let mut table = Self::new(name);
        for entry in entries {
            if let Some(key) = key_fn(&entry) {
                table.insert(key, entry);
            }
        }
        table
    }

    /// Add an entry under `key` (trimmed)
    pub fn insert(&mut self, key: impl AsRef<str>, value: V) {
        self.entries
            .entry(key.as_ref().trim().to_string())
            .or_default()
            .push(value);
    }

    /// Name used in error reports
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolve `key` to its single entry
    pub fn resolve(&self, key: &str) -> Result<&V, Unresolved> {
        match self.entries.get(key.trim()).map(Vec::as_slice) {
            None | Some([]) => Err(Unresolved::Missing),
            Some([value]) => Ok(value),
            Some(values) => Err(Unresolved::Ambiguous(values.len())),
        }
    }

    /// True when at least one entry has `key`
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key.trim())
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries were indexed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Keys that more than one entry shares, with their entry counts
    pub fn duplicate_keys(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries
            .iter()
            .filter(|(_, values)| values.len() > 1)
            .map(|(key, values)| (key.as_str(), values.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vendors() -> LookupTable<(&'static str, &'static str)> {
        LookupTable::build(
            "vendors",
            [
                ("V1", "Acme"),
                ("V2", "Globex"),
                ("V2", "Globex Corp"),
                ("", "Nameless"),
            ],
            |(id, _)| (!id.is_empty()).then(|| id.to_string()),
        )
    }

    #[test]
    fn test_resolve_single_entry() {
        let table = vendors();
        assert_eq!(table.resolve("V1"), Ok(&("V1", "Acme")));
        assert_eq!(table.resolve(" V1 "), Ok(&("V1", "Acme")));
    }

    #[test]
    fn test_resolve_missing_and_ambiguous() {
        let table = vendors();
        assert_eq!(table.resolve("V9"), Err(Unresolved::Missing));
        assert_eq!(table.resolve("V2"), Err(Unresolved::Ambiguous(2)));
        assert_eq!(table.duplicate_keys().collect::<Vec<_>>(), vec![("V2", 2)]);
    }

    #[test]
    fn test_keys_are_sorted_and_keyless_entries_skipped() {
        let table = vendors();
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["V1", "V2"]);
        assert_eq!(table.len(), 2);
    }
}
