use std::collections::HashMap;

use gloss_protocol::{ConfigError, EntryId, LexicalEntry};
use tracing::debug;

use crate::parser::normalize_english;

/// Both lookup directions over the dictionary, built once at load.
#[derive(Debug, Clone, Default)]
pub struct DictionaryIndex {
    entries: Vec<LexicalEntry>,
    by_source: HashMap<String, EntryId>,
    by_english: HashMap<String, EntryId>,
}

impl DictionaryIndex {
    /// Rejects a source form declared twice. English surface forms that
    /// collide across entries are not an error: the entry declared later
    /// takes the form over.
    pub fn build(entries: Vec<LexicalEntry>) -> Result<Self, ConfigError> {
        let mut by_source = HashMap::with_capacity(entries.len());
        let mut by_english = HashMap::new();

        for (position, entry) in entries.iter().enumerate() {
            let id = EntryId(position as u32);
            if by_source.insert(entry.source_form.clone(), id).is_some() {
                return Err(ConfigError::DuplicateSourceForm(entry.source_form.clone()));
            }

            for form in entry.surface_forms() {
                let normalized = normalize_english(form);
                if normalized.is_empty() {
                    continue;
                }
                if let Some(previous) = by_english.insert(normalized.clone(), id) {
                    if previous != id {
                        debug!(
                            form = %normalized,
                            previous = %entries[previous.0 as usize].source_form,
                            winner = %entry.source_form,
                            "english surface form re-registered"
                        );
                    }
                }
            }
        }

        Ok(Self {
            entries,
            by_source,
            by_english,
        })
    }

    pub fn entry(&self, id: EntryId) -> Option<&LexicalEntry> {
        self.entries.get(id.0 as usize)
    }

    pub fn by_source_form(&self, source_form: &str) -> Option<EntryId> {
        self.by_source.get(source_form).copied()
    }

    /// Lookup by an already normalized English key.
    pub fn by_english_form(&self, normalized: &str) -> Option<EntryId> {
        self.by_english.get(normalized).copied()
    }

    /// Normalizes `word` before looking it up.
    pub fn lookup_english(&self, word: &str) -> Option<EntryId> {
        self.by_english_form(&normalize_english(word))
    }

    pub fn entries(&self) -> impl Iterator<Item = (EntryId, &LexicalEntry)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (EntryId(position as u32), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_duplicate_source_form_rejected() {
        let result = DictionaryIndex::build(vec![
            LexicalEntry::new("учу", "couscous"),
            LexicalEntry::new("учу", "semolina"),
        ]);
        assert_eq!(
            result.unwrap_err(),
            ConfigError::DuplicateSourceForm("учу".to_string())
        );
    }

    #[test]
    fn test_later_entry_wins_english_collision() {
        let index = DictionaryIndex::build(vec![
            LexicalEntry::new("и", "he / him").with_forms(&["him"]),
            LexicalEntry::new("с", "him / it").with_forms(&["Him", "it"]),
        ])
        .unwrap();

        assert_eq!(index.lookup_english("him"), index.by_source_form("с"));
        assert_eq!(index.lookup_english("IT."), index.by_source_form("с"));
        assert_eq!(index.by_english_form("himit"), None);
    }

    #[test]
    fn test_gloss_label_registered_when_no_forms() {
        let index = DictionaryIndex::build(vec![LexicalEntry::new("учу", "Couscous")]).unwrap();
        let id = index.lookup_english("couscous").unwrap();
        assert_eq!(index.entry(id).unwrap().source_form, "учу");
        assert_eq!(index.lookup_english(""), None);
    }

    proptest! {
        #[test]
        fn test_english_lookup_lands_on_indexed_source(
            glosses in proptest::collection::vec("[a-z]{1,6}", 1..12)
        ) {
            let entries: Vec<LexicalEntry> = glosses
                .iter()
                .enumerate()
                .map(|(i, gloss)| LexicalEntry::new(&format!("src{i}"), gloss))
                .collect();
            let index = DictionaryIndex::build(entries).unwrap();

            for (_, entry) in index.entries() {
                for form in entry.surface_forms() {
                    let hit = index.lookup_english(form).unwrap();
                    let owner = index.entry(hit).unwrap();
                    prop_assert_eq!(index.by_source_form(&owner.source_form), Some(hit));
                }
            }
        }
    }
}
