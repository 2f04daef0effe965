//! English-to-source alignment.
//!
//! Each English word is resolved by a fixed cascade; the first rule whose
//! trigger matches decides, even when its decision is "no entry":
//!
//! 1. possessives ("my", "his")
//! 2. "he", only when the sentence has a bound clitic
//! 3. future auxiliaries ("will", "shall")
//! 4. third-person objects ("him", "him/it")
//! 5. let-collocations ("let", "lets", "letting", "in", "out")
//! 6. plain dictionary lookup
//!
//! Grammatical markers come first because they are unambiguous; content
//! words only ever reach the lookup.

use gloss_morph::{first_free, has_clitic_reading};
use gloss_protocol::{EntryId, GrammarProfile, HighlightKey};
use tracing::debug;

use crate::lexicon::DictionaryIndex;

/// Half-width of the window searched for a let particle.
pub const LET_WINDOW: usize = 4;

const LET_FORMS: [&str; 5] = ["let", "lets", "letting", "in", "out"];
const OBJECT_FORMS: [&str; 2] = ["him", "himit"];
const FUTURE_FORMS: [&str; 2] = ["will", "shall"];

/// The entry an English word denotes, and the key it highlights under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    pub entry: EntryId,
    pub key: HighlightKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetSense {
    In,
    Out,
}

/// Picks the let sense from a 9-token window centred on `index`.
/// "out" is checked before "in".
pub fn let_sense_for_index<S: AsRef<str>>(normalized: &[S], index: usize) -> Option<LetSense> {
    if normalized.is_empty() {
        return None;
    }
    let start = index.saturating_sub(LET_WINDOW);
    let end = (index + LET_WINDOW + 1).min(normalized.len());
    let window = &normalized[start..end];

    if window.iter().any(|w| w.as_ref() == "out") {
        Some(LetSense::Out)
    } else if window.iter().any(|w| w.as_ref() == "in") {
        Some(LetSense::In)
    } else {
        None
    }
}

pub struct AlignmentResolver<'a> {
    index: &'a DictionaryIndex,
    profile: &'a GrammarProfile,
}

impl<'a> AlignmentResolver<'a> {
    pub fn new(index: &'a DictionaryIndex, profile: &'a GrammarProfile) -> Self {
        Self { index, profile }
    }

    /// Resolves the English word at `index`.
    ///
    /// `normalized` is the sentence's normalized English stream and
    /// `source_keys` its source keys.
    pub fn resolve_english<S: AsRef<str>>(
        &self,
        normalized: &[S],
        index: usize,
        source_keys: &[HighlightKey],
    ) -> Option<Alignment> {
        let word = normalized.get(index)?.as_ref();

        match word {
            "my" => return self.designated(&self.profile.first_person),
            "his" => return self.designated(&self.profile.default_third_person_object),
            _ => {}
        }

        if word == "he" && has_clitic_reading(source_keys) {
            let entry = self.entry_for(&self.profile.clitic_form)?;
            return Some(Alignment {
                entry,
                key: HighlightKey::clitic(&self.profile.clitic_form),
            });
        }

        if FUTURE_FORMS.contains(&word) {
            let marker = self
                .future_marker(source_keys)
                .unwrap_or(self.profile.interrogative_future.as_str());
            return self.designated(marker);
        }

        if OBJECT_FORMS.contains(&word) {
            return self.designated(self.pick_third_person_object_source(source_keys));
        }

        if LET_FORMS.contains(&word) {
            return match let_sense_for_index(normalized, index)? {
                LetSense::Out => self.designated(&self.profile.let_out),
                LetSense::In => self.designated(&self.profile.let_in),
            };
        }

        let entry = self.index.by_english_form(word)?;
        let form = &self.index.entry(entry)?.source_form;
        Some(Alignment {
            entry,
            key: HighlightKey::free(form),
        })
    }

    /// A trailing `?` stands in for the future marker of its sentence.
    /// Other marks never align.
    pub fn resolve_punctuation(&self, mark: char, source_keys: &[HighlightKey]) -> Option<Alignment> {
        if mark != '?' {
            return None;
        }
        self.designated(self.future_marker(source_keys)?)
    }

    /// Chooses between the two competing third-person object markers.
    ///
    /// Only free readings count; with both present the earlier one wins.
    /// With neither present the object marker is the fallback.
    pub fn pick_third_person_object_source(&self, source_keys: &[HighlightKey]) -> &'a str {
        let primary: &'a str = &self.profile.object_marker;
        let alternate: &'a str = &self.profile.alternate_object_marker;

        match (first_free(source_keys, primary), first_free(source_keys, alternate)) {
            (Some(p), Some(a)) if a < p => alternate,
            (None, Some(_)) => alternate,
            _ => primary,
        }
    }

    /// The future marker present in the sentence, interrogative first.
    fn future_marker(&self, source_keys: &[HighlightKey]) -> Option<&'a str> {
        let present = |form: &str| !form.is_empty() && source_keys.iter().any(|key| key.form() == form);

        if present(&self.profile.interrogative_future) {
            Some(self.profile.interrogative_future.as_str())
        } else if present(&self.profile.declarative_future) {
            Some(self.profile.declarative_future.as_str())
        } else {
            None
        }
    }

    fn designated(&self, form: &str) -> Option<Alignment> {
        let entry = self.entry_for(form)?;
        Some(Alignment {
            entry,
            key: HighlightKey::free(form),
        })
    }

    fn entry_for(&self, form: &str) -> Option<EntryId> {
        let entry = self.index.by_source_form(form);
        if entry.is_none() {
            debug!(form, "designated form has no dictionary entry");
        }
        entry
    }
}
