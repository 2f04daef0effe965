//! Which rendered tokens light up for the current selection.
//!
//! The selection is a single value owned by [`HighlightState`]; every query
//! below is a pure function of that value and the analyzed corpus.

use gloss_parser::parser::normalize_english;
use gloss_parser::{AnalyzedSentence, GlossCorpus};
use gloss_protocol::{ActiveSelection, EntryId, HighlightKey, LexicalEntry, SentenceId, Side, TokenSlot};
use tracing::debug;

/// The one mutable cell of the engine. Hover events replace it wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightState {
    active: Option<ActiveSelection>,
}

impl HighlightState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&ActiveSelection> {
        self.active.as_ref()
    }

    /// Hover-enter on a source token. Tokens without a dictionary entry
    /// leave the state untouched.
    pub fn hover_source(&mut self, corpus: &GlossCorpus, id: SentenceId, index: usize) -> bool {
        let Some(key) = corpus.sentence(id).and_then(|s| s.source_keys.get(index)) else {
            return false;
        };
        let Some(entry) = corpus
            .dictionary()
            .by_source_form(key.form())
            .and_then(|entry| corpus.dictionary().entry(entry))
        else {
            debug!(sentence = %id, index, token = %key, "hover on unglossed source token ignored");
            return false;
        };

        self.active = Some(ActiveSelection::from_source(
            key.clone(),
            Some(normalize_english(&entry.gloss_label)),
        ));
        true
    }

    /// Hover-enter on an English word or its trailing mark.
    ///
    /// A no-op unless the slot aligns to an entry whose key the sentence's
    /// source line actually contains.
    pub fn hover_english(&mut self, corpus: &GlossCorpus, id: SentenceId, slot: TokenSlot) -> bool {
        let Some(sentence) = corpus.sentence(id) else {
            return false;
        };
        let (Some(alignment), Some(token)) = (sentence.alignment(slot), sentence.english_key(slot)) else {
            return false;
        };
        if !sentence.contains_key(&alignment.key) {
            debug!(sentence = %id, ?slot, key = %alignment.key, "aligned entry absent from source line");
            return false;
        }

        self.active = Some(ActiveSelection::from_english(alignment.key.clone(), token));
        true
    }

    /// Hover-enter on a dictionary panel row.
    pub fn hover_dictionary(&mut self, corpus: &GlossCorpus, entry: EntryId) -> bool {
        let Some(entry) = corpus.dictionary().entry(entry) else {
            return false;
        };
        self.active = Some(ActiveSelection::from_source(
            HighlightKey::free(&entry.source_form),
            Some(normalize_english(&entry.gloss_label)),
        ));
        true
    }

    /// Hover-leave, from anywhere.
    pub fn clear(&mut self) {
        self.active = None;
    }
}

pub fn is_source_token_highlighted(
    corpus: &GlossCorpus,
    active: Option<&ActiveSelection>,
    id: SentenceId,
    index: usize,
) -> bool {
    let (Some(active), Some(sentence)) = (active, corpus.sentence(id)) else {
        return false;
    };
    if sentence.source_keys.get(index) != Some(&active.source_key) {
        return false;
    }

    match active.origin {
        Side::Source => true,
        Side::English => {
            let Some(token) = active.english_token.as_deref() else {
                return false;
            };
            if !sentence.contains_english(token) {
                return false;
            }
            // A free pronoun hovered in the translation maps onto the last
            // free occurrence only.
            let clitic_form = &corpus.profile().clitic_form;
            match &active.source_key {
                HighlightKey::Free(form) if form == clitic_form => {
                    gloss_morph::last_free(&sentence.source_keys, form) == Some(index)
                }
                _ => true,
            }
        }
    }
}

pub fn is_english_token_highlighted(
    corpus: &GlossCorpus,
    active: Option<&ActiveSelection>,
    id: SentenceId,
    index: usize,
) -> bool {
    let (Some(active), Some(sentence)) = (active, corpus.sentence(id)) else {
        return false;
    };
    let Some(alignment) = sentence.alignment(TokenSlot::English(index)) else {
        return false;
    };
    if alignment.key != active.source_key {
        return false;
    }

    match active.origin {
        // A default-resolved marker must not light up in a sentence whose
        // source line lacks it.
        Side::Source => sentence.contains_key(&active.source_key),
        Side::English => {
            english_selection_matches(active, sentence, sentence.english_normalized.get(index))
        }
    }
}

/// The trailing `?` only answers to a selection made on a `?` itself.
pub fn is_punctuation_highlighted(
    corpus: &GlossCorpus,
    active: Option<&ActiveSelection>,
    id: SentenceId,
    index: usize,
) -> bool {
    let (Some(active), Some(sentence)) = (active, corpus.sentence(id)) else {
        return false;
    };
    let slot = TokenSlot::Punctuation(index);
    let Some(alignment) = sentence.alignment(slot) else {
        return false;
    };

    active.origin == Side::English
        && alignment.key == active.source_key
        && english_selection_matches(active, sentence, sentence.english_key(slot).as_ref())
}

pub fn is_dictionary_entry_highlighted(active: Option<&ActiveSelection>, entry: &LexicalEntry) -> bool {
    active.map_or(false, |active| active.source_key.form() == entry.source_form)
}

/// Dispatches on the slot kind.
pub fn is_highlighted(
    corpus: &GlossCorpus,
    active: Option<&ActiveSelection>,
    id: SentenceId,
    slot: TokenSlot,
) -> bool {
    match slot {
        TokenSlot::Source(i) => is_source_token_highlighted(corpus, active, id, i),
        TokenSlot::English(i) => is_english_token_highlighted(corpus, active, id, i),
        TokenSlot::Punctuation(i) => is_punctuation_highlighted(corpus, active, id, i),
    }
}

// Keeps an English-side selection inside sentences that carry both the
// hovered English token and its source key.
fn english_selection_matches(
    active: &ActiveSelection,
    sentence: &AnalyzedSentence,
    token: Option<&String>,
) -> bool {
    token.is_some() && active.english_token.as_ref() == token && sentence.contains_key(&active.source_key)
}
