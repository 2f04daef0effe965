pub mod alignment;
pub mod lexicon;
pub mod parser;
pub mod token;

use std::collections::{HashMap, HashSet};

use gloss_protocol::{
    ConfigError, Corpus, EntryId, GrammarProfile, HighlightKey, LexicalEntry, Sentence, SentenceId,
    TokenSlot,
};
use tracing::info;

use crate::alignment::{Alignment, AlignmentResolver};
use crate::lexicon::DictionaryIndex;
use crate::parser::{normalize_english, tokenize_english, tokenize_source};
use crate::token::EnglishToken;

/// Everything derived from one sentence at load time. Read-only afterwards.
#[derive(Debug, Clone)]
pub struct AnalyzedSentence {
    pub id: SentenceId,
    pub source_text: String,
    pub translation_text: String,
    pub source_tokens: Vec<String>,
    pub source_keys: Vec<HighlightKey>,
    pub english_tokens: Vec<EnglishToken>,
    pub english_normalized: Vec<String>,
    /// Per English word: the entry it denotes, if any.
    pub english_alignments: Vec<Option<Alignment>>,
    /// Per English word: what its trailing mark stands for, if anything.
    pub punctuation_alignments: Vec<Option<Alignment>>,
    pub source_key_set: HashSet<HighlightKey>,
    /// Normalized words plus the literal punctuation marks.
    pub english_token_set: HashSet<String>,
}

impl AnalyzedSentence {
    pub fn has_translation(&self) -> bool {
        !self.english_tokens.is_empty()
    }

    pub fn contains_key(&self, key: &HighlightKey) -> bool {
        self.source_key_set.contains(key)
    }

    pub fn contains_english(&self, token: &str) -> bool {
        self.english_token_set.contains(token)
    }

    /// Source form present under any reading.
    pub fn contains_form(&self, form: &str) -> bool {
        self.source_keys.iter().any(|key| key.form() == form)
    }

    /// The English selection token a slot would set when hovered.
    pub fn english_key(&self, slot: TokenSlot) -> Option<String> {
        match slot {
            TokenSlot::Source(_) => None,
            TokenSlot::English(i) => self.english_normalized.get(i).cloned(),
            TokenSlot::Punctuation(i) => self
                .english_tokens
                .get(i)?
                .trailing_punctuation
                .map(String::from),
        }
    }

    pub fn alignment(&self, slot: TokenSlot) -> Option<&Alignment> {
        match slot {
            TokenSlot::Source(_) => None,
            TokenSlot::English(i) => self.english_alignments.get(i)?.as_ref(),
            TokenSlot::Punctuation(i) => self.punctuation_alignments.get(i)?.as_ref(),
        }
    }

    /// Every rendered position in display order: source line first, then
    /// each English word followed by its mark.
    pub fn slots(&self) -> impl Iterator<Item = TokenSlot> + '_ {
        let source = (0..self.source_tokens.len()).map(TokenSlot::Source);
        let english = self.english_tokens.iter().enumerate().flat_map(|(i, token)| {
            let mark = token.trailing_punctuation.map(|_| TokenSlot::Punctuation(i));
            std::iter::once(TokenSlot::English(i)).chain(mark)
        });
        source.chain(english)
    }

    /// Display text of a slot.
    pub fn text(&self, slot: TokenSlot) -> Option<String> {
        match slot {
            TokenSlot::Source(i) => self.source_tokens.get(i).cloned(),
            TokenSlot::English(i) => self.english_tokens.get(i).map(|t| t.word.clone()),
            TokenSlot::Punctuation(_) => self.english_key(slot),
        }
    }
}

pub struct Analyzer<'a> {
    profile: &'a GrammarProfile,
    resolver: AlignmentResolver<'a>,
}

impl<'a> Analyzer<'a> {
    pub fn new(index: &'a DictionaryIndex, profile: &'a GrammarProfile) -> Self {
        Self {
            profile,
            resolver: AlignmentResolver::new(index, profile),
        }
    }

    /// Sentence -> tokens -> keys -> alignments -> membership sets.
    pub fn analyze(&self, sentence: &Sentence) -> AnalyzedSentence {
        let source_tokens = tokenize_source(&sentence.source_text);
        let source_keys = gloss_morph::source_keys(&source_tokens, self.profile);

        let english_tokens = tokenize_english(&sentence.translation_text);
        let english_normalized: Vec<String> = english_tokens
            .iter()
            .map(|token| normalize_english(&token.word))
            .collect();

        let english_alignments = (0..english_tokens.len())
            .map(|i| self.resolver.resolve_english(&english_normalized, i, &source_keys))
            .collect();
        let punctuation_alignments = english_tokens
            .iter()
            .map(|token| {
                token
                    .trailing_punctuation
                    .and_then(|mark| self.resolver.resolve_punctuation(mark, &source_keys))
            })
            .collect();

        let source_key_set = source_keys.iter().cloned().collect();
        let english_token_set = english_normalized
            .iter()
            .filter(|word| !word.is_empty())
            .cloned()
            .chain(
                english_tokens
                    .iter()
                    .filter_map(|token| token.trailing_punctuation.map(String::from)),
            )
            .collect();

        AnalyzedSentence {
            id: sentence.id,
            source_text: sentence.source_text.clone(),
            translation_text: sentence.translation_text.clone(),
            source_tokens,
            source_keys,
            english_tokens,
            english_normalized,
            english_alignments,
            punctuation_alignments,
            source_key_set,
            english_token_set,
        }
    }
}

/// A corpus with its dictionary indexed and every sentence analyzed.
#[derive(Debug, Clone)]
pub struct GlossCorpus {
    dictionary: DictionaryIndex,
    profile: GrammarProfile,
    sentences: Vec<AnalyzedSentence>,
    by_id: HashMap<SentenceId, usize>,
}

impl GlossCorpus {
    pub fn build(corpus: Corpus) -> Result<Self, ConfigError> {
        let Corpus {
            entries,
            sentences,
            profile,
            ..
        } = corpus;
        let dictionary = DictionaryIndex::build(entries)?;

        let mut by_id = HashMap::with_capacity(sentences.len());
        for (position, sentence) in sentences.iter().enumerate() {
            if by_id.insert(sentence.id, position).is_some() {
                return Err(ConfigError::DuplicateSentenceId(sentence.id));
            }
        }

        let analyzed: Vec<AnalyzedSentence> = {
            let analyzer = Analyzer::new(&dictionary, &profile);
            sentences.iter().map(|s| analyzer.analyze(s)).collect()
        };

        let corpus = Self {
            dictionary,
            profile,
            sentences: analyzed,
            by_id,
        };
        info!(
            entries = corpus.dictionary.len(),
            sentences = corpus.sentences.len(),
            unlinked = corpus.unlinked_english_count(),
            "corpus analyzed"
        );
        Ok(corpus)
    }

    pub fn dictionary(&self) -> &DictionaryIndex {
        &self.dictionary
    }

    pub fn profile(&self) -> &GrammarProfile {
        &self.profile
    }

    pub fn sentences(&self) -> &[AnalyzedSentence] {
        &self.sentences
    }

    pub fn sentence(&self, id: SentenceId) -> Option<&AnalyzedSentence> {
        self.by_id.get(&id).map(|&position| &self.sentences[position])
    }

    pub fn entry_id_at(&self, id: SentenceId, slot: TokenSlot) -> Option<EntryId> {
        let sentence = self.sentence(id)?;
        match slot {
            TokenSlot::Source(i) => self
                .dictionary
                .by_source_form(sentence.source_keys.get(i)?.form()),
            _ => Some(sentence.alignment(slot)?.entry),
        }
    }

    /// Entry behind an aligned slot, for the renderer's colour choice.
    pub fn entry_at(&self, id: SentenceId, slot: TokenSlot) -> Option<&LexicalEntry> {
        self.dictionary.entry(self.entry_id_at(id, slot)?)
    }

    /// English words (punctuation excluded) that resolve to no entry.
    pub fn unlinked_english_count(&self) -> usize {
        self.sentences
            .iter()
            .flat_map(|s| s.english_alignments.iter().zip(&s.english_normalized))
            .filter(|(alignment, word)| alignment.is_none() && !word.is_empty())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> GlossCorpus {
        let corpus: Corpus =
            serde_json::from_str(include_str!("../../../data/corpus.json")).unwrap();
        GlossCorpus::build(corpus).unwrap()
    }

    #[test]
    fn test_first_sentence_metadata() {
        let corpus = fixture();
        let s = corpus.sentence(SentenceId(1)).unwrap();

        assert_eq!(s.source_tokens, vec!["мтукл", "ин", "х", "и", "муд", "учу"]);
        assert_eq!(s.source_keys[3], HighlightKey::clitic("и"));
        assert!(!s.contains_key(&HighlightKey::free("и")));
        assert_eq!(s.english_normalized, vec!["my", "friend", "prepared", "the", "couscous"]);
        assert!(s.contains_english("."));
        assert!(s.contains_english("friend"));

        let my = corpus.entry_at(s.id, TokenSlot::English(0)).unwrap();
        assert_eq!(my.source_form, "х");
        let friend = corpus.entry_at(s.id, TokenSlot::English(1)).unwrap();
        assert_eq!(friend.gloss_label, "friend");
        assert!(corpus.entry_at(s.id, TokenSlot::English(3)).is_none());
        assert!(corpus.entry_at(s.id, TokenSlot::Punctuation(4)).is_none());
    }

    #[test]
    fn test_empty_translation_has_no_english() {
        let corpus = fixture();
        let s = corpus.sentence(SentenceId(21)).unwrap();
        assert!(!s.has_translation());
        assert!(s.english_token_set.is_empty());
        assert_eq!(s.slots().count(), s.source_tokens.len());
    }

    #[test]
    fn test_slots_interleave_marks() {
        let corpus = fixture();
        let s = corpus.sentence(SentenceId(5)).unwrap();
        let slots: Vec<TokenSlot> = s.slots().skip(s.source_tokens.len()).collect();

        assert_eq!(slots.last(), Some(&TokenSlot::Punctuation(5)));
        assert_eq!(slots.len(), 7);
        assert_eq!(s.text(TokenSlot::Punctuation(5)).as_deref(), Some("?"));
        assert_eq!(s.text(TokenSlot::English(5)).as_deref(), Some("couscous"));
    }

    #[test]
    fn test_duplicate_sentence_id_rejected() {
        let corpus = Corpus {
            sentences: vec![
                Sentence::new(4, "муд х учу", ""),
                Sentence::new(4, "рз х с", ""),
            ],
            ..Corpus::default()
        };
        assert_eq!(
            GlossCorpus::build(corpus).unwrap_err(),
            ConfigError::DuplicateSentenceId(SentenceId(4))
        );
    }

    #[test]
    fn test_every_alignment_names_an_indexed_entry() {
        let corpus = fixture();
        for sentence in corpus.sentences() {
            for alignment in sentence.english_alignments.iter().flatten() {
                let entry = corpus.dictionary().entry(alignment.entry).unwrap();
                assert_eq!(entry.source_form, alignment.key.form());
            }
        }
    }

    #[test]
    fn test_unlinked_words_are_function_words() {
        let corpus = fixture();
        let unlinked: HashSet<&str> = corpus
            .sentences()
            .iter()
            .flat_map(|s| s.english_alignments.iter().zip(&s.english_normalized))
            .filter(|(alignment, _)| alignment.is_none())
            .map(|(_, word)| word.as_str())
            .collect();

        assert_eq!(unlinked, HashSet::from(["the", "did", "fem", "past"]));
        assert_eq!(corpus.unlinked_english_count(), 14);
    }
}
