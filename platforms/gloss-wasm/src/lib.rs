use std::collections::HashSet;

use gloss_ecs::GlossWorld;
use gloss_parser::GlossCorpus;
use gloss_protocol::{ConfigError, Corpus, EntryId, SentenceId, TokenSlot};
use gloss_solver::{is_dictionary_entry_highlighted, AlignmentGraph, HighlightState};
use serde::Serialize;
use thiserror::Error;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("corpus archive rejected: {0}")]
    InvalidArchive(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("no sentence with id {0}")]
    UnknownSentence(u32),
    #[error("unknown token kind {0:?}, expected source, english or punctuation")]
    UnknownSlotKind(String),
    #[error("could not convert result for JavaScript: {0}")]
    Conversion(String),
}

impl From<EngineError> for JsValue {
    fn from(e: EngineError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenView {
    pub text: String,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnglishTokenView {
    pub text: String,
    pub highlighted: bool,
    /// Display colour of the aligned entry, empty when unaligned.
    pub color: String,
    pub punctuation: Option<TokenView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentenceView {
    pub id: u32,
    pub source: Vec<TokenView>,
    pub english: Vec<EnglishTokenView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DictionaryRowView {
    pub id: u32,
    pub source_form: String,
    pub gloss_label: String,
    pub color: String,
    pub highlighted: bool,
}

/// Everything the page needs to repaint after a hover event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub sentences: Vec<SentenceView>,
    pub dictionary: Vec<DictionaryRowView>,
}

/// The engine instance running in the browser.
#[wasm_bindgen]
pub struct GlossEngine {
    corpus: GlossCorpus,
    state: HighlightState,
    scene: GlossWorld,
}

#[wasm_bindgen]
impl GlossEngine {
    /// Takes the raw archive produced by `corpus-compiler` (loaded via fetch() in JS).
    #[wasm_bindgen(constructor)]
    pub fn new(data: Vec<u8>) -> Result<GlossEngine, JsValue> {
        Ok(Self::from_archive(&data)?)
    }

    #[wasm_bindgen(js_name = hoverSource)]
    pub fn hover_source(&mut self, sentence: u32, index: usize) -> bool {
        let changed = self.state.hover_source(&self.corpus, SentenceId(sentence), index);
        self.refresh(changed)
    }

    #[wasm_bindgen(js_name = hoverEnglish)]
    pub fn hover_english(&mut self, sentence: u32, index: usize) -> bool {
        let changed = self
            .state
            .hover_english(&self.corpus, SentenceId(sentence), TokenSlot::English(index));
        self.refresh(changed)
    }

    #[wasm_bindgen(js_name = hoverPunctuation)]
    pub fn hover_punctuation(&mut self, sentence: u32, index: usize) -> bool {
        let changed = self
            .state
            .hover_english(&self.corpus, SentenceId(sentence), TokenSlot::Punctuation(index));
        self.refresh(changed)
    }

    #[wasm_bindgen(js_name = hoverDictionary)]
    pub fn hover_dictionary(&mut self, entry: u32) -> bool {
        let changed = self.state.hover_dictionary(&self.corpus, EntryId(entry));
        self.refresh(changed)
    }

    pub fn clear(&mut self) {
        self.state.clear();
        self.refresh(true);
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        to_js(&self.view())
    }

    /// Positions on the other side of `sentence` aligned with the given token.
    pub fn counterparts(&self, sentence: u32, kind: &str, index: usize) -> Result<JsValue, JsValue> {
        let slot = parse_slot(kind, index)?;
        to_js(&self.counterparts_of(sentence, slot)?)
    }
}

impl GlossEngine {
    /// Validates the archive bytes before anything reads them.
    pub fn from_archive(data: &[u8]) -> Result<Self, EngineError> {
        // Archived offsets assume alignment the caller's buffer may not have.
        let mut aligned = rkyv::AlignedVec::with_capacity(data.len());
        aligned.extend_from_slice(data);
        let corpus = rkyv::from_bytes::<Corpus>(&aligned)
            .map_err(|e| EngineError::InvalidArchive(e.to_string()))?;
        let corpus = GlossCorpus::build(corpus)?;
        let scene = GlossWorld::from_corpus(&corpus);
        Ok(Self {
            corpus,
            state: HighlightState::new(),
            scene,
        })
    }

    pub fn view(&self) -> Snapshot {
        let lit: HashSet<(SentenceId, TokenSlot)> = self
            .scene
            .highlighted()
            .into_iter()
            .map(|placement| (placement.sentence, placement.slot))
            .collect();
        let is_lit = |id: SentenceId, slot: TokenSlot| lit.contains(&(id, slot));

        let sentences = self
            .corpus
            .sentences()
            .iter()
            .map(|s| SentenceView {
                id: s.id.0,
                source: s
                    .source_tokens
                    .iter()
                    .enumerate()
                    .map(|(i, text)| TokenView {
                        text: text.clone(),
                        highlighted: is_lit(s.id, TokenSlot::Source(i)),
                    })
                    .collect(),
                english: s
                    .english_tokens
                    .iter()
                    .enumerate()
                    .map(|(i, token)| EnglishTokenView {
                        text: token.word.clone(),
                        highlighted: is_lit(s.id, TokenSlot::English(i)),
                        color: self
                            .corpus
                            .entry_at(s.id, TokenSlot::English(i))
                            .map(|entry| entry.display_color.clone())
                            .unwrap_or_default(),
                        punctuation: token.trailing_punctuation.map(|mark| TokenView {
                            text: mark.to_string(),
                            highlighted: is_lit(s.id, TokenSlot::Punctuation(i)),
                        }),
                    })
                    .collect(),
            })
            .collect();

        let dictionary = self
            .corpus
            .dictionary()
            .entries()
            .map(|(id, entry)| DictionaryRowView {
                id: id.0,
                source_form: entry.source_form.clone(),
                gloss_label: entry.gloss_label.clone(),
                color: entry.display_color.clone(),
                highlighted: is_dictionary_entry_highlighted(self.state.active(), entry),
            })
            .collect();

        Snapshot {
            sentences,
            dictionary,
        }
    }

    pub fn counterparts_of(&self, sentence: u32, slot: TokenSlot) -> Result<Vec<TokenSlot>, EngineError> {
        let analyzed = self
            .corpus
            .sentence(SentenceId(sentence))
            .ok_or(EngineError::UnknownSentence(sentence))?;
        let graph = AlignmentGraph::build(analyzed, &self.corpus.profile().clitic_form);
        Ok(graph.counterparts(slot))
    }

    // Ignored hovers leave the scene as it was.
    fn refresh(&mut self, changed: bool) -> bool {
        if changed {
            self.scene.refresh(&self.corpus, self.state.active());
        }
        changed
    }
}

fn parse_slot(kind: &str, index: usize) -> Result<TokenSlot, EngineError> {
    match kind {
        "source" => Ok(TokenSlot::Source(index)),
        "english" => Ok(TokenSlot::English(index)),
        "punctuation" => Ok(TokenSlot::Punctuation(index)),
        other => Err(EngineError::UnknownSlotKind(other.to_string())),
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| EngineError::Conversion(e.to_string()).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn archive() -> rkyv::AlignedVec {
        let corpus: Corpus =
            serde_json::from_str(include_str!("../../../data/corpus.json")).unwrap();
        rkyv::to_bytes::<_, 4096>(&corpus).unwrap()
    }

    fn lit_sentences(engine: &GlossEngine) -> Vec<u32> {
        engine
            .view()
            .sentences
            .iter()
            .filter(|s| {
                s.source.iter().any(|t| t.highlighted)
                    || s.english.iter().any(|t| t.highlighted)
            })
            .map(|s| s.id)
            .collect()
    }

    #[test]
    fn test_rejects_garbage_archive() {
        let result = GlossEngine::from_archive(&[0xde, 0xad, 0xbe, 0xef]);
        assert!(matches!(result, Err(EngineError::InvalidArchive(_))));
    }

    #[test]
    fn test_rejects_duplicate_sentence_ids() {
        let mut corpus: Corpus =
            serde_json::from_str(include_str!("../../../data/corpus.json")).unwrap();
        corpus.sentences.push(corpus.sentences[0].clone());
        let bytes = rkyv::to_bytes::<_, 4096>(&corpus).unwrap();

        let result = GlossEngine::from_archive(&bytes);
        assert!(matches!(
            result,
            Err(EngineError::Config(ConfigError::DuplicateSentenceId(SentenceId(1))))
        ));
    }

    #[test]
    fn test_snapshot_follows_hover_events() {
        let mut engine = GlossEngine::from_archive(&archive()).unwrap();
        assert!(lit_sentences(&engine).is_empty());

        assert!(engine.hover_english(12, 2));
        assert_eq!(lit_sentences(&engine), vec![12, 17]);

        // An unaligned word keeps the previous picture.
        assert!(!engine.hover_english(1, 3));
        assert_eq!(lit_sentences(&engine), vec![12, 17]);

        assert!(engine.hover_punctuation(5, 5));
        assert_eq!(lit_sentences(&engine), vec![5, 6, 10, 15]);
        let view = engine.view();
        let fifth = &view.sentences[4];
        assert!(fifth.english[5].punctuation.as_ref().unwrap().highlighted);
        assert!(!fifth.english[5].highlighted);

        engine.clear();
        assert!(lit_sentences(&engine).is_empty());
        assert!(engine.view().dictionary.iter().all(|row| !row.highlighted));
    }

    #[test]
    fn test_colors_and_dictionary_rows() {
        let mut engine = GlossEngine::from_archive(&archive()).unwrap();
        let view = engine.view();
        let first = &view.sentences[0];
        assert!(!first.english[1].color.is_empty());
        assert_eq!(first.english[3].color, "");

        let row = view.dictionary.iter().find(|row| row.source_form == "учу").unwrap();
        assert!(engine.hover_dictionary(row.id));
        let view = engine.view();
        assert!(view.dictionary.iter().find(|r| r.id == row.id).unwrap().highlighted);
        assert_eq!(view.dictionary.iter().filter(|r| r.highlighted).count(), 1);
        assert!(!engine.hover_dictionary(999));
    }

    #[test]
    fn test_counterparts() {
        let engine = GlossEngine::from_archive(&archive()).unwrap();
        assert_eq!(
            engine.counterparts_of(11, TokenSlot::Source(1)).unwrap(),
            vec![TokenSlot::English(1), TokenSlot::English(3)]
        );
        assert!(matches!(
            engine.counterparts_of(404, TokenSlot::Source(0)),
            Err(EngineError::UnknownSentence(404))
        ));
        assert!(matches!(parse_slot("gloss", 0), Err(EngineError::UnknownSlotKind(_))));
    }
}
