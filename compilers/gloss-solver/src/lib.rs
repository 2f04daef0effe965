pub mod graph;
pub mod highlight;

pub use graph::AlignmentGraph;
pub use highlight::{
    is_dictionary_entry_highlighted, is_english_token_highlighted, is_highlighted,
    is_punctuation_highlighted, is_source_token_highlighted, HighlightState,
};

use gloss_parser::GlossCorpus;
use gloss_protocol::{ActiveSelection, SentenceId, TokenSlot};

/// Every highlighted slot across the corpus, in display order.
pub fn highlighted_slots(
    corpus: &GlossCorpus,
    active: Option<&ActiveSelection>,
) -> Vec<(SentenceId, TokenSlot)> {
    if active.is_none() {
        return Vec::new();
    }
    corpus
        .sentences()
        .iter()
        .flat_map(|sentence| sentence.slots().map(move |slot| (sentence.id, slot)))
        .filter(|&(id, slot)| is_highlighted(corpus, active, id, slot))
        .collect()
}
