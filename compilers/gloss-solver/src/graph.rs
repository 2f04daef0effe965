use petgraph::graph::{NodeIndex, UnGraph};
use gloss_parser::AnalyzedSentence;
use gloss_protocol::{HighlightKey, TokenSlot};
use std::collections::HashMap;

/// Bipartite links between the English and source positions of one sentence.
pub struct AlignmentGraph {
    graph: UnGraph<TokenSlot, HighlightKey>,
    index_map: HashMap<TokenSlot, NodeIndex>,
}

impl AlignmentGraph {
    /// Links each aligned English slot to the source tokens carrying its key.
    /// The free reading of the clitic form links to its last occurrence only,
    /// matching what an English hover highlights.
    pub fn build(sentence: &AnalyzedSentence, clitic_form: &str) -> Self {
        let mut this = Self {
            graph: UnGraph::default(),
            index_map: HashMap::new(),
        };

        for slot in sentence.slots() {
            let Some(alignment) = sentence.alignment(slot) else {
                continue;
            };
            let key = &alignment.key;

            let targets: Vec<usize> = match key {
                HighlightKey::Free(form) if form == clitic_form => {
                    gloss_morph::last_free(&sentence.source_keys, form)
                        .into_iter()
                        .collect()
                }
                _ => sentence
                    .source_keys
                    .iter()
                    .enumerate()
                    .filter(|(_, source_key)| *source_key == key)
                    .map(|(i, _)| i)
                    .collect(),
            };

            for target in targets {
                this.link(slot, TokenSlot::Source(target), key.clone());
            }
        }

        this
    }

    fn node(&mut self, slot: TokenSlot) -> NodeIndex {
        *self
            .index_map
            .entry(slot)
            .or_insert_with(|| self.graph.add_node(slot))
    }

    fn link(&mut self, a: TokenSlot, b: TokenSlot, key: HighlightKey) {
        let a = self.node(a);
        let b = self.node(b);
        self.graph.add_edge(a, b, key);
    }

    /// Positions on the other side aligned with `slot`, in position order.
    pub fn counterparts(&self, slot: TokenSlot) -> Vec<TokenSlot> {
        let Some(&idx) = self.index_map.get(&slot) else {
            return Vec::new();
        };
        let mut linked: Vec<TokenSlot> = self
            .graph
            .neighbors(idx)
            .map(|neighbor| self.graph[neighbor])
            .collect();
        linked.sort();
        linked.dedup();
        linked
    }

    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }
}
