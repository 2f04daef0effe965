pub mod components;
pub mod systems;

use hecs::{Entity, World};

use components::{Link, Placement, TokenData};
use gloss_parser::GlossCorpus;
use gloss_protocol::ActiveSelection;
use systems::highlight::{apply_highlight, highlighted_placements};

/// The rendered scene: one entity per visible token of the corpus.
pub struct GlossWorld {
    world: World,
}

impl GlossWorld {
    pub fn new() -> Self {
        Self { world: World::new() }
    }

    /// Spawns every source token, English word and trailing mark.
    pub fn from_corpus(corpus: &GlossCorpus) -> Self {
        let mut scene = Self::new();
        let mut order = 0;
        for sentence in corpus.sentences() {
            for slot in sentence.slots() {
                let Some(text) = sentence.text(slot) else {
                    continue;
                };
                let entity = scene.add_token(text, Placement { sentence: sentence.id, slot, order });
                if let Some(entry) = corpus.entry_id_at(sentence.id, slot) {
                    let _ = scene.world.insert_one(entity, Link { entry });
                }
                order += 1;
            }
        }
        scene
    }

    /// Expose the inner hecs World for renderers.
    pub fn inner(&self) -> &World {
        &self.world
    }

    pub fn add_token(&mut self, text: String, placement: Placement) -> Entity {
        self.world.spawn((TokenData { text }, placement))
    }

    pub fn len(&self) -> u32 {
        self.world.len()
    }

    pub fn is_empty(&self) -> bool {
        self.world.is_empty()
    }

    /// Run the highlight system for the given selection.
    pub fn refresh(&mut self, corpus: &GlossCorpus, active: Option<&ActiveSelection>) -> usize {
        apply_highlight(&mut self.world, corpus, active)
    }

    pub fn highlighted(&self) -> Vec<Placement> {
        highlighted_placements(&self.world)
    }
}

impl Default for GlossWorld {
    fn default() -> Self {
        Self::new()
    }
}
