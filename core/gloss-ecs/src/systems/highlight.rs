use hecs::{Entity, World};

use gloss_parser::GlossCorpus;
use gloss_protocol::ActiveSelection;

use crate::components::{Highlighted, Placement};

/// Re-evaluates every placed token against `active` and moves the
/// [`Highlighted`] marker accordingly. Returns how many tokens are lit.
pub fn apply_highlight(world: &mut World, corpus: &GlossCorpus, active: Option<&ActiveSelection>) -> usize {
    // Decide first, mutate after: hecs forbids structural changes mid-query.
    let decisions: Vec<(Entity, bool, bool)> = world
        .query::<(&Placement, Option<&Highlighted>)>()
        .iter()
        .map(|(entity, (placement, marker))| {
            let lit = gloss_solver::is_highlighted(corpus, active, placement.sentence, placement.slot);
            (entity, lit, marker.is_some())
        })
        .collect();

    let mut count = 0;
    for (entity, lit, marked) in decisions {
        match (lit, marked) {
            (true, false) => {
                let _ = world.insert_one(entity, Highlighted);
            }
            (false, true) => {
                let _ = world.remove_one::<Highlighted>(entity);
            }
            _ => {}
        }
        count += usize::from(lit);
    }
    count
}

/// Placements carrying the marker, in scene order.
pub fn highlighted_placements(world: &World) -> Vec<Placement> {
    let mut lit: Vec<Placement> = world
        .query::<&Placement>()
        .with::<&Highlighted>()
        .iter()
        .map(|(_, placement)| *placement)
        .collect();
    lit.sort_by_key(|placement| placement.order);
    lit
}
