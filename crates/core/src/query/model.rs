use serde::Serialize;

use super::engine::IndexView;

/// Size of the merged index at one point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub generation: u64,
    pub packages: usize,
    pub sidebar_nodes: usize,
    pub traits: usize,
    pub implementors: usize,
}

impl IndexStats {
    pub fn of<G: IndexView>(index: &G) -> Self {
        let sidebars = index.sidebars();
        let traits = index.trait_paths();
        Self {
            generation: index.generation(),
            packages: sidebars.len(),
            sidebar_nodes: sidebars.values().map(|root| root.node_count()).sum(),
            implementors: traits
                .iter()
                .map(|path| index.implementors(path).len())
                .sum(),
            traits: traits.len(),
        }
    }
}
