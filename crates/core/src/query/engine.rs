use std::collections::BTreeMap;
use std::sync::Arc;

use docmerge_api::{ImplementorEntry, ItemKind, PackageName, SidebarNode, SourceTree};

use crate::index::GlobalIndex;
use crate::query::model::IndexStats;
use crate::query::search::{PrefixSearch, SearchHit};

// Trait to abstract over anything that can serve as a read-only merged index
pub trait IndexView: Send + Sync {
    fn generation(&self) -> u64;
    fn sidebars(&self) -> &BTreeMap<PackageName, Arc<SidebarNode>>;
    fn sources(&self, package: &str) -> Option<&SourceTree>;
    fn implementors(&self, trait_path: &str) -> &[ImplementorEntry];
    fn trait_paths(&self) -> Vec<&str>;

    fn sidebar(&self, package: &str) -> Option<&SidebarNode> {
        self.sidebars().get(package).map(|root| root.as_ref())
    }
}

// Blanket implementation for references
impl<T: IndexView> IndexView for &T {
    fn generation(&self) -> u64 {
        (*self).generation()
    }

    fn sidebars(&self) -> &BTreeMap<PackageName, Arc<SidebarNode>> {
        (*self).sidebars()
    }

    fn sources(&self, package: &str) -> Option<&SourceTree> {
        (*self).sources(package)
    }

    fn implementors(&self, trait_path: &str) -> &[ImplementorEntry] {
        (*self).implementors(trait_path)
    }

    fn trait_paths(&self) -> Vec<&str> {
        (*self).trait_paths()
    }
}

impl IndexView for GlobalIndex {
    fn generation(&self) -> u64 {
        self.generation()
    }

    fn sidebars(&self) -> &BTreeMap<PackageName, Arc<SidebarNode>> {
        self.sidebars()
    }

    fn sources(&self, package: &str) -> Option<&SourceTree> {
        self.sources(package)
    }

    fn implementors(&self, trait_path: &str) -> &[ImplementorEntry] {
        self.implementors(trait_path)
    }

    fn trait_paths(&self) -> Vec<&str> {
        self.trait_paths()
    }
}

/// Read-only query surface handed to renderers.
///
/// Unknown traits and packages are not errors: they are simply not loaded yet
/// and come back empty.
pub struct QueryEngine<G> {
    index: G,
}

impl<G: IndexView> QueryEngine<G> {
    pub fn new(index: G) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &G {
        &self.index
    }

    pub fn implementors_of(&self, trait_path: &str) -> &[ImplementorEntry] {
        self.index.implementors(trait_path)
    }

    pub fn sidebar_of(&self, package: &str) -> Option<&SidebarNode> {
        self.index.sidebar(package)
    }

    pub fn sources_of(&self, package: &str) -> Option<&SourceTree> {
        self.index.sources(package)
    }

    pub fn search_by_prefix<'a>(&'a self, text: &'a str) -> PrefixSearch<'a> {
        PrefixSearch::new(self.index.sidebars(), text)
    }

    pub fn search_by_prefix_of_kind<'a>(
        &'a self,
        text: &'a str,
        kinds: &'a [ItemKind],
    ) -> impl Iterator<Item = SearchHit<'a>> + 'a {
        self.search_by_prefix(text)
            .filter(move |hit| kinds.is_empty() || kinds.contains(&hit.node.kind))
    }

    pub fn all_packages(&self) -> Vec<&PackageName> {
        // BTreeMap keys are already in lexicographic order
        self.index.sidebars().keys().collect()
    }

    pub fn trait_paths(&self) -> Vec<&str> {
        self.index.trait_paths()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats::of(&self.index)
    }
}
