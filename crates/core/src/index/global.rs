//! Arc-wrapped immutable merged index
//!
//! `GlobalIndex` is what queries read. Cloning only bumps a reference count;
//! all mutation goes through `IndexBuilder`.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use docmerge_api::{ImplementorEntry, ImplementorKey, PackageName, SidebarNode, SourceTree};

use super::IndexBuilder;

/// Immutable merged index (cheap to clone via Arc)
#[derive(Clone, Default)]
pub struct GlobalIndex {
    inner: Arc<GlobalIndexInner>,
}

/// Internal data structure (shared via Arc)
#[derive(Clone, Default)]
pub struct GlobalIndexInner {
    /// Bumped by every ingest that changed something.
    pub generation: u64,
    /// Package -> sidebar root, last writer wins.
    pub sidebars: BTreeMap<PackageName, Arc<SidebarNode>>,
    /// Package -> source file listing, last writer wins.
    pub sources: BTreeMap<PackageName, Arc<SourceTree>>,
    /// Trait path -> implementors in display order.
    pub implementors: HashMap<String, TraitImplementors>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Added,
    Duplicate,
    /// Same key was held by a package that sorts later; ownership moved.
    Replaced,
}

/// Implementors of one trait, de-duplicated on `ImplementorKey` and sorted by
/// `ImplementorEntry::display_order`.
#[derive(Debug, Clone, Default)]
pub struct TraitImplementors {
    entries: Vec<ImplementorEntry>,
    owners: HashMap<ImplementorKey, PackageName>,
}

impl TraitImplementors {
    pub fn entries(&self) -> &[ImplementorEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn insert(&mut self, entry: ImplementorEntry) -> InsertOutcome {
        let key = entry.key();
        let outcome = match self.owners.get(&key) {
            // The smaller package name keeps the key, whatever the arrival order.
            Some(owner) if *owner <= entry.source_package => return InsertOutcome::Duplicate,
            Some(owner) => {
                let order = (
                    owner.as_str(),
                    entry.target_description.as_str(),
                    entry.owner_type_path.as_str(),
                );
                if let Ok(idx) = self.search(order) {
                    self.entries.remove(idx);
                }
                InsertOutcome::Replaced
            }
            None => InsertOutcome::Added,
        };

        let slot = match self.search(entry.display_order()) {
            Ok(idx) | Err(idx) => idx,
        };
        self.owners.insert(key, entry.source_package.clone());
        self.entries.insert(slot, entry);
        outcome
    }

    fn search(&self, order: (&str, &str, &str)) -> Result<usize, usize> {
        self.entries
            .binary_search_by(|probe| probe.display_order().cmp(&order))
    }
}

impl GlobalIndex {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_inner(inner: GlobalIndexInner) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Takes the data back out for mutation, copying only if a snapshot of
    /// this index is still alive somewhere.
    pub(crate) fn into_inner(self) -> GlobalIndexInner {
        Arc::try_unwrap(self.inner).unwrap_or_else(|shared| (*shared).clone())
    }

    /// Create a builder for modifying a copy of this index
    pub fn to_builder(&self) -> IndexBuilder {
        IndexBuilder::from_index(self.clone())
    }

    // ---- Read-only accessors ----

    pub fn generation(&self) -> u64 {
        self.inner.generation
    }

    pub fn sidebar(&self, package: &str) -> Option<&SidebarNode> {
        self.inner.sidebars.get(package).map(|node| node.as_ref())
    }

    pub fn sidebars(&self) -> &BTreeMap<PackageName, Arc<SidebarNode>> {
        &self.inner.sidebars
    }

    pub fn sources(&self, package: &str) -> Option<&SourceTree> {
        self.inner.sources.get(package).map(|tree| tree.as_ref())
    }

    pub fn implementors(&self, trait_path: &str) -> &[ImplementorEntry] {
        self.inner
            .implementors
            .get(trait_path)
            .map(TraitImplementors::entries)
            .unwrap_or(&[])
    }

    pub fn trait_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.inner.implementors.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    pub fn package_count(&self) -> usize {
        self.inner.sidebars.len()
    }

    pub fn implementor_count(&self) -> usize {
        self.inner.implementors.values().map(TraitImplementors::len).sum()
    }
}
