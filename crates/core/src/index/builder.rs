//! Index builder
//!
//! `IndexBuilder` applies partial index records to a private copy of the index
//! and is turned back into an immutable `GlobalIndex` with `build()`.

use std::sync::Arc;

use docmerge_api::{ImplementorEntry, PackageName, PartialIndexRecord, SidebarNode, SourceTree};

use super::global::{GlobalIndex, GlobalIndexInner, InsertOutcome};

/// What one ingest changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestOutcome {
    pub package: PackageName,
    pub sidebar_changed: bool,
    pub sources_changed: bool,
    pub implementors_added: usize,
    pub implementors_skipped: usize,
}

impl IngestOutcome {
    pub fn changed(&self) -> bool {
        self.sidebar_changed || self.sources_changed || self.implementors_added > 0
    }
}

/// Mutable index builder
#[derive(Default)]
pub struct IndexBuilder {
    inner: GlobalIndexInner,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_index(index: GlobalIndex) -> Self {
        Self {
            inner: index.into_inner(),
        }
    }

    // ---- Mutation methods ----

    /// Replaces the package's sidebar (and source tree, if the record has one)
    /// and unions its implementors into the per-trait sets.
    pub fn apply_record(&mut self, record: PartialIndexRecord) -> IngestOutcome {
        let PartialIndexRecord {
            package,
            sidebar,
            implementors,
            sources,
        } = record;

        let sidebar_changed = self.set_sidebar(package.clone(), sidebar);
        let sources_changed = match sources {
            Some(tree) => self.set_sources(package.clone(), tree),
            None => false,
        };

        let mut outcome = IngestOutcome {
            package,
            sidebar_changed,
            sources_changed,
            implementors_added: 0,
            implementors_skipped: 0,
        };
        for entry in implementors {
            match self.add_implementor(entry) {
                InsertOutcome::Added | InsertOutcome::Replaced => outcome.implementors_added += 1,
                InsertOutcome::Duplicate => outcome.implementors_skipped += 1,
            }
        }

        if outcome.changed() {
            self.inner.generation += 1;
        }
        outcome
    }

    /// Returns whether the stored tree actually changed.
    pub fn set_sidebar(&mut self, package: PackageName, sidebar: SidebarNode) -> bool {
        match self.inner.sidebars.get(&package) {
            Some(existing) if existing.as_ref() == &sidebar => false,
            _ => {
                self.inner.sidebars.insert(package, Arc::new(sidebar));
                true
            }
        }
    }

    pub fn set_sources(&mut self, package: PackageName, sources: SourceTree) -> bool {
        match self.inner.sources.get(&package) {
            Some(existing) if existing.as_ref() == &sources => false,
            _ => {
                self.inner.sources.insert(package, Arc::new(sources));
                true
            }
        }
    }

    pub fn add_implementor(&mut self, entry: ImplementorEntry) -> InsertOutcome {
        self.inner
            .implementors
            .entry(entry.trait_path.clone())
            .or_default()
            .insert(entry)
    }

    pub fn build(self) -> GlobalIndex {
        GlobalIndex::from_inner(self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docmerge_api::ItemKind;

    fn entry(package: &str, owner: &str, text: &str) -> ImplementorEntry {
        ImplementorEntry::new("core::borrow::Borrow", owner, text, package)
    }

    #[test]
    fn test_implementors_sorted_by_package_then_description() {
        let mut builder = IndexBuilder::new();
        builder.add_implementor(entry("bitcoin", "bitcoin::Txid", "impl Borrow for Txid"));
        builder.add_implementor(entry("bitcoin", "bitcoin::BlockHash", "impl Borrow for BlockHash"));
        builder.add_implementor(entry("bitcoin_hashes", "bitcoin_hashes::Hmac", "impl Borrow for Hmac"));
        builder.add_implementor(entry("ahash", "ahash::Key", "impl Borrow for Key"));

        let index = builder.build();
        let owners: Vec<_> = index
            .implementors("core::borrow::Borrow")
            .iter()
            .map(|e| e.owner_type_path.as_str())
            .collect();
        assert_eq!(
            owners,
            vec!["ahash::Key", "bitcoin::BlockHash", "bitcoin::Txid", "bitcoin_hashes::Hmac"]
        );
    }

    #[test]
    fn test_identical_triple_is_kept_once() {
        let mut builder = IndexBuilder::new();
        assert_eq!(
            builder.add_implementor(entry("a", "a::X", "impl T for X")),
            InsertOutcome::Added
        );
        assert_eq!(
            builder.add_implementor(entry("a", "a::X", "impl T for X")),
            InsertOutcome::Duplicate
        );
        // Whitespace is part of the opaque description, so this is a new key.
        assert_eq!(
            builder.add_implementor(entry("a", "a::X", "impl T  for X")),
            InsertOutcome::Added
        );
        assert_eq!(builder.build().implementor_count(), 2);
    }

    #[test]
    fn test_shared_key_goes_to_smaller_package() {
        let mut late = IndexBuilder::new();
        late.add_implementor(entry("zeta", "x::Y", "impl T for Y"));
        assert_eq!(
            late.add_implementor(entry("alpha", "x::Y", "impl T for Y")),
            InsertOutcome::Replaced
        );

        let mut early = IndexBuilder::new();
        early.add_implementor(entry("alpha", "x::Y", "impl T for Y"));
        assert_eq!(
            early.add_implementor(entry("zeta", "x::Y", "impl T for Y")),
            InsertOutcome::Duplicate
        );

        let late = late.build();
        let early = early.build();
        assert_eq!(
            late.implementors("core::borrow::Borrow"),
            early.implementors("core::borrow::Borrow")
        );
        assert_eq!(late.implementor_count(), 1);
        assert_eq!(
            late.implementors("core::borrow::Borrow")[0].source_package.as_str(),
            "alpha"
        );
    }

    #[test]
    fn test_reapplying_record_leaves_generation_alone() {
        let record = PartialIndexRecord::new(
            "a",
            SidebarNode::root("a").with_child(SidebarNode::new(ItemKind::Module, "m")),
        )
        .with_implementor(entry("a", "a::X", "impl T for X"));

        let mut builder = IndexBuilder::new();
        let first = builder.apply_record(record.clone());
        assert!(first.changed());
        assert_eq!(first.implementors_added, 1);

        let second = builder.apply_record(record);
        assert!(!second.changed());
        assert_eq!(second.implementors_skipped, 1);

        assert_eq!(builder.build().generation(), 1);
    }

    #[test]
    fn test_snapshot_survives_later_builds() {
        let mut builder = IndexBuilder::new();
        builder.set_sidebar(PackageName::new("a"), SidebarNode::root("a"));
        let before = builder.build();

        let mut builder = before.to_builder();
        builder.set_sidebar(PackageName::new("b"), SidebarNode::root("b"));
        let after = builder.build();

        assert_eq!(before.package_count(), 1);
        assert_eq!(after.package_count(), 2);
    }
}
