use super::implementor::ImplementorEntry;
use super::package::PackageName;
use super::sidebar::SidebarNode;
use super::source::SourceTree;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Everything one package contributes to the merged index.
///
/// Produced once per package by the extractor and consumed once by the merge
/// engine; only its effects outlive ingestion.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct PartialIndexRecord {
    pub package: PackageName,
    pub sidebar: SidebarNode,
    #[serde(default)]
    pub implementors: Vec<ImplementorEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<SourceTree>,
}

impl PartialIndexRecord {
    pub fn new(package: impl Into<PackageName>, sidebar: SidebarNode) -> Self {
        Self {
            package: package.into(),
            sidebar,
            implementors: Vec::new(),
            sources: None,
        }
    }

    /// Record with a bare module root named after the package.
    pub fn empty(package: impl Into<PackageName>) -> Self {
        let package = package.into();
        let sidebar = SidebarNode::root(package.as_str());
        Self::new(package, sidebar)
    }

    pub fn with_implementor(mut self, entry: ImplementorEntry) -> Self {
        self.implementors.push(entry);
        self
    }

    pub fn with_sources(mut self, sources: SourceTree) -> Self {
        self.sources = Some(sources);
        self
    }
}
