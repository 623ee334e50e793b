use super::package::PackageName;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Declares that some type implements a trait.
///
/// `target_description` is render-ready text (it may carry generic parameters
/// and `where` clauses) and is never parsed. `owner_type_path` is the
/// best-effort canonical path of the implementing type.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, JsonSchema)]
pub struct ImplementorEntry {
    pub trait_path: String,
    pub target_description: String,
    pub owner_type_path: String,
    pub source_package: PackageName,
    /// Auto-trait impls generated by the doc tool rather than written in source.
    #[serde(default)]
    pub synthetic: bool,
}

/// De-duplication key of an implementor within the merged index.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImplementorKey {
    pub trait_path: String,
    pub owner_type_path: String,
    pub target_description: String,
}

impl ImplementorEntry {
    pub fn new(
        trait_path: impl Into<String>,
        owner_type_path: impl Into<String>,
        target_description: impl Into<String>,
        source_package: impl Into<PackageName>,
    ) -> Self {
        Self {
            trait_path: trait_path.into(),
            target_description: target_description.into(),
            owner_type_path: owner_type_path.into(),
            source_package: source_package.into(),
            synthetic: false,
        }
    }

    pub fn synthetic(mut self, synthetic: bool) -> Self {
        self.synthetic = synthetic;
        self
    }

    pub fn key(&self) -> ImplementorKey {
        ImplementorKey {
            trait_path: self.trait_path.clone(),
            owner_type_path: self.owner_type_path.clone(),
            target_description: self.target_description.clone(),
        }
    }

    /// Display order within one trait: package, then description. The owner
    /// path breaks the remaining ties so the order is total.
    pub fn display_order(&self) -> (&str, &str, &str) {
        (
            self.source_package.as_str(),
            &self.target_description,
            &self.owner_type_path,
        )
    }
}
