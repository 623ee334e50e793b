use crate::models::{ItemKind, PackageName};

/// Why a partial index record was rejected before reaching the merge engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("record has an empty package name")]
    EmptyPackageName,
    #[error("duplicate sidebar entry {kind} `{name}` under `{parent}` in package {package}")]
    DuplicateSidebarKey {
        package: PackageName,
        parent: String,
        kind: ItemKind,
        name: String,
    },
    #[error("malformed trait path `{trait_path}`: {reason}")]
    MalformedTraitPath {
        trait_path: String,
        reason: &'static str,
    },
    #[error("implementor of `{trait_path}` has an empty owner type path")]
    EmptyOwnerPath { trait_path: String },
    #[error("implementor attributed to {entry} inside the record of {record}")]
    PackageMismatch {
        record: PackageName,
        entry: PackageName,
    },
    #[error("source directory `{dir}` of package {package} lists `{entry}` twice")]
    DuplicateSourceEntry {
        package: PackageName,
        dir: String,
        entry: String,
    },
}

pub type ValidationResult<T> = std::result::Result<T, ValidationError>;
