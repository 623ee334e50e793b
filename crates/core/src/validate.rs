//! Boundary checks applied to every record before it may reach the merge engine.

use std::collections::HashSet;

use docmerge_api::{
    ItemKind, PackageName, PartialIndexRecord, SidebarNode, SourceTree, ValidationError,
    ValidationResult,
};

pub const PATH_SEPARATOR: &str = "::";

/// Checks `record` without touching any index state.
pub fn validate(record: &PartialIndexRecord) -> ValidationResult<()> {
    if record.package.is_empty() {
        return Err(ValidationError::EmptyPackageName);
    }

    check_sidebar(&record.package, &record.sidebar, &record.sidebar.name)?;

    for entry in &record.implementors {
        validate_trait_path(&entry.trait_path)?;
        if entry.owner_type_path.trim().is_empty() {
            return Err(ValidationError::EmptyOwnerPath {
                trait_path: entry.trait_path.clone(),
            });
        }
        if entry.source_package != record.package {
            return Err(ValidationError::PackageMismatch {
                record: record.package.clone(),
                entry: entry.source_package.clone(),
            });
        }
    }

    if let Some(sources) = &record.sources {
        check_sources(&record.package, sources, &sources.name)?;
    }

    Ok(())
}

/// A trait path is one or more non-empty segments joined by `::`.
pub fn validate_trait_path(trait_path: &str) -> ValidationResult<()> {
    let malformed = |reason| ValidationError::MalformedTraitPath {
        trait_path: trait_path.to_string(),
        reason,
    };

    if trait_path.trim().is_empty() {
        return Err(malformed("path is empty"));
    }
    if trait_path.starts_with(PATH_SEPARATOR) {
        return Err(malformed("leading path separator"));
    }
    if trait_path.ends_with(PATH_SEPARATOR) || trait_path.ends_with(':') {
        return Err(malformed("trailing path separator"));
    }

    for segment in trait_path.split(PATH_SEPARATOR) {
        if segment.is_empty() {
            return Err(malformed("empty path segment"));
        }
        if segment.contains(':') {
            return Err(malformed("ambiguous `:` inside a path segment"));
        }
        if segment.chars().any(char::is_whitespace) {
            return Err(malformed("whitespace inside a path segment"));
        }
    }

    Ok(())
}

fn check_sidebar(package: &PackageName, node: &SidebarNode, path: &str) -> ValidationResult<()> {
    let mut seen: HashSet<(&ItemKind, &str)> = HashSet::with_capacity(node.children.len());
    for child in &node.children {
        if !seen.insert((&child.kind, child.name.as_str())) {
            return Err(ValidationError::DuplicateSidebarKey {
                package: package.clone(),
                parent: path.to_string(),
                kind: child.kind.clone(),
                name: child.name.clone(),
            });
        }
    }

    for child in node.children.iter().filter(|c| !c.children.is_empty()) {
        let child_path = format!("{}{}{}", path, PATH_SEPARATOR, child.name);
        check_sidebar(package, child, &child_path)?;
    }
    Ok(())
}

fn check_sources(package: &PackageName, dir: &SourceTree, path: &str) -> ValidationResult<()> {
    let duplicate = |entry: &str| ValidationError::DuplicateSourceEntry {
        package: package.clone(),
        dir: path.to_string(),
        entry: entry.to_string(),
    };

    let mut files = HashSet::with_capacity(dir.files.len());
    for file in &dir.files {
        if !files.insert(file.as_str()) {
            return Err(duplicate(file));
        }
    }

    let mut dirs = HashSet::with_capacity(dir.dirs.len());
    for sub in &dir.dirs {
        if !dirs.insert(sub.name.as_str()) {
            return Err(duplicate(&sub.name));
        }
    }

    for sub in &dir.dirs {
        let sub_path = if path.is_empty() {
            sub.name.clone()
        } else {
            format!("{}/{}", path, sub.name)
        };
        check_sources(package, sub, &sub_path)?;
    }
    Ok(())
}
