//! Readers for the static index files rustdoc writes next to its HTML:
//! `sidebar-items.js`, `implementors/**/trait.*.js` and `source-files.js`.
//!
//! Every file is a JavaScript wrapper around JSON literals; the wrapper is
//! stripped with a regex and the literal handed to serde.

use std::fs;
use std::path::{Component, Path};

use docmerge_api::{
    ImplementorEntry, ItemKind, PackageName, PartialIndexRecord, SidebarNode, SourceTree,
};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;
use walkdir::WalkDir;

use crate::error::{DocmergeError, Result};
use crate::validate::PATH_SEPARATOR;

pub const SIDEBAR_FILE: &str = "sidebar-items.js";
pub const IMPLEMENTORS_DIR: &str = "implementors";
pub const SOURCES_FILE: &str = "source-files.js";

static SIDEBAR_PAYLOAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)(?:initSidebarItems\s*\(|SIDEBAR_ITEMS\s*=\s*)(\{.*\})")
        .expect("sidebar payload regex")
});

static IMPLEMENTORS_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^\s*implementors\["([^"]+)"\]\s*=\s*(\[.*\]);?\s*$"#)
        .expect("implementors line regex")
});

static SOURCES_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^\s*sourcesIndex\["([^"]+)"\]\s*=\s*(\{.*\});?\s*$"#)
        .expect("sources line regex")
});

#[derive(Debug, Error)]
pub enum RustdocParseError {
    #[error("no {0} payload found")]
    MissingPayload(&'static str),
    #[error("invalid JSON literal: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported sidebar item under `{kind}`: {item}")]
    BadItem { kind: String, item: String },
    #[error("`{0}` is not a trait.<Name>.js implementors file")]
    BadImplementorsPath(String),
}

/// One row of a `sidebar-items.js` listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarItem {
    pub kind: ItemKind,
    pub name: String,
    pub summary: String,
}

#[derive(Deserialize)]
struct RawImplementor {
    text: String,
    #[serde(default)]
    synthetic: bool,
    #[serde(default)]
    types: Vec<String>,
}

/// Parses `initSidebarItems({"mod":[["name","summary"],..],..})`, or the newer
/// `window.SIDEBAR_ITEMS = {"mod":["name",..],..}`, keeping file order.
pub fn parse_sidebar_items(source: &str) -> std::result::Result<Vec<SidebarItem>, RustdocParseError> {
    let payload = SIDEBAR_PAYLOAD
        .captures(source)
        .and_then(|caps| caps.get(1))
        .ok_or(RustdocParseError::MissingPayload("sidebar"))?;
    let groups: IndexMap<String, Vec<serde_json::Value>> = serde_json::from_str(payload.as_str())?;

    let mut items = Vec::new();
    for (kind_key, entries) in groups {
        let kind = ItemKind::from(kind_key.as_str());
        for entry in entries {
            let (name, summary) = match &entry {
                serde_json::Value::String(name) => (name.clone(), String::new()),
                serde_json::Value::Array(parts) => {
                    let name = parts.first().and_then(|v| v.as_str());
                    let summary = parts.get(1).and_then(|v| v.as_str()).unwrap_or_default();
                    match name {
                        Some(name) => (name.to_string(), summary.to_string()),
                        None => {
                            return Err(RustdocParseError::BadItem {
                                kind: kind_key,
                                item: entry.to_string(),
                            });
                        }
                    }
                }
                _ => {
                    return Err(RustdocParseError::BadItem {
                        kind: kind_key,
                        item: entry.to_string(),
                    });
                }
            };
            items.push(SidebarItem {
                kind: kind.clone(),
                name,
                summary,
            });
        }
    }
    Ok(items)
}

/// Parses every `implementors["pkg"] = [...]` line of one trait's file.
///
/// The owner path is the first entry of `types`; descriptions without one
/// fall back to the description itself so the entry stays addressable.
pub fn parse_implementors(
    source: &str,
    trait_path: &str,
) -> std::result::Result<Vec<ImplementorEntry>, RustdocParseError> {
    let mut out = Vec::new();
    for caps in IMPLEMENTORS_LINE.captures_iter(source) {
        let package = PackageName::new(&caps[1]);
        let raw: Vec<RawImplementor> = serde_json::from_str(&caps[2])?;
        for item in raw {
            let owner = item
                .types
                .into_iter()
                .next()
                .unwrap_or_else(|| item.text.clone());
            out.push(
                ImplementorEntry::new(trait_path, owner, item.text, package.clone())
                    .synthetic(item.synthetic),
            );
        }
    }
    Ok(out)
}

/// Parses every `sourcesIndex["pkg"] = {...}` line of `source-files.js`.
pub fn parse_source_files(
    source: &str,
) -> std::result::Result<Vec<(PackageName, SourceTree)>, RustdocParseError> {
    SOURCES_LINE
        .captures_iter(source)
        .map(|caps| -> std::result::Result<_, RustdocParseError> {
            let tree: SourceTree = serde_json::from_str(&caps[2])?;
            Ok((PackageName::new(&caps[1]), tree))
        })
        .collect()
}

/// `serde/de/trait.Deserializer.js` -> `serde::de::Deserializer`
pub fn trait_path_from_file(relative: &Path) -> std::result::Result<String, RustdocParseError> {
    let bad = || RustdocParseError::BadImplementorsPath(relative.display().to_string());

    let mut segments = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => segments.push(part.to_str().ok_or_else(bad)?),
            _ => return Err(bad()),
        }
    }

    let file = segments.pop().ok_or_else(bad)?;
    let name = file
        .strip_prefix("trait.")
        .and_then(|rest| rest.strip_suffix(".js"))
        .filter(|name| !name.is_empty())
        .ok_or_else(bad)?;
    segments.push(name);
    Ok(segments.join(PATH_SEPARATOR))
}

/// Adds `items` under the module at `module_path`, creating missing modules.
/// An item already present keeps its position; a missing summary is filled in.
pub fn insert_sidebar_items(root: &mut SidebarNode, module_path: &[String], items: Vec<SidebarItem>) {
    let mut node = root;
    for segment in module_path {
        node = ensure_module(node, segment);
    }

    for item in items {
        if let Some(existing) = node.find_child_mut(&item.kind, &item.name) {
            if existing.summary.is_empty() {
                existing.summary = item.summary;
            }
            continue;
        }
        node.push_child(SidebarNode::new(item.kind, item.name).with_summary(item.summary));
    }
}

fn ensure_module<'n>(node: &'n mut SidebarNode, name: &str) -> &'n mut SidebarNode {
    let idx = match node
        .children
        .iter()
        .position(|c| c.kind == ItemKind::Module && c.name == name)
    {
        Some(idx) => idx,
        None => {
            node.push_child(SidebarNode::new(ItemKind::Module, name));
            node.children.len() - 1
        }
    };
    &mut node.children[idx]
}

fn relative_dirs(root: &Path, file: &Path) -> Option<Vec<String>> {
    let parent = file.strip_prefix(root).ok()?.parent()?;
    parent
        .components()
        .map(|c| match c {
            Component::Normal(part) => part.to_str().map(str::to_string),
            _ => None,
        })
        .collect()
}

fn artifact_error(path: &Path, err: RustdocParseError) -> DocmergeError {
    DocmergeError::artifact(path, err.to_string())
}

/// Reads a rustdoc output directory into one record per package, in the
/// order packages are first seen.
pub fn load_rustdoc_dir(root: &Path) -> Result<Vec<PartialIndexRecord>> {
    let mut records: IndexMap<PackageName, PartialIndexRecord> = IndexMap::new();

    let mut sidebar_files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() || entry.file_name() != SIDEBAR_FILE {
            continue;
        }
        let Some(dirs) = relative_dirs(root, entry.path()) else {
            continue;
        };
        let skip = matches!(
            dirs.first().map(String::as_str),
            None | Some(IMPLEMENTORS_DIR) | Some("src")
        );
        if !skip {
            sidebar_files.push((dirs, entry.into_path()));
        }
    }
    // Parents first, so a module's own listing lands before its children's.
    sidebar_files.sort_by(|a, b| a.0.len().cmp(&b.0.len()).then_with(|| a.0.cmp(&b.0)));

    for (dirs, path) in sidebar_files {
        let source = fs::read_to_string(&path)?;
        let items = parse_sidebar_items(&source).map_err(|e| artifact_error(&path, e))?;
        let package = PackageName::new(&dirs[0]);
        let record = records
            .entry(package.clone())
            .or_insert_with(|| PartialIndexRecord::empty(package));
        insert_sidebar_items(&mut record.sidebar, &dirs[1..], items);
    }

    let implementors_root = root.join(IMPLEMENTORS_DIR);
    if implementors_root.is_dir() {
        for entry in WalkDir::new(&implementors_root).sort_by_file_name() {
            let entry = entry.map_err(std::io::Error::from)?;
            let is_trait_file = entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with("trait.") && name.ends_with(".js"));
            if !entry.file_type().is_file() || !is_trait_file {
                continue;
            }

            let path = entry.path();
            let relative = path
                .strip_prefix(&implementors_root)
                .map_err(|e| DocmergeError::artifact(path, e.to_string()))?;
            let trait_path = trait_path_from_file(relative).map_err(|e| artifact_error(path, e))?;
            let source = fs::read_to_string(path)?;
            let entries =
                parse_implementors(&source, &trait_path).map_err(|e| artifact_error(path, e))?;

            for implementor in entries {
                let package = implementor.source_package.clone();
                records
                    .entry(package.clone())
                    .or_insert_with(|| PartialIndexRecord::empty(package))
                    .implementors
                    .push(implementor);
            }
        }
    }

    let sources_path = root.join(SOURCES_FILE);
    if sources_path.is_file() {
        let source = fs::read_to_string(&sources_path)?;
        let trees = parse_source_files(&source).map_err(|e| artifact_error(&sources_path, e))?;
        for (package, tree) in trees {
            records
                .entry(package.clone())
                .or_insert_with(|| PartialIndexRecord::empty(package))
                .sources = Some(tree);
        }
    }

    tracing::info!(
        packages = records.len(),
        root = %root.display(),
        "read rustdoc artifacts"
    );
    Ok(records.into_values().collect())
}
