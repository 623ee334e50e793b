//! One JSON file per package, each holding a serialized `PartialIndexRecord`.

use std::path::{Path, PathBuf};

use docmerge_api::PartialIndexRecord;
use walkdir::WalkDir;

use crate::error::Result;

pub const RECORD_EXTENSION: &str = "json";

pub fn read_record(path: &Path) -> Result<PartialIndexRecord> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

pub async fn read_record_async(path: &Path) -> Result<PartialIndexRecord> {
    let raw = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&raw)?)
}

/// Writes `<dir>/<package>.json` and returns its path.
pub fn write_record(dir: &Path, record: &PartialIndexRecord) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.{}", record.package, RECORD_EXTENSION));
    let json = serde_json::to_string_pretty(record)?;
    std::fs::write(&path, json)?;
    Ok(path)
}

/// Record files directly inside `dir`, sorted by name.
pub fn discover_record_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::from)?;
        let is_record = entry
            .path()
            .extension()
            .is_some_and(|ext| ext == RECORD_EXTENSION);
        if entry.file_type().is_file() && is_record {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
