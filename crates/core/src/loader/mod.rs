//! Turns on-disk artifacts into registrations against a `Session`.
//!
//! Artifacts are read concurrently and registered as each read completes, so
//! the arrival order is whatever the runtime makes of it. The merge engine is
//! attached part-way through (see `LoaderConfig::ready_after`), which sends
//! early records through the pending buffer and late ones straight through.

pub mod records;
pub mod rustdoc;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use docmerge_api::PartialIndexRecord;
use docmerge_ingest::{Delivery, DrainReport};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::config::LoaderConfig;
use crate::error::{DocmergeError, Result};
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    /// `<package>.json` record files
    Records,
    /// Static rustdoc output (`sidebar-items.js`, `implementors/`, `source-files.js`)
    Rustdoc,
}

impl ArtifactFormat {
    pub fn detect(dir: &Path) -> Self {
        let rustdoc_markers = dir.join(rustdoc::IMPLEMENTORS_DIR).is_dir()
            || dir.join(rustdoc::SOURCES_FILE).is_file()
            || walkdir::WalkDir::new(dir)
                .max_depth(2)
                .into_iter()
                .filter_map(|e| e.ok())
                .any(|e| e.file_name() == rustdoc::SIDEBAR_FILE);
        if rustdoc_markers {
            ArtifactFormat::Rustdoc
        } else {
            ArtifactFormat::Records
        }
    }
}

#[derive(Debug, Clone)]
pub struct Rejection {
    pub source: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct LoadSummary {
    pub forwarded: usize,
    pub buffered: usize,
    pub rejected: Vec<Rejection>,
    pub drain: Option<DrainReport>,
}

impl LoadSummary {
    pub fn registered(&self) -> usize {
        self.forwarded + self.buffered
    }
}

enum Pending {
    File(PathBuf),
    Record(Box<PartialIndexRecord>),
}

/// Reads every artifact under `dir`, registers the results with `session`,
/// and makes sure the engine is attached before returning.
pub async fn load_into(
    session: Arc<Session>,
    dir: &Path,
    format: ArtifactFormat,
    config: &LoaderConfig,
) -> Result<LoadSummary> {
    let work: Vec<Pending> = match format {
        ArtifactFormat::Records => records::discover_record_files(dir)?
            .into_iter()
            .map(Pending::File)
            .collect(),
        ArtifactFormat::Rustdoc => {
            let root = dir.to_path_buf();
            tokio::task::spawn_blocking(move || rustdoc::load_rustdoc_dir(&root))
                .await
                .map_err(|e| DocmergeError::Internal(e.to_string()))??
                .into_iter()
                .map(|record| Pending::Record(Box::new(record)))
                .collect()
        }
    };
    tracing::info!(items = work.len(), ?format, "loading artifacts");

    let permits = Arc::new(Semaphore::new(config.concurrency.max(1)));
    let mut tasks = JoinSet::new();
    for item in work {
        let session = Arc::clone(&session);
        let permits = Arc::clone(&permits);
        tasks.spawn(async move {
            let _permit = permits.acquire_owned().await;
            register_one(&session, item).await
        });
    }

    let mut summary = LoadSummary::default();
    if config.ready_after.is_none_or(|n| n == 0) {
        summary.drain = session.ensure_engine()?;
    }

    while let Some(joined) = tasks.join_next().await {
        let (source, result) = joined.map_err(|e| DocmergeError::Internal(e.to_string()))?;
        match result {
            Ok(Delivery::Forwarded) => summary.forwarded += 1,
            Ok(Delivery::Buffered { .. }) => summary.buffered += 1,
            Err(err) => summary.rejected.push(Rejection {
                source,
                reason: err.to_string(),
            }),
        }

        if config.ready_after.is_some_and(|n| summary.registered() >= n) {
            if let Some(report) = session.ensure_engine()? {
                summary.drain = Some(report);
            }
        }
    }

    if let Some(report) = session.ensure_engine()? {
        summary.drain = Some(report);
    }

    tracing::info!(
        forwarded = summary.forwarded,
        buffered = summary.buffered,
        rejected = summary.rejected.len(),
        "artifacts loaded"
    );
    Ok(summary)
}

async fn register_one(session: &Session, item: Pending) -> (String, Result<Delivery>) {
    match item {
        Pending::File(path) => {
            let source = path.display().to_string();
            let result = match records::read_record_async(&path).await {
                Ok(record) => session.register(record),
                Err(err) => Err(err),
            };
            (source, result)
        }
        Pending::Record(record) => {
            let source = record.package.to_string();
            (source, session.register(*record))
        }
    }
}
