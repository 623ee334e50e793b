use std::sync::Arc;

use docmerge_core::{DocmergeConfig, GlobalIndex, QueryEngine, Session, loader};
use tracing::{info, warn};

use crate::SourceArgs;

/// Loads every artifact under the source directory into a fresh session and
/// returns a query view over the merged result.
pub async fn open(
    source: &SourceArgs,
    config: &DocmergeConfig,
) -> Result<QueryEngine<GlobalIndex>, Box<dyn std::error::Error>> {
    let session = Arc::new(Session::new());
    let format = source.artifact_format();

    info!("Loading {:?} artifacts from {}...", format, source.dir.display());
    let summary =
        loader::load_into(Arc::clone(&session), &source.dir, format, &config.loader).await?;

    for rejection in &summary.rejected {
        warn!("Skipped {}: {}", rejection.source, rejection.reason);
    }
    info!(
        "Registered {} records ({} buffered before the engine was ready, {} rejected)",
        summary.registered(),
        summary.buffered,
        summary.rejected.len()
    );

    Ok(session.query())
}
