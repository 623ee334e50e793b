pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod loader;
pub mod logging;
pub mod query;
pub mod session;
pub mod validate;

pub use config::DocmergeConfig;
pub use engine::MergeEngine;
pub use error::{DocmergeError, Result};
pub use index::{GlobalIndex, IndexBuilder, IngestOutcome};
pub use query::{IndexStats, QueryEngine, SearchHit};
pub use session::Session;
pub use validate::validate;
