use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Session-wide settings, optionally read from a JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocmergeConfig {
    pub loader: LoaderConfig,
    pub query: QueryConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Upper bound on artifact reads in flight at once.
    pub concurrency: usize,
    /// Attach the merge engine once this many records have been registered.
    /// `None` attaches it after every load has been started.
    pub ready_after: Option<usize>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            concurrency: 8,
            ready_after: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub search_limit: usize,
    pub show_synthetic: bool,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            search_limit: 50,
            show_synthetic: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub component: String,
    pub to_stderr: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            component: "cli".to_string(),
            to_stderr: false,
        }
    }
}

impl DocmergeConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}
