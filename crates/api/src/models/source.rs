use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Directory listing of a package's documented source files.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, JsonSchema)]
pub struct SourceTree {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dirs: Vec<SourceTree>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,
}

impl SourceTree {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn file_count(&self) -> usize {
        self.files.len() + self.dirs.iter().map(SourceTree::file_count).sum::<usize>()
    }

    /// Relative paths of every file, directories first in listing order.
    pub fn paths(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.file_count());
        self.collect_paths("", &mut out);
        out
    }

    fn collect_paths(&self, prefix: &str, out: &mut Vec<String>) {
        for dir in &self.dirs {
            let nested = if prefix.is_empty() {
                dir.name.clone()
            } else {
                format!("{}/{}", prefix, dir.name)
            };
            dir.collect_paths(&nested, out);
        }
        for file in &self.files {
            if prefix.is_empty() {
                out.push(file.clone());
            } else {
                out.push(format!("{}/{}", prefix, file));
            }
        }
    }
}
