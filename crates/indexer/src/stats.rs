use crate::project_deps::ProjectDependencies;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Statistics about an indexing run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexStats {
    /// Number of files processed this run
    pub files: usize,

    /// Number of chunks stored this run
    pub chunks: usize,

    /// Total lines across processed files
    pub total_lines: usize,

    /// Time taken in milliseconds
    pub time_ms: u64,

    /// Processed file counts per language
    pub languages: HashMap<String, usize>,

    /// Per-file errors encountered (the run itself continues)
    pub errors: Vec<String>,

    /// Project dependency report
    pub dependencies: Option<ProjectDependencies>,
}

impl IndexStats {
    pub fn new() -> Self {
        Self {
            files: 0,
            chunks: 0,
            total_lines: 0,
            time_ms: 0,
            languages: HashMap::new(),
            errors: Vec::new(),
            dependencies: None,
        }
    }

    pub fn add_file(&mut self, language: &str, lines: usize) {
        self.files += 1;
        self.total_lines += lines;
        *self.languages.entry(language.to_string()).or_insert(0) += 1;
    }

    pub fn add_chunks(&mut self, count: usize) {
        self.chunks += count;
    }

    pub fn add_error(&mut self, error: String) {
        log::error!("{error}");
        self.errors.push(error);
    }
}

impl Default for IndexStats {
    fn default() -> Self {
        Self::new()
    }
}
