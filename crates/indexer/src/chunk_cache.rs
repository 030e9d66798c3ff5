use droid_code_chunker::FileAnalysis;
use std::path::{Path, PathBuf};

/// Per-file chunk cache keyed by content digest.
///
/// Chunking the same content twice is pure waste; cache entries are
/// immutable because the key already encodes the content. Everything here
/// is best-effort: a broken cache only costs re-chunking.
pub struct ChunkCache {
    dir: PathBuf,
}

impl ChunkCache {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Look up the analysis for a content digest
    pub fn load(&self, content_hash: &str) -> Option<FileAnalysis> {
        let path = self.entry_path(content_hash);
        let raw = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(analysis) => Some(analysis),
            Err(e) => {
                log::warn!("Dropping corrupt chunk cache entry {}: {e}", path.display());
                let _ = std::fs::remove_file(&path);
                None
            }
        }
    }

    /// Store the analysis for a content digest
    pub fn store(&self, content_hash: &str, analysis: &FileAnalysis) {
        if let Err(e) = std::fs::create_dir_all(&self.dir) {
            log::warn!("Failed to create chunk cache dir {}: {e}", self.dir.display());
            return;
        }
        let path = self.entry_path(content_hash);
        match serde_json::to_string(analysis) {
            Ok(data) => {
                if let Err(e) = std::fs::write(&path, data) {
                    log::warn!("Failed to write chunk cache entry {}: {e}", path.display());
                }
            }
            Err(e) => log::warn!("Failed to serialize chunk cache entry: {e}"),
        }
    }

    fn entry_path(&self, content_hash: &str) -> PathBuf {
        self.dir.join(format!("{content_hash}.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use droid_code_chunker::{ChunkKind, ChunkMetadata, CodeChunk};
    use tempfile::TempDir;

    fn analysis() -> FileAnalysis {
        FileAnalysis {
            chunks: vec![CodeChunk::new(
                "Main.kt".to_string(),
                1,
                3,
                "class Main".to_string(),
                ChunkMetadata::new(ChunkKind::Class),
            )],
            imports: vec!["java.util.List".to_string()],
        }
    }

    #[test]
    fn store_then_load() {
        let dir = TempDir::new().unwrap();
        let cache = ChunkCache::new(dir.path());

        cache.store("abc123", &analysis());
        let loaded = cache.load("abc123").unwrap();

        assert_eq!(loaded.chunks.len(), 1);
        assert_eq!(loaded.imports, vec!["java.util.List".to_string()]);
    }

    #[test]
    fn miss_returns_none() {
        let dir = TempDir::new().unwrap();
        let cache = ChunkCache::new(dir.path());
        assert!(cache.load("nope").is_none());
    }

    #[test]
    fn corrupt_entry_is_dropped() {
        let dir = TempDir::new().unwrap();
        let cache = ChunkCache::new(dir.path());

        std::fs::write(dir.path().join("bad.json"), "{broken").unwrap();
        assert!(cache.load("bad").is_none());
        assert!(!dir.path().join("bad.json").exists());
    }
}
