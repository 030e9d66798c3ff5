use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

const STATE_SCHEMA_VERSION: u32 = 1;

/// Directory holding all index artifacts for a project
pub fn context_dir(root: impl AsRef<Path>) -> PathBuf {
    root.as_ref().join(".droid-context")
}

/// Path of the persisted vector store
pub fn index_path(root: impl AsRef<Path>) -> PathBuf {
    context_dir(root).join("index.json")
}

/// Path of the persisted index state
pub fn state_path(root: impl AsRef<Path>) -> PathBuf {
    context_dir(root).join("state.json")
}

/// Directory of the per-file chunk cache
pub fn chunk_cache_dir(root: impl AsRef<Path>) -> PathBuf {
    context_dir(root).join("chunks")
}

/// Persisted index state: file digests and the last index timestamp.
///
/// This is what makes `--incremental` work across process runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexState {
    pub schema_version: u32,

    /// Unix seconds of the last completed index run
    pub last_index_time: u64,

    /// Relative file path -> content digest
    pub file_hashes: HashMap<String, String>,
}

impl IndexState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            schema_version: STATE_SCHEMA_VERSION,
            last_index_time: 0,
            file_hashes: HashMap::new(),
        }
    }

    /// Load state from disk. Missing, unreadable or incompatible state
    /// returns None, degrading the next run to a full index.
    pub fn load(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("Failed to read index state {}: {e}", path.display());
                }
                return None;
            }
        };

        match serde_json::from_str::<Self>(&raw) {
            Ok(state) if state.schema_version == STATE_SCHEMA_VERSION => Some(state),
            Ok(state) => {
                log::warn!(
                    "Index state schema {} unsupported (expected {STATE_SCHEMA_VERSION}); rebuilding",
                    state.schema_version
                );
                None
            }
            Err(e) => {
                log::warn!("Corrupt index state {}: {e}; rebuilding", path.display());
                None
            }
        }
    }

    /// Persist state to disk
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string(self)?;
        std::fs::write(path, data)?;
        Ok(())
    }

    /// Record "now" as the last index time
    pub fn touch(&mut self) {
        self.last_index_time = unix_now();
    }

    /// Seconds since the last index run (u64::MAX when never indexed)
    #[must_use]
    pub fn age_secs(&self) -> u64 {
        if self.last_index_time == 0 {
            return u64::MAX;
        }
        unix_now().saturating_sub(self.last_index_time)
    }
}

impl Default for IndexState {
    fn default() -> Self {
        Self::new()
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");

        let mut state = IndexState::new();
        state
            .file_hashes
            .insert("app/src/Main.kt".to_string(), "abc".to_string());
        state.touch();
        state.save(&path).unwrap();

        let loaded = IndexState::load(&path).unwrap();
        assert_eq!(loaded.file_hashes, state.file_hashes);
        assert_eq!(loaded.last_index_time, state.last_index_time);
    }

    #[test]
    fn missing_state_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(IndexState::load(dir.path().join("state.json")).is_none());
    }

    #[test]
    fn corrupt_state_is_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(IndexState::load(&path).is_none());
    }

    #[test]
    fn never_indexed_is_ancient() {
        let state = IndexState::new();
        assert_eq!(state.age_secs(), u64::MAX);
    }

    #[test]
    fn context_paths_nest_under_root() {
        let root = Path::new("/tmp/project");
        assert_eq!(index_path(root), root.join(".droid-context/index.json"));
        assert_eq!(state_path(root), root.join(".droid-context/state.json"));
        assert_eq!(chunk_cache_dir(root), root.join(".droid-context/chunks"));
    }
}
