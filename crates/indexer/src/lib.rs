//! Project indexing: scanning, chunking, embedding and persistence.
//!
//! Supports full and incremental runs. Incremental indexing is driven by
//! per-file content digests persisted in `.droid-context/state.json`;
//! chunk extraction is cached per content digest so unchanged files never
//! hit the parsers twice.

mod chunk_cache;
mod error;
mod indexer;
mod project_deps;
mod scanner;
mod state;
mod stats;

pub use chunk_cache::ChunkCache;
pub use error::{IndexerError, Result};
pub use indexer::{IndexEvent, IndexMode, ProjectIndexer};
pub use project_deps::{ProjectDependencies, ProjectDependencyParser};
pub use scanner::FileScanner;
pub use state::{chunk_cache_dir, context_dir, index_path, state_path, IndexState};
pub use stats::IndexStats;
