use crate::chunk_cache::ChunkCache;
use crate::error::{IndexerError, Result};
use crate::project_deps::ProjectDependencyParser;
use crate::scanner::FileScanner;
use crate::state::{chunk_cache_dir, index_path, state_path, IndexState};
use crate::stats::IndexStats;
use droid_code_chunker::{resolve_import_to_path, Chunker, ChunkerConfig, Language};
use droid_graph::{DependencyGraph, DependencyKind};
use droid_vector_store::VectorStore;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// How much of the project to re-process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexMode {
    /// Process every file, ignoring previous state
    Full,
    /// Process only files whose content digest changed
    Incremental,
}

/// Progress notifications emitted during an index run
#[derive(Debug, Clone)]
pub enum IndexEvent {
    /// Scanning finished, `files` candidates found
    Scanned { files: usize },
    /// One file was processed
    FileIndexed { path: String },
}

/// Project indexer: scans, chunks, embeds and persists
pub struct ProjectIndexer {
    root: PathBuf,
    chunker: Chunker,
    cache: ChunkCache,
}

impl ProjectIndexer {
    /// Create a new indexer for a project root
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(IndexerError::InvalidPath(format!(
                "Not a project directory: {}",
                root.display()
            )));
        }

        let cache = ChunkCache::new(chunk_cache_dir(&root));
        Ok(Self {
            root,
            chunker: Chunker::new(ChunkerConfig::default()),
            cache,
        })
    }

    /// Project root this indexer operates on
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Index the project
    pub async fn index(&self, mode: IndexMode) -> Result<IndexStats> {
        self.index_with_observer(mode, |_| {}).await
    }

    /// Index the project, reporting progress through `observer`
    pub async fn index_with_observer(
        &self,
        mode: IndexMode,
        mut observer: impl FnMut(IndexEvent),
    ) -> Result<IndexStats> {
        let start = Instant::now();
        let mut stats = IndexStats::new();
        log::info!("Indexing project at {}", self.root.display());

        let files = FileScanner::new(&self.root).scan();
        observer(IndexEvent::Scanned { files: files.len() });

        let dependencies = ProjectDependencyParser::new(&self.root).parse();
        log::info!(
            "Project dependencies: {} libraries, plugins [{}]",
            dependencies.libraries.len(),
            dependencies.plugins.join(", ")
        );
        if !dependencies.di_frameworks.is_empty() {
            let frameworks: Vec<&str> =
                dependencies.di_frameworks.iter().map(String::as_str).collect();
            log::info!("Detected DI frameworks: {}", frameworks.join(", "));
        }
        if dependencies.uses_compose {
            log::info!("Project uses Jetpack Compose");
        }
        stats.dependencies = Some(dependencies);

        // Previous state is only usable together with a loadable index
        let idx_path = index_path(&self.root);
        let loaded_state = match mode {
            IndexMode::Full => None,
            IndexMode::Incremental => IndexState::load(state_path(&self.root)),
        };
        let (mut store, previous) = match loaded_state {
            Some(state) if idx_path.exists() => match VectorStore::load(&idx_path).await {
                Ok(store) => (store, Some(state)),
                Err(e) => {
                    log::warn!("Failed to load existing index: {e}; rebuilding");
                    (VectorStore::new(&idx_path)?, None)
                }
            },
            _ => (VectorStore::new(&idx_path)?, None),
        };

        let mut graph = DependencyGraph::new();
        if let Some(state) = &previous {
            graph.set_hashes(
                state
                    .file_hashes
                    .iter()
                    .map(|(rel, digest)| (self.absolute(rel), digest.clone()))
                    .collect(),
            );
        }

        // Drop everything belonging to files that vanished from the project
        if previous.is_some() {
            let live_rel: HashSet<String> = files.iter().map(|p| self.relative(p)).collect();

            let removed = store.purge_missing_files(&live_rel);
            if removed > 0 {
                log::info!("Purged {removed} stale chunks from deleted files");
            }

            let stale: Vec<String> = graph
                .hashes()
                .keys()
                .filter(|abs| !live_rel.contains(&self.relative(Path::new(abs))))
                .cloned()
                .collect();
            for path in stale {
                graph.remove_hash(&path);
            }
        }

        let to_process: Vec<PathBuf> = if previous.is_some() {
            files
                .iter()
                .filter(|p| graph.has_changed(&p.to_string_lossy()))
                .cloned()
                .collect()
        } else {
            files
        };
        if previous.is_some() {
            log::info!("Incremental: processing {} changed files", to_process.len());
        }

        for path in &to_process {
            let rel = self.relative(path);
            match self
                .process_file(path, &rel, &mut store, &mut graph, &mut stats)
                .await
            {
                Ok(()) => observer(IndexEvent::FileIndexed { path: rel }),
                Err(e) => {
                    stats.add_error(format!("Error processing {}: {e}", path.display()));
                }
            }
        }

        store.save().await?;

        let mut state = previous.unwrap_or_default();
        state.file_hashes = graph
            .hashes()
            .iter()
            .filter_map(|(abs, digest)| {
                let rel = Path::new(abs).strip_prefix(&self.root).ok()?;
                Some((rel.to_string_lossy().to_string(), digest.clone()))
            })
            .collect();
        state.touch();
        state.save(state_path(&self.root))?;

        stats.time_ms = start.elapsed().as_millis().try_into().unwrap_or(u64::MAX);
        log::info!(
            "Indexing completed: {} files, {} chunks in {} ms",
            stats.files,
            stats.chunks,
            stats.time_ms
        );
        Ok(stats)
    }

    async fn process_file(
        &self,
        path: &Path,
        rel: &str,
        store: &mut VectorStore,
        graph: &mut DependencyGraph,
        stats: &mut IndexStats,
    ) -> Result<()> {
        log::debug!("Processing {rel}");
        let abs = path.to_string_lossy().to_string();
        let content = tokio::fs::read_to_string(path).await?;

        graph.add_file(&abs);
        if content.is_empty() {
            graph.update_hash(&abs);
            return Ok(());
        }

        let digest = hash_content(&content);
        let analysis = match self.cache.load(&digest) {
            Some(analysis) => analysis,
            None => {
                let analysis = self.chunker.chunk_str(&content, rel)?;
                self.cache.store(&digest, &analysis);
                analysis
            }
        };

        for import in &analysis.imports {
            if let Some(target) = resolve_import_to_path(import, &abs) {
                graph.add_dependency(&abs, &target.to_string_lossy(), DependencyKind::Imports);
            }
        }

        let stored = store.store_chunks(analysis.chunks).await?;
        stats.add_file(Language::from_path(path).as_str(), content.lines().count());
        stats.add_chunks(stored);
        graph.update_hash(&abs);
        Ok(())
    }

    fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string()
    }

    fn absolute(&self, rel: &str) -> String {
        self.root.join(rel).to_string_lossy().to_string()
    }
}

fn hash_content(content: &str) -> String {
    let digest = Sha256::digest(content.as_bytes());
    format!("{digest:x}")
}
