use crate::bm25::Bm25Index;
use crate::embeddings::EmbeddingModel;
use crate::error::Result;
use crate::types::{chunk_id, SearchResult, StoredChunk};
use droid_code_chunker::CodeChunk;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Persistent chunk store with dense and BM25 retrieval
pub struct VectorStore {
    chunks: HashMap<String, StoredChunk>,
    bm25: Bm25Index,
    embedder: EmbeddingModel,
    path: std::path::PathBuf,
}

impl VectorStore {
    /// Create an empty store that will persist at `path`
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        log::info!("Initializing vector store at {}", path.as_ref().display());
        let embedder = EmbeddingModel::new()?;
        Ok(Self {
            chunks: HashMap::new(),
            bm25: Bm25Index::empty(),
            embedder,
            path: path.as_ref().to_path_buf(),
        })
    }

    /// Load a previously saved store from disk
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading vector store from {}", path.display());

        let data = tokio::fs::read_to_string(path).await?;
        let chunks: HashMap<String, StoredChunk> = serde_json::from_str(&data)?;
        let embedder = EmbeddingModel::new()?;

        let mut store = Self {
            chunks,
            bm25: Bm25Index::empty(),
            embedder,
            path: path.to_path_buf(),
        };
        store.rebuild_bm25();

        log::info!("Loaded {} chunks", store.chunks.len());
        Ok(store)
    }

    /// Store chunks, replacing whatever was previously stored for the same
    /// files. Returns the number of chunks inserted.
    pub async fn store_chunks(&mut self, chunks: Vec<CodeChunk>) -> Result<usize> {
        if chunks.is_empty() {
            return Ok(0);
        }

        // Re-indexed files fully replace their previous chunks
        let files: HashSet<&str> = chunks.iter().map(|c| c.file_path.as_str()).collect();
        self.chunks
            .retain(|_, stored| !files.contains(stored.chunk.file_path.as_str()));

        let contents: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
        let vectors = self.embedder.embed_batch(contents).await?;

        let inserted = chunks.len();
        for (chunk, vector) in chunks.into_iter().zip(vectors) {
            let id = chunk_id(&chunk);
            self.chunks.insert(id.clone(), StoredChunk { id, chunk, vector });
        }

        self.rebuild_bm25();
        log::debug!("Stored {inserted} chunks, total {}", self.chunks.len());
        Ok(inserted)
    }

    /// Dense search: cosine similarity of the query embedding
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        log::debug!("Dense search: '{query}' (limit {limit})");
        let query_vector = self.embedder.embed(query).await?;

        let mut results: Vec<SearchResult> = self
            .chunks
            .values()
            .map(|stored| SearchResult {
                id: stored.id.clone(),
                chunk: stored.chunk.clone(),
                score: dot(&stored.vector, &query_vector),
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        results.truncate(limit);
        Ok(results)
    }

    /// Keyword search: raw BM25 scores over the stored corpus
    #[must_use]
    pub fn keyword_search(&self, query: &str, limit: usize) -> Vec<SearchResult> {
        self.bm25
            .search(query, limit)
            .into_iter()
            .filter_map(|(id, score)| {
                self.chunks.get(&id).map(|stored| SearchResult {
                    id,
                    chunk: stored.chunk.clone(),
                    score,
                })
            })
            .collect()
    }

    /// Drop chunks whose file is no longer present. Returns removed count.
    pub fn purge_missing_files(&mut self, live_files: &HashSet<String>) -> usize {
        let before = self.chunks.len();
        self.chunks
            .retain(|_, stored| live_files.contains(&stored.chunk.file_path));
        let removed = before - self.chunks.len();
        if removed > 0 {
            self.rebuild_bm25();
        }
        removed
    }

    /// Get chunk by ID
    #[must_use]
    pub fn get_chunk(&self, id: &str) -> Option<&StoredChunk> {
        self.chunks.get(id)
    }

    /// Iterate over all stored chunks
    pub fn chunks(&self) -> impl Iterator<Item = &StoredChunk> {
        self.chunks.values()
    }

    /// Total number of chunks
    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Check if store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Persist the store to disk
    pub async fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let data = serde_json::to_string(&self.chunks)?;
        tokio::fs::write(&self.path, data).await?;
        log::info!(
            "Saved {} chunks to {}",
            self.chunks.len(),
            self.path.display()
        );
        Ok(())
    }

    fn rebuild_bm25(&mut self) {
        self.bm25 = Bm25Index::build(
            self.chunks
                .values()
                .map(|stored| (stored.id.as_str(), stored.chunk.content.as_str())),
        );
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}
