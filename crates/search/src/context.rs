use crate::error::Result;
use crate::hybrid::HybridSearch;
use crate::query::{QueryClassifier, QueryKind};
use droid_code_chunker::ChunkKind;
use droid_vector_store::SearchResult;
use std::collections::BTreeMap;

/// Default number of chunks pulled into a context
pub const DEFAULT_MAX_CHUNKS: usize = 15;

/// A chunk as it appears in a file's context group
#[derive(Debug, Clone)]
pub struct FileContext {
    pub content: String,
    pub kind: ChunkKind,
    pub score: f32,
}

/// Context assembled for a query
#[derive(Debug, Clone)]
pub struct RetrievedContext {
    /// What kind of question this is
    pub query_kind: QueryKind,

    /// Ranked hits, best first
    pub chunks: Vec<SearchResult>,

    /// The same hits grouped per file (deterministic order)
    pub files: BTreeMap<String, Vec<FileContext>>,
}

impl RetrievedContext {
    /// Check whether retrieval produced anything at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

/// Finds relevant context for natural-language queries
pub struct ContextRetrievalEngine {
    search: HybridSearch,
}

impl ContextRetrievalEngine {
    #[must_use]
    pub fn new(search: HybridSearch) -> Self {
        Self { search }
    }

    /// Retrieve context for a query
    pub async fn get_context(&self, query: &str, max_chunks: usize) -> Result<RetrievedContext> {
        let query_kind = QueryClassifier::classify(query);
        log::debug!("Query classified as '{}'", query_kind.as_str());

        let chunks = self.search.search(query, max_chunks).await?;

        let mut files: BTreeMap<String, Vec<FileContext>> = BTreeMap::new();
        for hit in &chunks {
            files
                .entry(hit.chunk.file_path.clone())
                .or_default()
                .push(FileContext {
                    content: hit.chunk.content.clone(),
                    kind: hit.chunk.metadata.kind,
                    score: hit.score,
                });
        }

        Ok(RetrievedContext {
            query_kind,
            chunks,
            files,
        })
    }
}
