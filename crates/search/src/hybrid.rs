use crate::error::{Result, SearchError};
use droid_vector_store::{SearchResult, VectorStore};
use std::collections::HashSet;

/// BM25 scores are unbounded; cap their contribution at this divisor so
/// keyword hits stay comparable to cosine scores in [0, 1].
const BM25_NORMALIZATION: f32 = 10.0;

/// Hybrid search combining dense and keyword retrieval
pub struct HybridSearch {
    store: VectorStore,
}

impl HybridSearch {
    /// Create a hybrid search engine over a loaded store
    #[must_use]
    pub fn new(store: VectorStore) -> Self {
        Self { store }
    }

    /// Search with the full hybrid strategy: dense + BM25, normalized,
    /// deduplicated by chunk id, best `limit` results.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        if query.trim().is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        log::debug!("Hybrid search: query='{query}', limit={limit}");

        let dense = self.store.search(query, limit).await?;
        log::debug!("Dense: {} results", dense.len());

        let keyword = self.store.keyword_search(query, limit);
        log::debug!("Keyword: {} results", keyword.len());

        Ok(combine_results(dense, keyword, limit))
    }

    /// Dense-only search (skips the keyword pass)
    pub async fn search_dense_only(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        if query.trim().is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        self.store.search(query, limit).await.map_err(Into::into)
    }

    /// Underlying store
    #[must_use]
    pub fn store(&self) -> &VectorStore {
        &self.store
    }
}

/// Merge both rankings: dense scores pass through, keyword scores are
/// normalized to [0, 1]; the first occurrence of a chunk id wins.
fn combine_results(
    dense: Vec<SearchResult>,
    keyword: Vec<SearchResult>,
    limit: usize,
) -> Vec<SearchResult> {
    let mut combined = dense;
    combined.extend(keyword.into_iter().map(|mut result| {
        result.score = (result.score / BM25_NORMALIZATION).min(1.0);
        result
    }));

    let mut seen = HashSet::new();
    combined.retain(|result| seen.insert(result.id.clone()));

    combined.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
    combined.truncate(limit);
    combined
}

#[cfg(test)]
mod tests {
    use super::*;
    use droid_code_chunker::{ChunkKind, ChunkMetadata, CodeChunk};

    fn result(id: &str, score: f32) -> SearchResult {
        SearchResult {
            id: id.to_string(),
            chunk: CodeChunk::new(
                format!("{id}.kt"),
                1,
                5,
                format!("content of {id}"),
                ChunkMetadata::new(ChunkKind::Function),
            ),
            score,
        }
    }

    #[test]
    fn keyword_scores_are_normalized() {
        let combined = combine_results(vec![], vec![result("a", 25.0), result("b", 4.0)], 10);

        assert_eq!(combined.len(), 2);
        assert_eq!(combined[0].id, "a");
        assert!((combined[0].score - 1.0).abs() < f32::EPSILON);
        assert!((combined[1].score - 0.4).abs() < 1e-6);
    }

    #[test]
    fn dense_result_wins_duplicate_ids() {
        let combined = combine_results(
            vec![result("a", 0.9)],
            vec![result("a", 100.0), result("b", 5.0)],
            10,
        );

        assert_eq!(combined.len(), 2);
        let a = combined.iter().find(|r| r.id == "a").unwrap();
        assert!((a.score - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn results_are_sorted_and_truncated() {
        let combined = combine_results(
            vec![result("a", 0.2), result("b", 0.8)],
            vec![result("c", 9.0)],
            2,
        );

        assert_eq!(combined.len(), 2);
        assert_eq!(combined[0].id, "c");
        assert_eq!(combined[1].id, "b");
    }

    #[tokio::test]
    async fn empty_query_is_rejected() {
        std::env::set_var("DROID_CONTEXT_EMBEDDING_MODE", "stub");
        let dir = tempfile::TempDir::new().unwrap();
        let store = VectorStore::new(dir.path().join("index.json")).unwrap();
        let search = HybridSearch::new(store);

        assert!(matches!(
            search.search("   ", 5).await,
            Err(SearchError::EmptyQuery)
        ));
    }

    #[tokio::test]
    async fn hybrid_search_end_to_end() {
        std::env::set_var("DROID_CONTEXT_EMBEDDING_MODE", "stub");
        let dir = tempfile::TempDir::new().unwrap();
        let mut store = VectorStore::new(dir.path().join("index.json")).unwrap();

        let chunk = |path: &str, content: &str| {
            CodeChunk::new(
                path.to_string(),
                1,
                5,
                content.to_string(),
                ChunkMetadata::new(ChunkKind::Function),
            )
        };
        store
            .store_chunks(vec![
                chunk("Auth.kt", "fun refreshAuthToken() { tokenStore.rotate() }"),
                chunk("List.kt", "fun renderList(items: List<Item>) {}"),
            ])
            .await
            .unwrap();

        // Exact-content query: the stub embedder guarantees cosine 1.0 for
        // the matching chunk, so it must come out on top.
        let search = HybridSearch::new(store);
        let results = search
            .search("fun refreshAuthToken() { tokenStore.rotate() }", 5)
            .await
            .unwrap();

        assert!(!results.is_empty());
        assert_eq!(results[0].chunk.file_path, "Auth.kt");
    }
}
