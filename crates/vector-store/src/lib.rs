//! Persistent chunk store with dense and keyword retrieval.
//!
//! Chunks are embedded (ONNX MiniLM, or a deterministic stub backend for
//! offline use) and kept in a JSON-persisted map next to a BM25 keyword
//! index rebuilt from the stored corpus.

mod bm25;
mod embeddings;
mod error;
mod store;
mod types;

pub use bm25::Bm25Index;
pub use embeddings::{model_dir, EmbeddingModel};
pub use error::{Result, VectorStoreError};
pub use store::VectorStore;
pub use types::{chunk_id, SearchResult, StoredChunk};
