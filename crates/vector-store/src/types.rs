use droid_code_chunker::CodeChunk;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A chunk stored alongside its embedding vector
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredChunk {
    /// Stable chunk identifier
    pub id: String,

    /// The chunk itself
    pub chunk: CodeChunk,

    /// L2-normalized embedding vector
    pub vector: Vec<f32>,
}

/// A retrieval hit with its score
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Chunk identifier
    pub id: String,

    /// The matching chunk
    pub chunk: CodeChunk,

    /// Similarity/relevance score (higher is better)
    pub score: f32,
}

/// Stable identity for a chunk: digest over path, kind and line range.
#[must_use]
pub fn chunk_id(chunk: &CodeChunk) -> String {
    let mut hasher = Sha256::new();
    hasher.update(chunk.file_path.as_bytes());
    hasher.update(b":");
    hasher.update(chunk.metadata.kind.as_str().as_bytes());
    hasher.update(b":");
    hasher.update(chunk.start_line.to_string().as_bytes());
    hasher.update(b":");
    hasher.update(chunk.end_line.to_string().as_bytes());
    format!("{:x}", hasher.finalize())
}
