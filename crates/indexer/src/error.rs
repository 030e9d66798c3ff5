use thiserror::Error;

/// Result type for indexer operations
pub type Result<T> = std::result::Result<T, IndexerError>;

/// Errors that can occur during indexing
#[derive(Error, Debug)]
pub enum IndexerError {
    /// Project path is missing or not a directory
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Chunker error
    #[error("Chunker error: {0}")]
    ChunkerError(#[from] droid_code_chunker::ChunkerError),

    /// Vector store error
    #[error("Vector store error: {0}")]
    StoreError(#[from] droid_vector_store::VectorStoreError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
