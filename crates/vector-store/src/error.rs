use thiserror::Error;

/// Result type for vector store operations
pub type Result<T> = std::result::Result<T, VectorStoreError>;

/// Errors that can occur in the vector store
#[derive(Error, Debug)]
pub enum VectorStoreError {
    /// Embedding backend failure
    #[error("Embedding error: {0}")]
    EmbeddingError(String),

    /// Vector has an unexpected dimension
    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
