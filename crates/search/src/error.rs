use thiserror::Error;

/// Result type for search operations
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur during search
#[derive(Error, Debug)]
pub enum SearchError {
    /// Query is empty or whitespace
    #[error("Empty query")]
    EmptyQuery,

    /// Vector store error
    #[error("Vector store error: {0}")]
    StoreError(#[from] droid_vector_store::VectorStoreError),
}
