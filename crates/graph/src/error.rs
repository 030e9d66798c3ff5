use thiserror::Error;

/// Result type for graph operations
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors that can occur in graph operations
#[derive(Error, Debug)]
pub enum GraphError {
    /// File is not present in the graph
    #[error("File not found in graph: {0}")]
    FileNotFound(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
