use thiserror::Error;

/// Result type for RAG operations
pub type Result<T> = std::result::Result<T, RagError>;

/// Errors that can occur while generating a response
#[derive(Error, Debug)]
pub enum RagError {
    /// Retrieval failed
    #[error("Search error: {0}")]
    SearchError(#[from] droid_search::SearchError),

    /// HTTP transport failure
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The endpoint rate-limited the request
    #[error("Rate limited by the model endpoint")]
    RateLimited,

    /// Non-success response from the endpoint
    #[error("Model endpoint returned status {status}: {message}")]
    ApiError { status: u16, message: String },

    /// Response carried no choices
    #[error("Model returned an empty response")]
    EmptyResponse,

    /// Malformed response payload
    #[error("Failed to decode model response: {0}")]
    DecodeError(#[from] serde_json::Error),
}
