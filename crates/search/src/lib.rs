//! Hybrid retrieval over an indexed project.
//!
//! Dense (embedding) and BM25 keyword rankings are normalized, merged and
//! deduplicated; the context engine groups the winning chunks per file for
//! prompt assembly.

mod context;
mod error;
mod hybrid;
mod query;

pub use context::{ContextRetrievalEngine, FileContext, RetrievedContext, DEFAULT_MAX_CHUNKS};
pub use error::{Result, SearchError};
pub use hybrid::HybridSearch;
pub use query::{QueryClassifier, QueryKind};
