//! File-level dependency graph with content-hash change detection.
//!
//! Files are nodes, import relationships are edges. The graph doubles as the
//! change detector for incremental indexing: it remembers a content digest
//! per file and reports files whose digest no longer matches disk.

mod error;
mod graph;
mod types;

pub use error::{GraphError, Result};
pub use graph::DependencyGraph;
pub use types::{DependencyEdge, DependencyKind};
