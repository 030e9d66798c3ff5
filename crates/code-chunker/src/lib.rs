//! Chunking of Android project sources into retrieval-sized units.
//!
//! Kotlin, Java and Python files are chunked along AST boundaries via
//! tree-sitter; Android XML (manifest, layouts) goes through a dedicated
//! analyzer; everything else falls back to line-based chunking. Kotlin and
//! Java files are additionally scanned for DI framework usage
//! (Dagger/Hilt/Koin) and contribute DI chunks.

mod ast_analyzer;
mod chunker;
mod config;
mod di;
mod error;
mod language;
mod types;
mod xml;

pub use chunker::{resolve_import_to_path, Chunker, FileAnalysis};
pub use config::ChunkerConfig;
pub use di::{DiAnalysis, DiAnalyzer, DiFramework, DiSymbol};
pub use error::{ChunkerError, Result};
pub use language::Language;
pub use types::{ChunkKind, ChunkMetadata, CodeChunk};
pub use xml::XmlAnalyzer;
