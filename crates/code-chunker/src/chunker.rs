use crate::ast_analyzer::{split_by_lines, AstAnalyzer};
use crate::config::ChunkerConfig;
use crate::di::{di_chunks, DiAnalyzer};
use crate::error::{ChunkerError, Result};
use crate::language::Language;
use crate::types::{ChunkKind, CodeChunk};
use crate::xml::XmlAnalyzer;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Chunks plus side information extracted from a single file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileAnalysis {
    /// Chunks ready for embedding and storage
    pub chunks: Vec<CodeChunk>,

    /// Import paths found in the file (code files only)
    pub imports: Vec<String>,
}

/// Main chunker interface dispatching per file type
pub struct Chunker {
    config: ChunkerConfig,
    di: DiAnalyzer,
    xml: XmlAnalyzer,
}

impl Chunker {
    /// Create a new chunker with configuration
    #[must_use]
    pub fn new(config: ChunkerConfig) -> Self {
        config
            .validate()
            .expect("Invalid chunker configuration provided");
        let xml = XmlAnalyzer::new(config.max_chunk_bytes);
        Self {
            config,
            di: DiAnalyzer::new(),
            xml,
        }
    }

    /// Chunk a file read from disk
    pub fn chunk_file(&self, path: impl AsRef<Path>) -> Result<FileAnalysis> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let file_path = path.to_str().unwrap_or("unknown");
        self.chunk_str(&content, file_path)
    }

    /// Chunk code from a string
    pub fn chunk_str(&self, content: &str, file_path: &str) -> Result<FileAnalysis> {
        if content.is_empty() {
            return Err(ChunkerError::EmptyContent);
        }

        let language = Language::from_path(file_path);

        if language == Language::Xml {
            return Ok(FileAnalysis {
                chunks: self.xml.analyze(file_path, content),
                imports: Vec::new(),
            });
        }

        if language.supports_ast() {
            return self.chunk_code(content, file_path, language);
        }

        Ok(FileAnalysis {
            chunks: self.line_chunks(content, file_path, language),
            imports: Vec::new(),
        })
    }

    fn chunk_code(
        &self,
        content: &str,
        file_path: &str,
        language: Language,
    ) -> Result<FileAnalysis> {
        let mut analyzer = AstAnalyzer::new(self.config.clone(), language)?;

        let mut chunks = match analyzer.chunk(content, file_path) {
            Ok(chunks) => chunks,
            Err(e) => {
                log::warn!("AST chunking failed for {file_path}, falling back to lines: {e}");
                return Ok(FileAnalysis {
                    chunks: self.line_chunks(content, file_path, language),
                    imports: Vec::new(),
                });
            }
        };
        let imports = analyzer.take_imports();

        // Files made only of top-level statements still deserve chunks
        if chunks.is_empty() {
            chunks = self.line_chunks(content, file_path, language);
        }

        if language.supports_di_analysis() {
            if let Some(analysis) = self.di.analyze(content) {
                log::debug!(
                    "Detected {} usage in {file_path}",
                    analysis.framework.as_str()
                );
                chunks.extend(di_chunks(&analysis, file_path));
            }
        }

        Ok(FileAnalysis { chunks, imports })
    }

    fn line_chunks(&self, content: &str, file_path: &str, language: Language) -> Vec<CodeChunk> {
        let language = match language {
            Language::Unknown => None,
            other => Some(other.as_str()),
        };
        split_by_lines(
            content,
            file_path,
            ChunkKind::Text,
            language,
            1,
            self.config.max_chunk_bytes,
        )
    }

    /// Get configuration
    #[must_use]
    pub const fn config(&self) -> &ChunkerConfig {
        &self.config
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new(ChunkerConfig::default())
    }
}

/// Resolve an import path to a candidate project file.
///
/// Walks up from the importing file to the nearest `java`/`kotlin` source
/// root and maps the dotted import path below it. Best effort: returns None
/// when the file does not live under a conventional source root.
pub fn resolve_import_to_path(import_path: &str, source_file: &str) -> Option<PathBuf> {
    let mut root = Path::new(source_file).parent()?;
    loop {
        let name = root.file_name()?.to_str()?;
        if name == "java" || name == "kotlin" {
            break;
        }
        root = root.parent()?;
    }

    let relative: PathBuf = import_path.split('.').collect();
    Some(root.join(relative).with_extension("kt"))
}
