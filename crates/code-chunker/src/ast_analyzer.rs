use crate::config::ChunkerConfig;
use crate::error::{ChunkerError, Result};
use crate::language::Language;
use crate::types::{ChunkKind, ChunkMetadata, CodeChunk};
use tree_sitter::{Node, Parser};

/// AST-based analyzer extracting declaration chunks and imports
pub struct AstAnalyzer {
    config: ChunkerConfig,
    parser: Parser,
    language: Language,
    /// Imports collected while chunking the current file
    imports: Vec<String>,
}

impl AstAnalyzer {
    /// Create new AST analyzer for a language
    pub fn new(config: ChunkerConfig, language: Language) -> Result<Self> {
        if !language.supports_ast() {
            return Err(ChunkerError::unsupported_language(language.as_str()));
        }

        let ts_language = language.tree_sitter_language()?;
        let mut parser = Parser::new();
        parser
            .set_language(&ts_language)
            .map_err(|e| ChunkerError::tree_sitter(format!("Failed to set language: {e}")))?;

        Ok(Self {
            config,
            parser,
            language,
            imports: Vec::new(),
        })
    }

    /// Parse and chunk code along declaration boundaries
    pub fn chunk(&mut self, content: &str, file_path: &str) -> Result<Vec<CodeChunk>> {
        let tree = self
            .parser
            .parse(content, None)
            .ok_or_else(|| ChunkerError::parse("Failed to parse source code"))?;

        self.imports.clear();

        let mut chunks = Vec::new();
        self.collect(tree.root_node(), content, file_path, &mut chunks);
        Ok(chunks)
    }

    /// Imports gathered by the last `chunk` call, normalized to plain paths
    pub fn take_imports(&mut self) -> Vec<String> {
        std::mem::take(&mut self.imports)
    }

    fn collect(&mut self, node: Node, content: &str, file_path: &str, chunks: &mut Vec<CodeChunk>) {
        let mut cursor = node.walk();
        let children: Vec<_> = node.children(&mut cursor).collect();

        for child in children {
            let kind = child.kind();

            if self.language.import_node_kinds().contains(&kind) {
                if let Some(import) = normalize_import(node_text(child, content)) {
                    self.imports.push(import);
                }
            } else if self.language.class_node_kinds().contains(&kind) {
                self.push_declaration(child, content, file_path, ChunkKind::Class, chunks);
            } else if self.language.function_node_kinds().contains(&kind) {
                self.push_declaration(child, content, file_path, ChunkKind::Function, chunks);
            }

            // Nested declarations (methods in classes, inner classes) become
            // chunks of their own.
            self.collect(child, content, file_path, chunks);
        }
    }

    fn push_declaration(
        &self,
        node: Node,
        content: &str,
        file_path: &str,
        kind: ChunkKind,
        chunks: &mut Vec<CodeChunk>,
    ) {
        let text = node_text(node, content);
        let start_line = node.start_position().row + 1;
        let end_line = node.end_position().row + 1;

        if text.len() > self.config.min_chunk_bytes && text.len() < self.config.max_chunk_bytes {
            let metadata = {
                let mut metadata = ChunkMetadata::new(kind)
                    .language(self.language.as_str())
                    .estimated_tokens(ChunkMetadata::estimate_tokens_from_content(text));
                if let Some(symbol) = self.symbol_name(node, content) {
                    metadata = metadata.symbol_name(symbol);
                }
                metadata
            };
            chunks.push(CodeChunk::new(
                file_path.to_string(),
                start_line,
                end_line,
                text.to_string(),
                metadata,
            ));
        } else {
            chunks.extend(split_by_lines(
                text,
                file_path,
                kind.fragment(),
                Some(self.language.as_str()),
                start_line,
                self.config.max_chunk_bytes,
            ));
        }
    }

    fn symbol_name(&self, node: Node, content: &str) -> Option<String> {
        if let Some(name) = node.child_by_field_name("name") {
            return Some(node_text(name, content).to_string());
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if matches!(
                child.kind(),
                "identifier" | "simple_identifier" | "type_identifier"
            ) {
                return Some(node_text(child, content).to_string());
            }
        }
        None
    }
}

fn node_text<'a>(node: Node, content: &'a str) -> &'a str {
    content.get(node.byte_range()).unwrap_or("")
}

fn normalize_import(text: &str) -> Option<String> {
    let trimmed = text.trim();
    let without_keyword = trimmed.strip_prefix("import").unwrap_or(trimmed);
    let cleaned = without_keyword.trim().trim_end_matches(';').trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Split content into fragments of at most `max_bytes`, accumulating whole
/// lines. Line numbers stay anchored to the original file.
pub(crate) fn split_by_lines(
    content: &str,
    file_path: &str,
    kind: ChunkKind,
    language: Option<&str>,
    first_line: usize,
    max_bytes: usize,
) -> Vec<CodeChunk> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_start = first_line;
    let mut line_no = first_line;

    let mut flush = |current: &mut String, start: usize, end: usize| {
        let text = current.trim();
        if !text.is_empty() {
            let mut metadata = ChunkMetadata::new(kind)
                .estimated_tokens(ChunkMetadata::estimate_tokens_from_content(text));
            if let Some(language) = language {
                metadata = metadata.language(language);
            }
            chunks.push(CodeChunk::new(
                file_path.to_string(),
                start,
                end.max(start),
                text.to_string(),
                metadata,
            ));
        }
        current.clear();
    };

    for line in content.lines() {
        if current.len() + line.len() > max_bytes && !current.is_empty() {
            flush(&mut current, current_start, line_no.saturating_sub(1));
            current_start = line_no;
        }
        current.push_str(line);
        current.push('\n');
        line_no += 1;
    }
    flush(&mut current, current_start, line_no.saturating_sub(1));

    chunks
}
