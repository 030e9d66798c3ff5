use serde::{Deserialize, Serialize};

/// A chunk of project content with metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodeChunk {
    /// Source file path
    pub file_path: String,

    /// Start line (1-indexed)
    pub start_line: usize,

    /// End line (1-indexed, inclusive)
    pub end_line: usize,

    /// The actual content
    pub content: String,

    /// Metadata about this chunk
    pub metadata: ChunkMetadata,
}

impl CodeChunk {
    /// Create a new chunk
    #[must_use]
    pub const fn new(
        file_path: String,
        start_line: usize,
        end_line: usize,
        content: String,
        metadata: ChunkMetadata,
    ) -> Self {
        Self {
            file_path,
            start_line,
            end_line,
            content,
            metadata,
        }
    }

    /// Get the number of lines in this chunk
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.end_line.saturating_sub(self.start_line) + 1
    }

    /// Get estimated token count
    #[must_use]
    pub const fn estimated_tokens(&self) -> usize {
        self.metadata.estimated_tokens
    }

    /// Check if chunk contains a specific line
    #[must_use]
    pub const fn contains_line(&self, line: usize) -> bool {
        line >= self.start_line && line <= self.end_line
    }
}

/// Metadata about a chunk
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunkMetadata {
    /// Kind of content the chunk carries
    pub kind: ChunkKind,

    /// Source language, when known
    pub language: Option<String>,

    /// Symbol name (class name, function name, DI component, ...)
    pub symbol_name: Option<String>,

    /// DI framework the chunk belongs to (Dagger/Hilt/Koin chunks only)
    pub framework: Option<String>,

    /// Estimated token count (rough approximation)
    pub estimated_tokens: usize,
}

impl ChunkMetadata {
    /// Create metadata for a chunk kind
    #[must_use]
    pub const fn new(kind: ChunkKind) -> Self {
        Self {
            kind,
            language: None,
            symbol_name: None,
            framework: None,
            estimated_tokens: 0,
        }
    }

    /// Builder: set language
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Builder: set symbol name
    #[must_use]
    pub fn symbol_name(mut self, name: impl Into<String>) -> Self {
        self.symbol_name = Some(name.into());
        self
    }

    /// Builder: set DI framework
    #[must_use]
    pub fn framework(mut self, framework: impl Into<String>) -> Self {
        self.framework = Some(framework.into());
        self
    }

    /// Builder: set estimated tokens
    #[must_use]
    pub const fn estimated_tokens(mut self, tokens: usize) -> Self {
        self.estimated_tokens = tokens;
        self
    }

    /// Estimate tokens from content (~4 chars per token for code)
    #[must_use]
    pub fn estimate_tokens_from_content(content: &str) -> usize {
        (content.len() / 4).max(1)
    }
}

/// Kind of chunk, based on where it was extracted from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub enum ChunkKind {
    /// Whole class/interface/object declaration
    Class,
    /// Whole function/method declaration
    Function,
    /// Part of an oversized class declaration
    ClassFragment,
    /// Part of an oversized function declaration
    FunctionFragment,
    /// DI component declaration
    DiComponent,
    /// DI module declaration
    DiModule,
    /// DI provider declaration
    DiProvider,
    /// Permissions declared in AndroidManifest.xml
    ManifestPermissions,
    /// Application attributes from AndroidManifest.xml
    ManifestApplication,
    /// Top-level element of a layout/resource XML
    LayoutElement,
    /// Part of an oversized XML element
    LayoutFragment,
    /// Plain text chunk (fallback)
    Text,
}

impl ChunkKind {
    /// Fragment kind used when a chunk of this kind must be split
    #[must_use]
    pub const fn fragment(self) -> Self {
        match self {
            Self::Class | Self::ClassFragment => Self::ClassFragment,
            Self::Function | Self::FunctionFragment => Self::FunctionFragment,
            Self::LayoutElement | Self::LayoutFragment => Self::LayoutFragment,
            other => other,
        }
    }

    /// Get human-readable name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Function => "function",
            Self::ClassFragment => "class_fragment",
            Self::FunctionFragment => "function_fragment",
            Self::DiComponent => "di_component",
            Self::DiModule => "di_module",
            Self::DiProvider => "di_provider",
            Self::ManifestPermissions => "manifest_permissions",
            Self::ManifestApplication => "manifest_application",
            Self::LayoutElement => "layout_element",
            Self::LayoutFragment => "layout_fragment",
            Self::Text => "text",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_line_count() {
        let chunk = CodeChunk::new(
            "Main.kt".to_string(),
            10,
            15,
            "code".to_string(),
            ChunkMetadata::new(ChunkKind::Function),
        );
        assert_eq!(chunk.line_count(), 6);
    }

    #[test]
    fn chunk_contains_line() {
        let chunk = CodeChunk::new(
            "Main.kt".to_string(),
            10,
            15,
            "code".to_string(),
            ChunkMetadata::new(ChunkKind::Function),
        );
        assert!(chunk.contains_line(10));
        assert!(chunk.contains_line(15));
        assert!(!chunk.contains_line(9));
        assert!(!chunk.contains_line(16));
    }

    #[test]
    fn fragment_kind_mapping() {
        assert_eq!(ChunkKind::Class.fragment(), ChunkKind::ClassFragment);
        assert_eq!(ChunkKind::Function.fragment(), ChunkKind::FunctionFragment);
        assert_eq!(ChunkKind::LayoutElement.fragment(), ChunkKind::LayoutFragment);
        assert_eq!(ChunkKind::Text.fragment(), ChunkKind::Text);
    }

    #[test]
    fn metadata_builder() {
        let metadata = ChunkMetadata::new(ChunkKind::DiModule)
            .language("kotlin")
            .symbol_name("AppModule")
            .framework("hilt")
            .estimated_tokens(42);

        assert_eq!(metadata.kind, ChunkKind::DiModule);
        assert_eq!(metadata.language.as_deref(), Some("kotlin"));
        assert_eq!(metadata.symbol_name.as_deref(), Some("AppModule"));
        assert_eq!(metadata.framework.as_deref(), Some("hilt"));
        assert_eq!(metadata.estimated_tokens, 42);
    }

    #[test]
    fn estimate_tokens() {
        let tokens = ChunkMetadata::estimate_tokens_from_content("fun main() {}");
        assert!(tokens > 0);
        assert!(tokens < 100);
    }
}
