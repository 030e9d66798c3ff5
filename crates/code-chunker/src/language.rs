use crate::error::{ChunkerError, Result};
use std::path::Path;

/// File languages recognized by the indexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Kotlin,
    Java,
    Python,
    Xml,
    Gradle,
    Properties,
    Unknown,
}

impl Language {
    /// Detect language from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "kt" | "kts" => Language::Kotlin,
            "java" => Language::Java,
            "py" => Language::Python,
            "xml" => Language::Xml,
            "gradle" => Language::Gradle,
            "properties" => Language::Properties,
            _ => Language::Unknown,
        }
    }

    /// Detect language from file path
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        // build.gradle.kts is a Gradle script, not project Kotlin source
        if path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(".gradle.kts"))
        {
            return Language::Gradle;
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Language::Unknown)
    }

    /// Get language name as string
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Kotlin => "kotlin",
            Language::Java => "java",
            Language::Python => "python",
            Language::Xml => "xml",
            Language::Gradle => "gradle",
            Language::Properties => "properties",
            Language::Unknown => "unknown",
        }
    }

    /// Check if this language is supported for AST parsing
    pub fn supports_ast(self) -> bool {
        matches!(self, Language::Kotlin | Language::Java | Language::Python)
    }

    /// Check if this language should go through DI analysis
    pub fn supports_di_analysis(self) -> bool {
        matches!(self, Language::Kotlin | Language::Java)
    }

    /// Get Tree-sitter language instance
    pub fn tree_sitter_language(self) -> Result<tree_sitter::Language> {
        match self {
            Language::Kotlin => Ok(tree_sitter_kotlin_ng::LANGUAGE.into()),
            Language::Java => Ok(tree_sitter_java::LANGUAGE.into()),
            Language::Python => Ok(tree_sitter_python::LANGUAGE.into()),
            _ => Err(ChunkerError::unsupported_language(self.as_str())),
        }
    }

    /// Node kinds that declare classes (or class-like containers)
    pub fn class_node_kinds(self) -> &'static [&'static str] {
        match self {
            Language::Kotlin => &["class_declaration", "object_declaration"],
            Language::Java => &[
                "class_declaration",
                "interface_declaration",
                "enum_declaration",
                "record_declaration",
            ],
            Language::Python => &["class_definition"],
            _ => &[],
        }
    }

    /// Node kinds that declare functions/methods
    pub fn function_node_kinds(self) -> &'static [&'static str] {
        match self {
            Language::Kotlin => &["function_declaration"],
            Language::Java => &["method_declaration", "constructor_declaration"],
            Language::Python => &["function_definition"],
            _ => &[],
        }
    }

    /// Node kinds carrying import statements
    pub fn import_node_kinds(self) -> &'static [&'static str] {
        match self {
            Language::Kotlin => &["import"],
            Language::Java => &["import_declaration"],
            Language::Python => &["import_statement", "import_from_statement"],
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_extension() {
        assert_eq!(Language::from_extension("kt"), Language::Kotlin);
        assert_eq!(Language::from_extension("KT"), Language::Kotlin);
        assert_eq!(Language::from_extension("kts"), Language::Kotlin);
        assert_eq!(Language::from_extension("java"), Language::Java);
        assert_eq!(Language::from_extension("xml"), Language::Xml);
        assert_eq!(Language::from_extension("gradle"), Language::Gradle);
        assert_eq!(Language::from_extension("rs"), Language::Unknown);
    }

    #[test]
    fn from_path() {
        assert_eq!(Language::from_path("app/src/Main.kt"), Language::Kotlin);
        assert_eq!(Language::from_path("Main.java"), Language::Java);
        assert_eq!(
            Language::from_path("res/layout/activity_main.xml"),
            Language::Xml
        );
        assert_eq!(Language::from_path("build.gradle.kts"), Language::Gradle);
        assert_eq!(Language::from_path("gradle.properties"), Language::Properties);
        assert_eq!(Language::from_path("no_extension"), Language::Unknown);
    }

    #[test]
    fn supports_ast() {
        assert!(Language::Kotlin.supports_ast());
        assert!(Language::Java.supports_ast());
        assert!(Language::Python.supports_ast());
        assert!(!Language::Xml.supports_ast());
        assert!(!Language::Gradle.supports_ast());
    }

    #[test]
    fn tree_sitter_language() {
        assert!(Language::Kotlin.tree_sitter_language().is_ok());
        assert!(Language::Java.tree_sitter_language().is_ok());
        assert!(Language::Python.tree_sitter_language().is_ok());
        assert!(Language::Xml.tree_sitter_language().is_err());
    }

    #[test]
    fn di_analysis_scope() {
        assert!(Language::Kotlin.supports_di_analysis());
        assert!(Language::Java.supports_di_analysis());
        assert!(!Language::Python.supports_di_analysis());
        assert!(!Language::Xml.supports_di_analysis());
    }
}
