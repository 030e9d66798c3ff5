use serde::{Deserialize, Serialize};

/// Type of relationship between two files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencyKind {
    /// Source file imports the target file
    Imports,
}

impl DependencyKind {
    /// Get human-readable name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Imports => "imports",
        }
    }
}

/// Edge payload in the dependency graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub kind: DependencyKind,
}

impl DependencyEdge {
    #[must_use]
    pub const fn new(kind: DependencyKind) -> Self {
        Self { kind }
    }
}
