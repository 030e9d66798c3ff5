use serde::{Deserialize, Serialize};

/// Coarse category of what the query is after
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryKind {
    /// Dependency injection wiring
    Di,
    /// Layouts, views, Compose UI
    Ui,
    /// Functions, classes, algorithms
    Logic,
    /// Persistence and networking
    Data,
    /// Anything else
    General,
}

impl QueryKind {
    /// Get human-readable name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Di => "di",
            Self::Ui => "ui",
            Self::Logic => "logic",
            Self::Data => "data",
            Self::General => "general",
        }
    }
}

/// Keyword-table query classifier
pub struct QueryClassifier;

const QUERY_KEYWORDS: &[(QueryKind, &[&str])] = &[
    (
        QueryKind::Di,
        &["dagger", "hilt", "koin", "inject", "component", "module", "provide"],
    ),
    (
        QueryKind::Ui,
        &["layout", "view", "compose", "xml", "button", "text", "image"],
    ),
    (
        QueryKind::Logic,
        &["function", "method", "class", "logic", "algorithm", "calculate"],
    ),
    (
        QueryKind::Data,
        &["database", "room", "api", "network", "retrofit", "data source"],
    ),
];

impl QueryClassifier {
    /// Determine what kind of context the query needs.
    /// First keyword table hit wins; unmatched queries are General.
    #[must_use]
    pub fn classify(query: &str) -> QueryKind {
        let query = query.to_lowercase();
        for (kind, keywords) in QUERY_KEYWORDS {
            if keywords.iter().any(|keyword| query.contains(keyword)) {
                return *kind;
            }
        }
        QueryKind::General
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_di_queries() {
        assert_eq!(
            QueryClassifier::classify("How does Hilt inject the repository?"),
            QueryKind::Di
        );
        assert_eq!(
            QueryClassifier::classify("where is the dagger component"),
            QueryKind::Di
        );
    }

    #[test]
    fn classifies_ui_queries() {
        assert_eq!(
            QueryClassifier::classify("which layout renders the login button"),
            QueryKind::Ui
        );
    }

    #[test]
    fn classifies_data_queries() {
        assert_eq!(
            QueryClassifier::classify("what talks to the Room database"),
            QueryKind::Data
        );
    }

    #[test]
    fn classifies_logic_queries() {
        assert_eq!(
            QueryClassifier::classify("explain the sorting algorithm"),
            QueryKind::Logic
        );
    }

    #[test]
    fn first_table_hit_wins() {
        // "module" (di) appears before "class" (logic) in the table
        assert_eq!(
            QueryClassifier::classify("which class provides the network module"),
            QueryKind::Di
        );
    }

    #[test]
    fn unmatched_queries_are_general() {
        assert_eq!(
            QueryClassifier::classify("what does this project do"),
            QueryKind::General
        );
    }
}
