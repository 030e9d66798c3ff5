use crate::types::{DependencyEdge, DependencyKind};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::Path;

/// Tracks file relationships and per-file content digests
pub struct DependencyGraph {
    graph: DiGraph<String, DependencyEdge>,
    node_index: HashMap<String, NodeIndex>,
    file_hashes: HashMap<String, String>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_index: HashMap::new(),
            file_hashes: HashMap::new(),
        }
    }

    /// Add a file node (idempotent)
    pub fn add_file(&mut self, path: &str) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(path) {
            return idx;
        }
        let idx = self.graph.add_node(path.to_string());
        self.node_index.insert(path.to_string(), idx);
        idx
    }

    /// Add a dependency relationship between two files.
    /// Duplicate edges of the same kind are suppressed.
    pub fn add_dependency(&mut self, source: &str, target: &str, kind: DependencyKind) {
        let from = self.add_file(source);
        let to = self.add_file(target);

        let exists = self
            .graph
            .edges_connecting(from, to)
            .any(|edge| edge.weight().kind == kind);
        if !exists {
            self.graph.add_edge(from, to, DependencyEdge::new(kind));
        }
    }

    /// Check whether a file is known to the graph
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.node_index.contains_key(path)
    }

    /// Files related to `path` within `depth` hops, in either direction
    #[must_use]
    pub fn related_files(&self, path: &str, depth: usize) -> Vec<String> {
        let Some(&start) = self.node_index.get(path) else {
            return Vec::new();
        };

        let mut related = HashSet::new();
        related.extend(self.reachable_within(start, depth, Direction::Outgoing));
        related.extend(self.reachable_within(start, depth, Direction::Incoming));
        related.remove(&start);

        let mut files: Vec<String> = related
            .into_iter()
            .filter_map(|idx| self.graph.node_weight(idx).cloned())
            .collect();
        files.sort();
        files
    }

    fn reachable_within(
        &self,
        start: NodeIndex,
        depth: usize,
        direction: Direction,
    ) -> HashSet<NodeIndex> {
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([(start, 0usize)]);

        while let Some((current, dist)) = queue.pop_front() {
            if dist >= depth {
                continue;
            }
            for neighbor in self.graph.neighbors_directed(current, direction) {
                if seen.insert(neighbor) {
                    queue.push_back((neighbor, dist + 1));
                }
            }
        }

        seen
    }

    /// Check if a file changed since its digest was last recorded.
    /// Unknown files count as changed.
    #[must_use]
    pub fn has_changed(&self, path: &str) -> bool {
        match self.file_hashes.get(path) {
            Some(recorded) => *recorded != hash_file(path),
            None => true,
        }
    }

    /// Record the current digest for a file
    pub fn update_hash(&mut self, path: &str) {
        self.file_hashes.insert(path.to_string(), hash_file(path));
    }

    /// Forget a file's digest (deleted files)
    pub fn remove_hash(&mut self, path: &str) {
        self.file_hashes.remove(path);
    }

    /// Recorded digests, for persistence
    #[must_use]
    pub fn hashes(&self) -> &HashMap<String, String> {
        &self.file_hashes
    }

    /// Restore digests from persisted state
    pub fn set_hashes(&mut self, hashes: HashMap<String, String>) {
        self.file_hashes = hashes;
    }

    /// Number of files in the graph
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of dependency edges in the graph
    #[must_use]
    pub fn dependency_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Digest of a file's bytes; unreadable files digest to the empty string
#[must_use]
pub(crate) fn hash_file(path: impl AsRef<Path>) -> String {
    match std::fs::read(path.as_ref()) {
        Ok(bytes) => hash_bytes(&bytes),
        Err(e) => {
            log::debug!("Failed to read {} for hashing: {e}", path.as_ref().display());
            String::new()
        }
    }
}

/// Digest of a byte slice as lowercase hex
#[must_use]
pub(crate) fn hash_bytes(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    format!("{digest:x}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn add_file_is_idempotent() {
        let mut graph = DependencyGraph::new();
        let a = graph.add_file("A.kt");
        let b = graph.add_file("A.kt");
        assert_eq!(a, b);
        assert_eq!(graph.file_count(), 1);
    }

    #[test]
    fn duplicate_edges_are_suppressed() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("A.kt", "B.kt", DependencyKind::Imports);
        graph.add_dependency("A.kt", "B.kt", DependencyKind::Imports);

        assert_eq!(graph.file_count(), 2);
        assert_eq!(graph.dependency_count(), 1);
    }

    #[test]
    fn related_files_respects_depth() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("A.kt", "B.kt", DependencyKind::Imports);
        graph.add_dependency("B.kt", "C.kt", DependencyKind::Imports);
        graph.add_dependency("C.kt", "D.kt", DependencyKind::Imports);

        let depth_one = graph.related_files("B.kt", 1);
        assert_eq!(depth_one, vec!["A.kt".to_string(), "C.kt".to_string()]);

        let depth_two = graph.related_files("B.kt", 2);
        assert_eq!(
            depth_two,
            vec!["A.kt".to_string(), "C.kt".to_string(), "D.kt".to_string()]
        );
    }

    #[test]
    fn related_files_for_unknown_file_is_empty() {
        let graph = DependencyGraph::new();
        assert!(graph.related_files("Missing.kt", 2).is_empty());
    }

    #[test]
    fn change_detection_follows_content() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "fun a() = 1").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let mut graph = DependencyGraph::new();
        assert!(graph.has_changed(&path), "unknown file counts as changed");

        graph.update_hash(&path);
        assert!(!graph.has_changed(&path));

        writeln!(file, "fun b() = 2").unwrap();
        file.flush().unwrap();
        assert!(graph.has_changed(&path));
    }

    #[test]
    fn hashes_round_trip() {
        let mut graph = DependencyGraph::new();
        let mut hashes = HashMap::new();
        hashes.insert("A.kt".to_string(), "abc".to_string());
        graph.set_hashes(hashes.clone());
        assert_eq!(graph.hashes(), &hashes);
    }
}
