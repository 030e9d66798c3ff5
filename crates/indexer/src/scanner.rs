use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

const MAX_FILE_SIZE_BYTES: u64 = 1024 * 1024;

/// Extensions the indexer cares about in an Android project
const SUPPORTED_EXTENSIONS: &[&str] = &["java", "kt", "kts", "xml", "gradle", "properties"];

/// Directories that never contain indexable project sources
const IGNORED_SCOPES: &[&str] = &[
    ".git",
    ".gradle",
    ".idea",
    ".droid-context",
    "build",
    "node_modules",
];

/// Scanner for finding indexable files in a project
pub struct FileScanner {
    root: PathBuf,
}

impl FileScanner {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Scan directory for indexable files (.gitignore aware)
    pub fn scan(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        let root = self.root.clone();
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .hidden(true)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true);
        builder.filter_entry(move |entry| !Self::is_ignored_scope(entry.path(), &root));

        for result in builder.build() {
            match result {
                Ok(entry) => {
                    let Some(file_type) = entry.file_type() else {
                        continue;
                    };
                    if !file_type.is_file() {
                        continue;
                    }

                    let path = entry.path();
                    if let Ok(meta) = entry.metadata() {
                        if meta.len() > MAX_FILE_SIZE_BYTES {
                            log::debug!(
                                "Skipping large file {} ({} bytes > {MAX_FILE_SIZE_BYTES})",
                                path.display(),
                                meta.len()
                            );
                            continue;
                        }
                    }

                    if !Self::is_indexable_file(path) {
                        continue;
                    }

                    files.push(path.to_path_buf());
                }
                Err(e) => log::warn!("Failed to read entry: {e}"),
            }
        }

        files.sort();
        log::info!("Found {} indexable files", files.len());
        files
    }

    fn is_indexable_file(path: &Path) -> bool {
        if let Some(ext) = path.extension().and_then(|ext| ext.to_str()) {
            let ext = ext.to_lowercase();
            return SUPPORTED_EXTENSIONS.iter().any(|candidate| candidate == &ext);
        }
        false
    }

    fn is_ignored_scope(path: &Path, root: &Path) -> bool {
        if let Ok(relative) = path.strip_prefix(root) {
            for component in relative.components() {
                if let std::path::Component::Normal(name) = component {
                    let lowered = name.to_string_lossy().to_lowercase();
                    if IGNORED_SCOPES.iter().any(|ignored| ignored == &lowered) {
                        return true;
                    }
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn finds_android_sources_only() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "app/src/main/java/com/example/Main.kt", "class Main");
        write(root, "app/src/main/res/layout/main.xml", "<LinearLayout />");
        write(root, "app/build.gradle", "dependencies {}");
        write(root, "gradle.properties", "org.gradle.jvmargs=-Xmx2g");
        write(root, "README.md", "# readme");
        write(root, "app/icon.png", "binary");

        let files = FileScanner::new(root).scan();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(files.len(), 4);
        assert!(names.contains(&"Main.kt".to_string()));
        assert!(names.contains(&"main.xml".to_string()));
        assert!(names.contains(&"build.gradle".to_string()));
        assert!(names.contains(&"gradle.properties".to_string()));
    }

    #[test]
    fn skips_build_directories() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "app/src/main/java/Main.kt", "class Main");
        write(root, "app/build/generated/Gen.kt", "class Gen");
        write(root, ".gradle/cache/Cached.kt", "class Cached");
        write(root, ".droid-context/chunks/abc.json", "{}");

        let files = FileScanner::new(root).scan();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("app/src/main/java/Main.kt"));
    }

    #[test]
    fn results_are_sorted() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "b/B.kt", "class B");
        write(root, "a/A.kt", "class A");

        let files = FileScanner::new(root).scan();
        assert!(files[0].ends_with("a/A.kt"));
        assert!(files[1].ends_with("b/B.kt"));
    }
}
