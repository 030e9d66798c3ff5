use droid_code_chunker::XmlAnalyzer;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Project-level dependency report parsed from Gradle files and the manifest
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectDependencies {
    /// `group:artifact` coordinates from Gradle dependency blocks
    pub libraries: BTreeSet<String>,

    /// Detected Gradle plugins (android_plugin, kotlin_plugin)
    pub plugins: Vec<String>,

    /// Permissions and application attributes from AndroidManifest.xml
    pub manifest_entries: Vec<String>,

    /// DI frameworks referenced by dependency coordinates
    pub di_frameworks: BTreeSet<String>,

    /// Whether Jetpack Compose is in use
    pub uses_compose: bool,
}

/// Parses build.gradle(.kts) files and the main manifest
pub struct ProjectDependencyParser {
    root: PathBuf,
    dependency: Regex,
    xml: XmlAnalyzer,
}

const DI_LIBRARIES: &[(&str, &[&str])] = &[
    ("dagger", &["com.google.dagger:dagger", "com.google.dagger:hilt-android"]),
    ("hilt", &["com.google.dagger:hilt-android"]),
    ("koin", &["io.insert-koin:koin-android", "io.insert-koin:koin-core"]),
];

const COMPOSE_LIBRARIES: &[&str] = &[
    "androidx.compose.compiler",
    "androidx.compose.runtime",
    "androidx.compose.ui",
];

impl ProjectDependencyParser {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            dependency: Regex::new(
                r#"(?:implementation|api|compile|kapt|ksp)\s*\(?\s*["']([^:"']+:[^:"']+)"#,
            )
            .expect("static dependency pattern must compile"),
            xml: XmlAnalyzer::default(),
        }
    }

    /// Parse the project and return its dependency report
    pub fn parse(&self) -> ProjectDependencies {
        let mut deps = ProjectDependencies::default();
        self.parse_gradle_files(&mut deps);
        self.parse_manifest(&mut deps);
        self.check_compose(&mut deps);
        deps
    }

    fn parse_gradle_files(&self, deps: &mut ProjectDependencies) {
        for path in self.find_files(|name| {
            name == "build.gradle" || name == "build.gradle.kts"
        }) {
            let Ok(content) = std::fs::read_to_string(&path) else {
                log::warn!("Failed to read Gradle file {}", path.display());
                continue;
            };

            for caps in self.dependency.captures_iter(&content) {
                if let Some(coordinate) = caps.get(1) {
                    deps.libraries.insert(coordinate.as_str().to_string());
                }
            }

            if content.contains("com.android.application")
                || content.contains("com.android.library")
            {
                push_unique(&mut deps.plugins, "android_plugin");
            }
            if content.contains("org.jetbrains.kotlin.android") {
                push_unique(&mut deps.plugins, "kotlin_plugin");
            }

            for (framework, coordinates) in DI_LIBRARIES {
                if coordinates.iter().any(|c| content.contains(c)) {
                    deps.di_frameworks.insert((*framework).to_string());
                }
            }
        }
    }

    fn parse_manifest(&self, deps: &mut ProjectDependencies) {
        let manifest_path = self
            .root
            .join("app")
            .join("src")
            .join("main")
            .join("AndroidManifest.xml");
        let Ok(content) = std::fs::read_to_string(&manifest_path) else {
            return;
        };

        deps.manifest_entries
            .extend(self.xml.manifest_permissions(&content));
        deps.manifest_entries.extend(
            self.xml
                .application_attributes(&content)
                .into_iter()
                .filter(|attr| attr.contains("theme") || attr.contains("name")),
        );
    }

    fn check_compose(&self, deps: &mut ProjectDependencies) {
        if COMPOSE_LIBRARIES
            .iter()
            .any(|lib| deps.libraries.iter().any(|dep| dep.starts_with(lib)))
        {
            deps.uses_compose = true;
            return;
        }

        // Sample a handful of Kotlin files for @Composable usage
        for path in self
            .find_files(|name| name.ends_with(".kt"))
            .into_iter()
            .take(10)
        {
            if let Ok(content) = std::fs::read_to_string(&path) {
                if content.contains("@Composable") {
                    deps.uses_compose = true;
                    return;
                }
            }
        }
    }

    fn find_files(&self, matches: impl Fn(&str) -> bool) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for entry in ignore::WalkBuilder::new(&self.root).hidden(true).build() {
            let Ok(entry) = entry else { continue };
            let path = entry.path();
            if entry.file_type().is_some_and(|t| t.is_file())
                && path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(&matches)
            {
                files.push(path.to_path_buf());
            }
        }
        files.sort();
        files
    }
}

fn push_unique(plugins: &mut Vec<String>, plugin: &str) {
    if !plugins.iter().any(|p| p == plugin) {
        plugins.push(plugin.to_string());
    }
}
