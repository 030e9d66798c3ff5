use crate::ast_analyzer::split_by_lines;
use crate::types::{ChunkKind, ChunkMetadata, CodeChunk};
use regex::Regex;
use std::path::Path;

/// Analyzer for Android XML files (manifest, layouts, resources).
///
/// Extraction is regex/tag-scanner based; malformed documents degrade to
/// line-based chunks instead of failing the file.
pub struct XmlAnalyzer {
    max_chunk_bytes: usize,
    permission: Regex,
    application: Regex,
    attribute: Regex,
    tag: Regex,
}

#[derive(Debug, Clone)]
struct ElementSpan {
    name: String,
    start: usize,
    open_end: usize,
    close_start: usize,
    end: usize,
}

impl XmlAnalyzer {
    pub fn new(max_chunk_bytes: usize) -> Self {
        Self {
            max_chunk_bytes,
            permission: compile(r#"<uses-permission[^>]*?android:name\s*=\s*"([^"]+)""#),
            application: compile(r#"<application((?:"[^"]*"|'[^']*'|[^<>"'/])*)>"#),
            attribute: compile(r#"([A-Za-z_][\w:.-]*)\s*=\s*"([^"]*)""#),
            // A bare '/' outside quoted attribute values only occurs in
            // self-closing tags, so it must not be eaten by the attr class
            tag: compile(r#"<(/?)([A-Za-z][\w.:-]*)((?:"[^"]*"|'[^']*'|[^<>"'/])*)(/?)>"#),
        }
    }

    /// Analyze an XML file and extract chunks
    pub fn analyze(&self, file_path: &str, content: &str) -> Vec<CodeChunk> {
        let is_manifest = Path::new(file_path)
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name == "AndroidManifest.xml");

        if is_manifest {
            self.analyze_manifest(file_path, content)
        } else {
            self.analyze_layout(file_path, content)
        }
    }

    /// Permissions declared via `<uses-permission android:name=...>`
    pub fn manifest_permissions(&self, content: &str) -> Vec<String> {
        self.permission
            .captures_iter(content)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }

    /// `<application>` attributes as `name: value` lines
    pub fn application_attributes(&self, content: &str) -> Vec<String> {
        let Some(caps) = self.application.captures(content) else {
            return Vec::new();
        };
        let attrs = caps.get(1).map_or("", |m| m.as_str());
        self.attribute
            .captures_iter(attrs)
            .filter_map(|caps| {
                let name = caps.get(1)?.as_str();
                let value = caps.get(2)?.as_str();
                Some(format!("{name}: {value}"))
            })
            .collect()
    }

    fn analyze_manifest(&self, file_path: &str, content: &str) -> Vec<CodeChunk> {
        let mut chunks = Vec::new();

        let permission_lines: Vec<(String, usize)> = self
            .permission
            .captures_iter(content)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let name = caps.get(1)?.as_str().to_string();
                Some((name, line_of_offset(content, whole.start())))
            })
            .collect();

        if !permission_lines.is_empty() {
            let text = permission_lines
                .iter()
                .map(|(name, _)| name.as_str())
                .collect::<Vec<_>>()
                .join("\n");
            let start = permission_lines.first().map_or(1, |(_, line)| *line);
            let end = permission_lines.last().map_or(start, |(_, line)| *line);
            chunks.push(make_chunk(
                file_path,
                start,
                end,
                text,
                ChunkKind::ManifestPermissions,
            ));
        }

        if let Some(application) = self.application.find(content) {
            let attributes = self.application_attributes(content);
            if !attributes.is_empty() {
                let start = line_of_offset(content, application.start());
                let end = line_of_offset(content, application.end());
                chunks.push(make_chunk(
                    file_path,
                    start,
                    end,
                    attributes.join("\n"),
                    ChunkKind::ManifestApplication,
                ));
            }
        }

        chunks
    }

    fn analyze_layout(&self, file_path: &str, content: &str) -> Vec<CodeChunk> {
        let roots = self.top_level_elements(content);

        let Some(root) = roots.first() else {
            // Nothing tag-shaped in the file; keep the content reachable
            return split_by_lines(
                content,
                file_path,
                ChunkKind::Text,
                Some("xml"),
                1,
                self.max_chunk_bytes,
            );
        };

        // Self-closing roots have no body
        let body = if root.close_start > root.open_end {
            &content[root.open_end..root.close_start]
        } else {
            ""
        };
        let mut children = self.top_level_elements(body);
        let base = root.open_end;

        // Leaf root (e.g. a self-closing <merge/>): chunk the root itself
        if children.is_empty() {
            children = vec![root.clone()];
        } else {
            for child in &mut children {
                child.start += base;
                child.open_end += base;
                child.close_start += base;
                child.end += base;
            }
        }

        let mut chunks = Vec::new();
        for element in children {
            let slice = &content[element.start..element.end];
            let start_line = line_of_offset(content, element.start);

            if slice.len() > self.max_chunk_bytes {
                chunks.extend(split_by_lines(
                    slice,
                    file_path,
                    ChunkKind::LayoutFragment,
                    Some("xml"),
                    start_line,
                    self.max_chunk_bytes,
                ));
            } else {
                let end_line = line_of_offset(content, element.end.saturating_sub(1));
                let mut chunk = make_chunk(
                    file_path,
                    start_line,
                    end_line,
                    slice.to_string(),
                    ChunkKind::LayoutElement,
                );
                chunk.metadata.symbol_name = Some(element.name.clone());
                chunks.push(chunk);
            }
        }

        chunks
    }

    /// Scan tags and return spans of depth-zero elements, in document order
    fn top_level_elements(&self, content: &str) -> Vec<ElementSpan> {
        let mut spans = Vec::new();
        let mut depth = 0usize;
        let mut open: Option<(String, usize, usize)> = None;

        for caps in self.tag.captures_iter(content) {
            let whole = match caps.get(0) {
                Some(m) => m,
                None => continue,
            };
            let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
            let name = caps.get(2).map_or("", |m| m.as_str());
            let self_closing = caps.get(4).is_some_and(|m| !m.as_str().is_empty());

            if closing {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    if let Some((name, start, open_end)) = open.take() {
                        spans.push(ElementSpan {
                            name,
                            start,
                            open_end,
                            close_start: whole.start(),
                            end: whole.end(),
                        });
                    }
                }
            } else if self_closing {
                if depth == 0 {
                    spans.push(ElementSpan {
                        name: name.to_string(),
                        start: whole.start(),
                        open_end: whole.end(),
                        close_start: whole.start(),
                        end: whole.end(),
                    });
                }
            } else {
                if depth == 0 {
                    open = Some((name.to_string(), whole.start(), whole.end()));
                }
                depth += 1;
            }
        }

        spans
    }
}

impl Default for XmlAnalyzer {
    fn default() -> Self {
        Self::new(2000)
    }
}

fn make_chunk(
    file_path: &str,
    start_line: usize,
    end_line: usize,
    content: String,
    kind: ChunkKind,
) -> CodeChunk {
    let metadata = ChunkMetadata::new(kind)
        .language("xml")
        .estimated_tokens(ChunkMetadata::estimate_tokens_from_content(&content));
    CodeChunk::new(
        file_path.to_string(),
        start_line,
        end_line.max(start_line),
        content,
        metadata,
    )
}

fn line_of_offset(content: &str, offset: usize) -> usize {
    content[..offset.min(content.len())].matches('\n').count() + 1
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static XML pattern must compile")
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<manifest xmlns:android="http://schemas.android.com/apk/res/android"
    package="com.example.app">

    <uses-permission android:name="android.permission.INTERNET" />
    <uses-permission android:name="android.permission.CAMERA" />

    <application
        android:name=".App"
        android:theme="@style/Theme.App">
        <activity android:name=".MainActivity" />
    </application>
</manifest>
"#;

    const LAYOUT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<LinearLayout xmlns:android="http://schemas.android.com/apk/res/android"
    android:orientation="vertical">

    <TextView
        android:id="@+id/title"
        android:text="Hello" />

    <Button
        android:id="@+id/submit"
        android:text="Submit">
    </Button>
</LinearLayout>
"#;

    #[test]
    fn manifest_permissions_extracted() {
        let analyzer = XmlAnalyzer::default();
        let chunks = analyzer.analyze("app/src/main/AndroidManifest.xml", MANIFEST);

        let permissions = chunks
            .iter()
            .find(|c| c.metadata.kind == ChunkKind::ManifestPermissions)
            .unwrap();
        assert!(permissions.content.contains("android.permission.INTERNET"));
        assert!(permissions.content.contains("android.permission.CAMERA"));
    }

    #[test]
    fn manifest_application_attributes_extracted() {
        let analyzer = XmlAnalyzer::default();
        let chunks = analyzer.analyze("AndroidManifest.xml", MANIFEST);

        let application = chunks
            .iter()
            .find(|c| c.metadata.kind == ChunkKind::ManifestApplication)
            .unwrap();
        assert!(application.content.contains("android:name: .App"));
        assert!(application
            .content
            .contains("android:theme: @style/Theme.App"));
    }

    #[test]
    fn layout_top_level_elements_become_chunks() {
        let analyzer = XmlAnalyzer::default();
        let chunks = analyzer.analyze("res/layout/activity_main.xml", LAYOUT);

        assert_eq!(chunks.len(), 2);
        assert!(chunks
            .iter()
            .all(|c| c.metadata.kind == ChunkKind::LayoutElement));
        assert_eq!(chunks[0].metadata.symbol_name.as_deref(), Some("TextView"));
        assert_eq!(chunks[1].metadata.symbol_name.as_deref(), Some("Button"));
        assert!(chunks[1].content.contains("@+id/submit"));
    }

    #[test]
    fn oversized_layout_elements_are_split() {
        let items: String = (0..100)
            .map(|i| format!("        <item android:id=\"@+id/item{i}\" android:title=\"Item {i}\" />\n"))
            .collect();
        let layout = format!("<menu>\n    <group>\n{items}    </group>\n</menu>\n");

        let analyzer = XmlAnalyzer::new(200);
        let chunks = analyzer.analyze("res/menu/main.xml", &layout);

        assert!(chunks.len() > 1);
        assert!(chunks
            .iter()
            .all(|c| c.metadata.kind == ChunkKind::LayoutFragment));
        assert!(chunks.iter().all(|c| c.content.len() <= 200 + 80));
    }

    #[test]
    fn self_closing_root_is_chunked_whole() {
        let analyzer = XmlAnalyzer::default();
        let chunks = analyzer.analyze(
            "res/layout/empty.xml",
            "<merge xmlns:android=\"http://schemas.android.com/apk/res/android\" />",
        );

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].metadata.kind, ChunkKind::LayoutElement);
        assert_eq!(chunks[0].metadata.symbol_name.as_deref(), Some("merge"));
    }

    #[test]
    fn non_xml_text_degrades_to_text_chunks() {
        let analyzer = XmlAnalyzer::default();
        let chunks = analyzer.analyze("res/raw/notes.xml", "not really xml at all");

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].metadata.kind, ChunkKind::Text);
    }

    #[test]
    fn line_numbers_are_anchored() {
        let analyzer = XmlAnalyzer::default();
        let chunks = analyzer.analyze("res/layout/activity_main.xml", LAYOUT);

        assert_eq!(chunks[0].start_line, 5);
        assert!(chunks[1].start_line > chunks[0].end_line);
    }
}
