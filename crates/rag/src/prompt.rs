use droid_search::RetrievedContext;

/// System framing for every request
pub const SYSTEM_PROMPT: &str = "You are an expert Android developer assistant.";

/// Build the user prompt: question first, then the retrieved snippets and a
/// per-file view of the same material.
#[must_use]
pub fn build_prompt(query: &str, context: &RetrievedContext) -> String {
    let mut parts: Vec<String> = vec![
        "Use the following context from the codebase to answer the question.".to_string(),
        format!("Question: {query}\n"),
    ];

    if !context.chunks.is_empty() {
        parts.push("Most Relevant Code Snippets:".to_string());
        for (i, hit) in context.chunks.iter().enumerate() {
            parts.push(format!(
                "### Snippet {} ({})",
                i + 1,
                hit.chunk.metadata.kind.as_str()
            ));
            parts.push(format!("File: {}", hit.chunk.file_path));
            parts.push(hit.chunk.content.clone());
            parts.push(String::new());
        }
    }

    if !context.files.is_empty() {
        parts.push("\nRelevant Files:".to_string());
        for (file_path, chunks) in &context.files {
            parts.push(format!("### File: {file_path}"));
            for chunk in chunks {
                parts.push(format!("- {}:", chunk.kind.as_str()));
                parts.push(chunk.content.clone());
            }
            parts.push(String::new());
        }
    }

    parts.push("\nProvide a comprehensive answer with code examples when applicable:".to_string());
    parts.join("\n")
}
