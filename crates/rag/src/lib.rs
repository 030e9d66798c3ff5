//! Retrieval-augmented answering over an indexed project.
//!
//! Assembles a prompt from retrieved context and calls an OpenAI-compatible
//! chat-completions endpoint.

mod error;
mod openai;
mod prompt;

pub use error::{RagError, Result};
pub use openai::{OpenAiClient, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use prompt::{build_prompt, SYSTEM_PROMPT};

use droid_search::{ContextRetrievalEngine, DEFAULT_MAX_CHUNKS};

/// Answers natural-language questions with retrieved code context
pub struct RagEngine {
    context_engine: ContextRetrievalEngine,
    client: OpenAiClient,
    max_chunks: usize,
}

impl RagEngine {
    #[must_use]
    pub fn new(context_engine: ContextRetrievalEngine, client: OpenAiClient) -> Self {
        Self {
            context_engine,
            client,
            max_chunks: DEFAULT_MAX_CHUNKS,
        }
    }

    /// Builder: cap the number of chunks retrieved per question
    #[must_use]
    pub const fn with_max_chunks(mut self, max_chunks: usize) -> Self {
        self.max_chunks = max_chunks;
        self
    }

    /// Generate a response for a query with automatically retrieved context
    pub async fn generate_response(&self, query: &str) -> Result<String> {
        let context = self
            .context_engine
            .get_context(query, self.max_chunks)
            .await?;
        if context.is_empty() {
            log::warn!("No context retrieved for query; answering without code snippets");
        }

        let prompt = build_prompt(query, &context);
        log::debug!("Prompt assembled ({} chars)", prompt.len());

        self.client.chat(SYSTEM_PROMPT, &prompt).await
    }
}
